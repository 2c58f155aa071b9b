use super::{projected, BuildOutput, FeatureBuilder};
use crate::geometry::{direction_angle, Geometry};
use crate::models::{direction_color, Style, StyledFeature};
use crate::projection::Projected;
use crate::protocol::Record;

/// Half the width of the arrow base, in meters
const ARROW_HALF_WIDTH: f64 = 10.0;

const ARROW_LINE_WIDTH: f64 = 2.0;

/// Arrows along one-way segments, coloured by direction: `id lat1 lon1 lat2 lon2`
#[derive(Debug, Clone, Copy, Default)]
pub struct OnewayBuilder;

/// Closed triangle with its tip at `to` and its base across `from`
fn arrow(from: Projected, to: Projected) -> Option<Vec<Projected>> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let length = (dx * dx + dy * dy).sqrt();

    if length == 0.0 || !length.is_finite() {
        return None;
    }

    let scale = ARROW_HALF_WIDTH / length;
    let left = Projected::new(from.x + dy * scale, from.y - dx * scale);
    let right = Projected::new(from.x - dy * scale, from.y + dx * scale);

    Some(vec![to, left, right, to])
}

impl FeatureBuilder for OnewayBuilder {
    fn build(&self, records: &[Record]) -> BuildOutput {
        let mut output = BuildOutput::default();

        for record in records {
            let ends = projected(record, 0).zip(projected(record, 2));
            let Some((from, to)) = ends else {
                output.malformed += 1;
                continue;
            };

            let Some(ring) = arrow(from, to) else {
                output.malformed += 1;
                continue;
            };

            let color = direction_color(direction_angle(from, to));

            output.features.push(StyledFeature::new(
                Geometry::LineString(ring),
                Style::line(&color, ARROW_LINE_WIDTH),
                &record.id,
            ));
        }

        output
    }
}
