use super::{projected, BuildOutput, FeatureBuilder, MARKER_COLOR};
use crate::geometry::Geometry;
use crate::models::{Style, StyledFeature};
use crate::protocol::Record;

/// Fill colour of a junction, indexed by the number of highways meeting there
pub const JUNCTION_COLORS: [&str; 10] = [
    "#FFFFFF", "#FF0000", "#FFFF00", "#00FF00", "#8B4513",
    "#00BFFF", "#FF69B4", "#000000", "#000000", "#000000",
];

/// Used when the junction degree is missing or beyond the palette
const JUNCTION_FALLBACK_COLOR: &str = "#808080";

const JUNCTION_RADIUS: f64 = 2.0;

/// One marker per record: `id lat lon`
#[derive(Debug, Clone)]
pub struct PointBuilder {
    pub style: Style,
}

impl Default for PointBuilder {
    fn default() -> Self {
        Self {
            style: Style::point(MARKER_COLOR, 3.0),
        }
    }
}

impl FeatureBuilder for PointBuilder {
    fn build(&self, records: &[Record]) -> BuildOutput {
        let mut output = BuildOutput::default();

        for record in records {
            let Some(point) = projected(record, 0) else {
                output.malformed += 1;
                continue;
            };

            output.features.push(StyledFeature::new(Geometry::Point(point), self.style.clone(), &record.id));
        }

        output
    }
}

/// Junction markers coloured by degree: `id lat lon degree`
#[derive(Debug, Clone, Copy, Default)]
pub struct JunctionBuilder;

impl JunctionBuilder {
    fn style_for(degree: Option<&str>) -> Option<Style> {
        let index: usize = degree?.parse().ok()?;
        JUNCTION_COLORS.get(index).map(|color| Style::point(color, JUNCTION_RADIUS))
    }
}

impl FeatureBuilder for JunctionBuilder {
    fn build(&self, records: &[Record]) -> BuildOutput {
        let mut output = BuildOutput::default();

        for record in records {
            let Some(point) = projected(record, 0) else {
                output.malformed += 1;
                continue;
            };

            let style = Self::style_for(record.field(2)).unwrap_or_else(|| {
                output.malformed += 1;
                Style::point(JUNCTION_FALLBACK_COLOR, JUNCTION_RADIUS)
            });

            output.features.push(StyledFeature::new(Geometry::Point(point), style, &record.id));
        }

        output
    }
}
