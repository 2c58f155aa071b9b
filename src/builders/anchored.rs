//! Builders where node records set an anchor that following edge records
//! are drawn from.

use super::{projected, BuildOutput, FeatureBuilder, MARKER_COLOR};
use crate::geometry::Geometry;
use crate::models::{Icon, Style, StyledFeature};
use crate::projection::Projected;
use crate::protocol::Record;

const SEGMENT_WIDTH: f64 = 2.0;
const SUPER_NODE_RADIUS: f64 = 4.0;
const LIMIT_NODE_RADIUS: f64 = 3.0;

/// Distance from the node to the limit sign, in meters
const LIMIT_ICON_DISTANCE: f64 = 120.0;
const LIMIT_ICON_SIZE: f64 = 19.0;
const LIMIT_ICON_Y_OFFSET: f64 = -9.0;

/// Super-nodes and super-segments.
///
/// Ids starting with `n` are nodes (`nID lat lon`); anything else is a
/// segment from the last node to the given point.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuperBuilder;

impl FeatureBuilder for SuperBuilder {
    fn build(&self, records: &[Record]) -> BuildOutput {
        let node_style = Style::point(MARKER_COLOR, SUPER_NODE_RADIUS);
        let segment_style = Style::line(MARKER_COLOR, SEGMENT_WIDTH);

        let mut output = BuildOutput::default();
        let mut anchor: Option<Projected> = None;

        for record in records {
            let is_node = record.id.starts_with('n');

            let Some(point) = projected(record, 0) else {
                // Later segments must not attach to an earlier node
                if is_node {
                    anchor = None;
                }
                output.malformed += 1;
                continue;
            };

            if is_node {
                anchor = Some(point);
                output.features.push(StyledFeature::new(Geometry::Point(point), node_style.clone(), &record.id));
            } else if let Some(node) = anchor {
                output.features.push(StyledFeature::new(Geometry::segment(node, point), segment_style.clone(), &record.id));
            } else {
                // Segment before any node
                output.malformed += 1;
            }
        }

        output
    }
}

/// Speed, weight, height, width and length limits.
///
/// Records without a value are nodes (`id lat lon`); records with one
/// (`id lat lon value`) are segments leaving the last node, marked with a
/// sign showing the value.
#[derive(Debug, Clone, Copy, Default)]
pub struct LimitBuilder;

impl LimitBuilder {
    /// Where to put the sign: a fixed distance from `node` towards `towards`
    fn icon_position(node: Projected, towards: Projected) -> Option<Projected> {
        let dx = towards.x - node.x;
        let dy = towards.y - node.y;
        let length = (dx * dx + dy * dy).sqrt();

        if length == 0.0 || !length.is_finite() {
            return None;
        }

        let scale = LIMIT_ICON_DISTANCE / length;
        Some(Projected::new(node.x + dx * scale, node.y + dy * scale))
    }

    fn icon(value: &str) -> Icon {
        Icon {
            path: format!("icons/limit-{value}.png"),
            width: LIMIT_ICON_SIZE,
            height: LIMIT_ICON_SIZE,
            y_offset: LIMIT_ICON_Y_OFFSET,
        }
    }
}

impl FeatureBuilder for LimitBuilder {
    fn build(&self, records: &[Record]) -> BuildOutput {
        let node_style = Style::point(MARKER_COLOR, LIMIT_NODE_RADIUS);
        let segment_style = Style::line(MARKER_COLOR, SEGMENT_WIDTH);

        let mut output = BuildOutput::default();
        let mut anchor: Option<Projected> = None;

        for record in records {
            let value = record.field(2).filter(|v| !v.is_empty());

            let Some(point) = projected(record, 0) else {
                if value.is_none() {
                    anchor = None;
                }
                output.malformed += 1;
                continue;
            };

            let Some(value) = value else {
                anchor = Some(point);
                output.features.push(StyledFeature::new(Geometry::Point(point), node_style.clone(), &record.id));
                continue;
            };

            let Some(node) = anchor else {
                output.malformed += 1;
                continue;
            };

            output.features.push(StyledFeature::new(Geometry::segment(node, point), segment_style.clone(), &record.id));

            if let Some(position) = Self::icon_position(node, point) {
                output.features.push(StyledFeature::new(Geometry::Point(position), Style::icon(Self::icon(value)), &record.id));
            }
        }

        output
    }
}
