use super::{projected, BuildOutput, FeatureBuilder, MARKER_COLOR};
use crate::geometry::Geometry;
use crate::models::{Style, StyledFeature};
use crate::protocol::Record;

const LINE_WIDTH: f64 = 2.0;

/// Build one line per record from `vertex_count` consecutive lat/lon pairs
fn build_lines(records: &[Record], vertex_count: usize, style: &Style) -> BuildOutput {
    let mut output = BuildOutput::default();

    for record in records {
        let vertices: Option<Vec<_>> = (0..vertex_count).map(|i| projected(record, 2 * i)).collect();

        let Some(vertices) = vertices else {
            output.malformed += 1;
            continue;
        };

        output.features.push(StyledFeature::new(Geometry::LineString(vertices), style.clone(), &record.id));
    }

    output
}

/// Plain two-point segments: `id lat1 lon1 lat2 lon2`
#[derive(Debug, Clone)]
pub struct SegmentBuilder {
    pub style: Style,
}

impl Default for SegmentBuilder {
    fn default() -> Self {
        Self {
            style: Style::line(MARKER_COLOR, LINE_WIDTH),
        }
    }
}

impl FeatureBuilder for SegmentBuilder {
    fn build(&self, records: &[Record]) -> BuildOutput {
        build_lines(records, 2, &self.style)
    }
}

/// Turn restrictions drawn from, via and to: `id lat1 lon1 lat2 lon2 lat3 lon3`
#[derive(Debug, Clone)]
pub struct PathBuilder {
    pub style: Style,
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self {
            style: Style::line(MARKER_COLOR, LINE_WIDTH),
        }
    }
}

impl FeatureBuilder for PathBuilder {
    fn build(&self, records: &[Record]) -> BuildOutput {
        build_lines(records, 3, &self.style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::test_support::records;
    use crate::projection::{to_projected, LonLat};

    #[test]
    fn test_segments() {
        let output = SegmentBuilder::default().build(&records("w1 51.0 -1.0 51.1 -1.1\nw2 52.0 0.0 52.1 0.1\n"));

        assert_eq!(output.features.len(), 2);
        assert_eq!(
            output.features[0].geometry,
            Geometry::segment(
                to_projected(LonLat::new(-1.0, 51.0)),
                to_projected(LonLat::new(-1.1, 51.1))
            )
        );
        let stroke = output.features[1].style.stroke.clone();
        assert_eq!(stroke.map(|s| (s.color, s.width)), Some((MARKER_COLOR.to_string(), 2.0)));
        assert_eq!(output.features[1].style.fill, None);
    }

    #[test]
    fn test_segment_with_one_point_is_malformed() {
        let output = SegmentBuilder::default().build(&records("w1 51.0 -1.0\n"));
        assert!(output.features.is_empty());
        assert_eq!(output.malformed, 1);
    }

    #[test]
    fn test_turn_restriction_path() {
        let output = PathBuilder::default().build(&records("t1 51.0 -1.0 51.1 -1.1 51.2 -1.0\n"));

        assert_eq!(output.features.len(), 1);
        let vertices = output.features[0].geometry.vertices();
        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[1], to_projected(LonLat::new(-1.1, 51.1)));
        assert_eq!(output.features[0].dump.as_deref(), Some("t1"));
    }

    #[test]
    fn test_turn_restriction_needs_three_points() {
        let output = PathBuilder::default().build(&records("t1 51.0 -1.0 51.1 -1.1\n"));
        assert_eq!(output.malformed, 1);
    }
}
