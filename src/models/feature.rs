use super::Style;
use crate::geometry::Geometry;
use crate::projection::GeoBounds;

/// Area covered by a data response, taken from its first line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub bounds: GeoBounds,
}

impl BoundingBox {
    #[must_use]
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            bounds: GeoBounds::new(south, west, north, east),
        }
    }
}

/// A decoded record ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct StyledFeature {
    pub geometry: Geometry,
    pub style: Style,
    /// Reference used to fetch the feature's details, if it has one
    pub dump: Option<String>,
}

impl StyledFeature {
    #[must_use]
    pub fn new(geometry: Geometry, style: Style, dump: &str) -> Self {
        Self {
            geometry,
            style,
            dump: Some(dump.to_string()),
        }
    }

    /// Copy of this feature's shape drawn in the highlight style
    #[must_use]
    pub fn highlighted(&self) -> Self {
        Self {
            geometry: self.geometry.clone(),
            style: Style::highlight(),
            dump: None,
        }
    }
}
