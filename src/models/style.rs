/// Outline of a line or point
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

/// Image drawn in place of a point marker
#[derive(Debug, Clone, PartialEq)]
pub struct Icon {
    pub path: String,
    pub width: f64,
    pub height: f64,
    /// Pixel offset of the image top from the anchor point
    pub y_offset: f64,
}

/// How a single feature is drawn
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    pub stroke: Option<Stroke>,
    pub fill: Option<String>,
    pub point_radius: f64,
    pub icon: Option<Icon>,
}

impl Style {
    /// Filled circle with no outline
    #[must_use]
    pub fn point(fill: &str, radius: f64) -> Self {
        Self {
            stroke: None,
            fill: Some(fill.to_string()),
            point_radius: radius,
            icon: None,
        }
    }

    /// Unfilled line
    #[must_use]
    pub fn line(color: &str, width: f64) -> Self {
        Self {
            stroke: Some(Stroke {
                color: color.to_string(),
                width,
            }),
            fill: None,
            point_radius: 0.0,
            icon: None,
        }
    }

    #[must_use]
    pub fn icon(icon: Icon) -> Self {
        Self {
            icon: Some(icon),
            ..Self::default()
        }
    }

    /// Style applied to the clone of the selected feature
    #[must_use]
    pub fn highlight() -> Self {
        Self {
            stroke: Some(Stroke {
                color: HIGHLIGHT_COLOR.to_string(),
                width: 8.0,
            }),
            fill: Some(HIGHLIGHT_COLOR.to_string()),
            point_radius: 4.0,
            icon: None,
        }
    }
}

pub const HIGHLIGHT_COLOR: &str = "#F0F000";

/// Colour for a direction of travel.
///
/// Three cosines spaced a third of a turn apart give the red, green and blue
/// channels, so the colour rotates smoothly as the angle does. Each channel
/// is a 0-15 level written as a doubled hex digit.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub fn direction_color(angle: f64) -> String {
    const THIRD_TURN: f64 = 2.094_395_1;

    let level = |phase: f64| -> u8 {
        let value = (7.5 + 7.9 * (angle + phase).cos() + 0.5).floor();
        value.clamp(0.0, 15.0) as u8
    };

    let [r, g, b] = [level(0.0), level(THIRD_TURN), level(-THIRD_TURN)];
    format!("#{r:X}{r:X}{g:X}{g:X}{b:X}{b:X}")
}
