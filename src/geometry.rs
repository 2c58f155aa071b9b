use crate::projection::Projected;

/// Shape of a rendered feature, in projected meters
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Projected),
    /// Open or closed path; a closed ring repeats its first vertex at the end
    LineString(Vec<Projected>),
}

impl Geometry {
    #[must_use]
    pub fn segment(from: Projected, to: Projected) -> Self {
        Self::LineString(vec![from, to])
    }

    #[must_use]
    pub fn vertices(&self) -> &[Projected] {
        match self {
            Self::Point(point) => std::slice::from_ref(point),
            Self::LineString(points) => points,
        }
    }

    /// Minimum distance from `point` to this geometry.
    #[must_use]
    pub fn distance_to(&self, point: Projected) -> f64 {
        match self {
            Self::Point(p) => p.distance_to(point),
            Self::LineString(points) => match points.as_slice() {
                [] => f64::INFINITY,
                [only] => only.distance_to(point),
                _ => points
                    .windows(2)
                    .map(|leg| segment_distance(point, leg[0], leg[1]))
                    .fold(f64::INFINITY, f64::min),
            },
        }
    }
}

/// Angle of the vector from `from` to `to`, in radians counter-clockwise from east.
#[must_use]
pub fn direction_angle(from: Projected, to: Projected) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Distance from `point` to the closest point of the segment `start`..`end`
#[must_use]
pub fn segment_distance(point: Projected, start: Projected, end: Projected) -> f64 {
    let (dx, dy) = (end.x - start.x, end.y - start.y);
    let length_sq = dx * dx + dy * dy;

    if length_sq == 0.0 {
        return point.distance_to(start);
    }

    let t = (((point.x - start.x) * dx + (point.y - start.y) * dy) / length_sq).clamp(0.0, 1.0);
    point.distance_to(Projected::new(start.x + t * dx, start.y + t * dy))
}
