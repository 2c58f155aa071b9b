use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// Radius of the sphere used by the spherical Mercator projection (EPSG:3857)
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// A geographic position in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    #[must_use]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// A projected position in meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
}

impl Projected {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(self, other: Projected) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Convert geographic degrees to spherical Mercator meters.
#[must_use]
pub fn to_projected(position: LonLat) -> Projected {
    let x = EARTH_RADIUS * position.lon.to_radians();
    let y = EARTH_RADIUS * (FRAC_PI_4 + position.lat.to_radians() / 2.0).tan().ln();
    Projected { x, y }
}

/// Convert spherical Mercator meters back to geographic degrees.
#[must_use]
pub fn to_geographic(position: Projected) -> LonLat {
    let lon = (position.x / EARTH_RADIUS).to_degrees();
    let lat = (2.0 * (position.y / EARTH_RADIUS).exp().atan() - FRAC_PI_2).to_degrees();
    LonLat { lon, lat }
}

/// A geographic rectangle in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl GeoBounds {
    #[must_use]
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self { south, west, north, east }
    }

    #[must_use]
    pub fn center(&self) -> LonLat {
        LonLat::new((self.west + self.east) / 2.0, (self.south + self.north) / 2.0)
    }
}

/// Projected meters covered by one screen pixel at `zoom`, for 256 px tiles
#[must_use]
pub fn meters_per_pixel(zoom: u32) -> f64 {
    2.0 * PI * EARTH_RADIUS / (256.0 * f64::from(1_u32 << zoom.min(30)))
}

/// Format a number the way `printf("%.5f")` does.
///
/// Rounds half up on the scaled value, and keeps a `0` or `-0` integer part
/// for magnitudes below one so the sign is never lost.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_fixed5(value: f64) -> String {
    let scaled = (value * 100_000.0 + 0.5).floor() as i64;

    let delta = if (0..100_000).contains(&scaled) {
        100_000
    } else if scaled < 0 && scaled > -100_000 {
        -100_000
    } else {
        0
    };

    let digits = (scaled + delta).to_string();
    let split = digits.len() - 5;
    let frac_part = &digits[split..];

    let int_part = match delta {
        d if d > 0 => "0",
        d if d < 0 => "-0",
        _ => &digits[..split],
    };

    format!("{int_part}.{frac_part}")
}
