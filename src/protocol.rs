//! Decoding of the plain-text data responses.
//!
//! The first line holds the bounding box of the response as
//! `lat_min lon_min lat_max lon_max`. Every following line is one record:
//! a reference id and then the fields of the requested data type, all
//! separated by single spaces.

use crate::models::BoundingBox;
use crate::projection::LonLat;

/// One data line of a response
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: String,
    pub fields: Vec<String>,
}

impl Record {
    #[must_use]
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn number(&self, index: usize) -> Option<f64> {
        self.field(index)?.parse().ok()
    }

    /// Position stored as latitude at `index` and longitude at `index + 1`
    #[must_use]
    pub fn lat_lon(&self, index: usize) -> Option<LonLat> {
        let lat = self.number(index)?;
        let lon = self.number(index + 1)?;
        Some(LonLat::new(lon, lat))
    }
}

/// A decoded response
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    pub bounding_box: BoundingBox,
    pub records: Vec<Record>,
    /// Non-blank lines dropped because their id was empty
    pub skipped: usize,
}

fn parse_bounding_box(line: &str) -> Result<BoundingBox, String> {
    let values = line
        .split_whitespace()
        .map(str::parse::<f64>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("Invalid bounding box '{line}': {e}"))?;

    let &[south, west, north, east] = values.as_slice() else {
        return Err(format!("Invalid bounding box '{line}': expected 4 values, found {}", values.len()));
    };

    Ok(BoundingBox::new(south, west, north, east))
}

/// Split a response into its bounding box and records.
///
/// Lines whose first token is empty are skipped; this covers the trailing
/// blank line and lines starting with a space. Field counts are not checked
/// here, each builder takes what it needs.
///
/// # Errors
///
/// Returns an error if the first line is not a valid bounding box
pub fn decode(text: &str) -> Result<Payload, String> {
    let mut lines = text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line));

    let first = lines.next().unwrap_or_default();
    let bounding_box = parse_bounding_box(first)?;

    let mut records = Vec::new();
    let mut skipped = 0;

    for line in lines {
        let mut words = line.split(' ');
        let id = words.next().unwrap_or_default();

        if id.is_empty() {
            if !line.trim().is_empty() {
                skipped += 1;
            }
            continue;
        }

        records.push(Record {
            id: id.to_string(),
            fields: words.map(str::to_string).collect(),
        });
    }

    Ok(Payload {
        bounding_box,
        records,
        skipped,
    })
}
