use reqwest::Url;

use super::MapProps;
use crate::projection::{format_fixed5, LonLat};

/// Where the map is looking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub center: LonLat,
    pub zoom: u32,
}

impl ViewState {
    /// View centred on the configured extent at the outermost zoom
    #[must_use]
    pub fn initial(props: &MapProps) -> Self {
        Self {
            center: props.extent().center(),
            zoom: props.zoom_out,
        }
    }

    /// URL arguments describing this view, e.g. `lat=51.50000;lon=-0.12000;zoom=12`
    #[must_use]
    pub fn map_arguments(&self) -> String {
        format!(
            "lat={};lon={};zoom={}",
            format_fixed5(self.center.lat),
            format_fixed5(self.center.lon),
            self.zoom
        )
    }

    #[must_use]
    pub fn permalink_url(&self, page_path: &str) -> String {
        format!("{page_path}?{}", self.map_arguments())
    }

    #[must_use]
    pub fn router_url(&self, props: &MapProps) -> String {
        format!("{}?{}", props.router_page, self.map_arguments())
    }

    /// Link to the external editor, if one is configured
    #[must_use]
    pub fn edit_url(&self, props: &MapProps) -> Option<String> {
        props.edit_url().map(|url| format!("{url}?{}", self.map_arguments()))
    }

    /// Link to a translated copy of this page
    #[must_use]
    pub fn language_url(&self, props: &MapProps, language: &str) -> String {
        format!("{}.{language}?{}", props.visualiser_page, self.map_arguments())
    }
}

/// Position requested through the page URL
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewArgs {
    pub lon: Option<f64>,
    pub lat: Option<f64>,
    pub zoom: Option<u32>,
}

fn is_coordinate(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit() || c == '-' || c == '.')
}

fn is_zoom(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

impl ViewArgs {
    /// Read `lon`, `lat` and `zoom` from a query string.
    ///
    /// Arguments may be separated by `;` or `&` and are percent-decoded.
    /// Values that do not look like numbers of the right kind are ignored.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let mut args = Self::default();

        let query = query.strip_prefix('?').unwrap_or(query).replace(';', "&");
        let Ok(mut url) = Url::parse("http://localhost/") else {
            return args;
        };
        url.set_query(Some(&query));

        for (key, value) in url.query_pairs() {
            let value = value.as_ref();

            match key.as_ref() {
                "lon" if is_coordinate(value) => args.lon = value.parse().ok(),
                "lat" if is_coordinate(value) => args.lat = value.parse().ok(),
                "zoom" if is_zoom(value) => args.zoom = value.parse().ok(),
                _ => {}
            }
        }

        args
    }

    /// The requested view limited to the configured area and zoom range,
    /// or `None` unless all three values were given
    #[must_use]
    pub fn clamped(&self, props: &MapProps) -> Option<ViewState> {
        let (lon, lat, zoom) = (self.lon?, self.lat?, self.zoom?);

        Some(ViewState {
            center: LonLat::new(
                lon.max(props.west_edge).min(props.east_edge),
                lat.max(props.south_edge).min(props.north_edge),
            ),
            zoom: zoom.max(props.zoom_out).min(props.zoom_in),
        })
    }
}
