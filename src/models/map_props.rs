use serde::Deserialize;
use crate::api::Fetch;
use crate::projection::GeoBounds;

const MAP_PROPS_URL: &str = "mapprops.json";

/// Links shown under the map for the active tile layer
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Attribution {
    #[serde(default)]
    pub data_url: String,
    #[serde(default)]
    pub data_text: String,
    #[serde(default)]
    pub tile_url: String,
    #[serde(default)]
    pub tile_text: String,
}

impl Attribution {
    #[must_use]
    pub fn data_html(&self) -> String {
        anchor(&self.data_url, "data_attribution", &self.data_text)
    }

    #[must_use]
    pub fn tile_html(&self) -> String {
        anchor(&self.tile_url, "tile_attribution", &self.tile_text)
    }
}

fn anchor(href: &str, target: &str, text: &str) -> String {
    format!(
        "<a href=\"{}\" target=\"{target}\">{}</a>",
        quick_xml::escape::escape(href),
        quick_xml::escape::escape(text)
    )
}

/// A base map tile source
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TileLayerProps {
    pub label: String,
    pub tile_url: String,
    #[serde(default)]
    pub attribution: Attribution,
}

impl TileLayerProps {
    /// Tile URL template with `${x}` style placeholders rewritten to `{x}`
    #[must_use]
    pub fn leaflet_url(&self) -> String {
        self.tile_url.replace("${", "{")
    }
}

/// Site configuration for the map page
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MapProps {
    #[serde(default = "default_west_edge")]
    pub west_edge: f64,
    #[serde(default = "default_east_edge")]
    pub east_edge: f64,
    #[serde(default = "default_south_edge")]
    pub south_edge: f64,
    #[serde(default = "default_north_edge")]
    pub north_edge: f64,
    #[serde(default = "default_zoom_out")]
    pub zoom_out: u32,
    #[serde(default = "default_zoom_in")]
    pub zoom_in: u32,
    #[serde(default = "default_map_data")]
    pub map_data: Vec<TileLayerProps>,
    /// Editor page opened by the "edit" link
    #[serde(default)]
    pub edit_url: Option<String>,
    /// Base URL for node/way/relation links in feature details
    #[serde(default)]
    pub browse_url: Option<String>,
    #[serde(default = "default_data_endpoint")]
    pub data_endpoint: String,
    #[serde(default = "default_statistics_endpoint")]
    pub statistics_endpoint: String,
    #[serde(default = "default_router_page")]
    pub router_page: String,
    #[serde(default = "default_visualiser_page")]
    pub visualiser_page: String,
    /// Suffixes of the translated copies of the page, e.g. `en`, `de`
    #[serde(default)]
    pub languages: Vec<String>,
}

fn default_west_edge() -> f64 {
    -11.0
}

fn default_east_edge() -> f64 {
    2.0
}

fn default_south_edge() -> f64 {
    49.5
}

fn default_north_edge() -> f64 {
    61.0
}

fn default_zoom_out() -> u32 {
    4
}

fn default_zoom_in() -> u32 {
    18
}

fn default_map_data() -> Vec<TileLayerProps> {
    vec![TileLayerProps {
        label: "OpenStreetMap".to_string(),
        tile_url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
        attribution: Attribution {
            data_url: "https://www.openstreetmap.org/copyright".to_string(),
            data_text: "© OpenStreetMap contributors".to_string(),
            tile_url: "https://www.openstreetmap.org/".to_string(),
            tile_text: "© OpenStreetMap".to_string(),
        },
    }]
}

fn default_data_endpoint() -> String {
    "visualiser.cgi".to_string()
}

fn default_statistics_endpoint() -> String {
    "statistics.cgi".to_string()
}

fn default_router_page() -> String {
    "router.html".to_string()
}

fn default_visualiser_page() -> String {
    "visualiser.html".to_string()
}

impl Default for MapProps {
    fn default() -> Self {
        Self {
            west_edge: default_west_edge(),
            east_edge: default_east_edge(),
            south_edge: default_south_edge(),
            north_edge: default_north_edge(),
            zoom_out: default_zoom_out(),
            zoom_in: default_zoom_in(),
            map_data: default_map_data(),
            edit_url: None,
            browse_url: None,
            data_endpoint: default_data_endpoint(),
            statistics_endpoint: default_statistics_endpoint(),
            router_page: default_router_page(),
            visualiser_page: default_visualiser_page(),
            languages: Vec::new(),
        }
    }
}

impl MapProps {
    /// Parse settings from JSON, filling in anything missing with defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse map properties: {e}"))
    }

    /// Fetch `mapprops.json` from the site, using defaults if it is unavailable
    pub async fn load<F: Fetch>(fetcher: &F) -> Self {
        match fetcher.get(MAP_PROPS_URL).await.and_then(|json| Self::from_json(&json)) {
            Ok(props) => props,
            Err(e) => {
                leptos::logging::warn!("Using default map properties: {e}");
                Self::default()
            }
        }
    }

    /// The area the map is restricted to
    #[must_use]
    pub fn extent(&self) -> GeoBounds {
        GeoBounds::new(self.south_edge, self.west_edge, self.north_edge, self.east_edge)
    }

    #[must_use]
    pub fn edit_url(&self) -> Option<&str> {
        self.edit_url.as_deref().filter(|url| !url.is_empty())
    }

    #[must_use]
    pub fn browse_url(&self) -> Option<&str> {
        self.browse_url.as_deref().filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let props = MapProps::from_json("{}");
        assert_eq!(props, Ok(MapProps::default()));
    }

    #[test]
    fn test_partial_json_overrides() {
        let json = r#"{
            "west_edge": -5.5,
            "zoom_in": 16,
            "edit_url": "https://www.openstreetmap.org/edit",
            "map_data": [
                {"label": "Mapnik", "tile_url": "https://tiles.example.org/${z}/${x}/${y}.png"}
            ]
        }"#;

        let props = MapProps::from_json(json).unwrap_or_default();
        assert_eq!(props.west_edge, -5.5);
        assert_eq!(props.zoom_in, 16);
        assert_eq!(props.zoom_out, 4);
        assert_eq!(props.edit_url(), Some("https://www.openstreetmap.org/edit"));
        assert_eq!(props.browse_url(), None);
        assert_eq!(props.map_data[0].leaflet_url(), "https://tiles.example.org/{z}/{x}/{y}.png");
        assert_eq!(props.map_data[0].attribution, Attribution::default());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(MapProps::from_json("{ not json").is_err());
    }

    #[test]
    fn test_empty_urls_count_as_unset() {
        let props = MapProps {
            edit_url: Some(String::new()),
            ..MapProps::default()
        };
        assert_eq!(props.edit_url(), None);
    }

    #[test]
    fn test_attribution_html() {
        let attribution = Attribution {
            data_url: "https://example.org/data?a=1&b=2".to_string(),
            data_text: "Data".to_string(),
            ..Attribution::default()
        };
        assert_eq!(
            attribution.data_html(),
            "<a href=\"https://example.org/data?a=1&amp;b=2\" target=\"data_attribution\">Data</a>"
        );
    }
}
