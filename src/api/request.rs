use crate::models::DataSelection;
use crate::projection::GeoBounds;

/// A request for one kind of data over an area
#[derive(Debug, Clone, PartialEq)]
pub struct DataRequest {
    pub selection: DataSelection,
    pub bounds: GeoBounds,
}

impl DataRequest {
    #[must_use]
    pub fn new(selection: DataSelection, bounds: GeoBounds) -> Self {
        Self { selection, bounds }
    }

    /// `<endpoint>?lonmin=..;latmin=..;lonmax=..;latmax=..;data=<token>`
    #[must_use]
    pub fn url(&self, endpoint: &str) -> String {
        format!(
            "{endpoint}?lonmin={};latmin={};lonmax={};latmax={};data={}",
            self.bounds.west,
            self.bounds.south,
            self.bounds.east,
            self.bounds.north,
            self.selection.token()
        )
    }
}

/// URL of the details for a feature reference
#[must_use]
pub fn dump_url(endpoint: &str, dump: &str) -> String {
    format!("{endpoint}?dump={dump}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DataType;

    #[test]
    fn test_data_url() {
        let request = DataRequest::new(
            DataSelection::new(DataType::Junctions),
            GeoBounds::new(51.25, -1.5, 51.75, -0.5),
        );
        assert_eq!(
            request.url("visualiser.cgi"),
            "visualiser.cgi?lonmin=-1.5;latmin=51.25;lonmax=-0.5;latmax=51.75;data=junctions"
        );
    }

    #[test]
    fn test_data_url_with_subselector() {
        let selection = DataSelection::with_subselector(DataType::Highway, "primary").unwrap_or_else(|_| DataSelection::new(DataType::Highway));
        let request = DataRequest::new(selection, GeoBounds::new(0.0, 0.0, 1.0, 1.0));
        assert!(request.url("v.cgi").ends_with(";data=highway-primary"));
    }

    #[test]
    fn test_dump_url() {
        assert_eq!(dump_url("visualiser.cgi", "n123"), "visualiser.cgi?dump=n123");
    }
}
