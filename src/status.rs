use crate::models::DataType;

/// Outcome of the most recent data request, as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    NoData,
    Data { data_type: DataType, count: usize },
    Failed,
}

fn template(status_key: &str) -> &'static str {
    match status_key {
        "junctions" => "Processed # junctions",
        "super" => "Processed # super-nodes/segments",
        "oneway" => "Processed # oneway segments",
        "highway" => "Processed # highway segments",
        "transport" => "Processed # transport segments",
        "barrier" => "Processed # barriers",
        "turns" => "Processed # turn restrictions",
        "limit" => "Processed # limit changes",
        "property" => "Processed # property segments",
        "errorlogs" => "Processed # error logs",
        _ => "Processed # items",
    }
}

impl Status {
    /// Key of the page region that shows this status
    #[must_use]
    pub fn region(&self) -> &'static str {
        match self {
            Self::NoData => "no_data",
            Self::Data { .. } => "data",
            Self::Failed => "failed",
        }
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::NoData => "No data displayed".to_string(),
            Self::Data { data_type, count } => template(data_type.status_key()).replacen('#', &count.to_string(), 1),
            Self::Failed => "Failed to get data".to_string(),
        }
    }
}
