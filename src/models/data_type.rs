use std::fmt;
use std::str::FromStr;

const HIGHWAYS: &[&str] = &[
    "motorway",
    "trunk",
    "primary",
    "secondary",
    "tertiary",
    "unclassified",
    "residential",
    "service",
    "track",
    "cycleway",
    "path",
    "steps",
    "ferry",
];

const TRANSPORTS: &[&str] = &[
    "foot",
    "horse",
    "wheelchair",
    "bicycle",
    "moped",
    "motorcycle",
    "motorcar",
    "goods",
    "hgv",
    "psv",
];

const PROPERTIES: &[&str] = &[
    "paved",
    "multilane",
    "bridge",
    "tunnel",
    "footroute",
    "bicycleroute",
];

/// The kinds of data the backend can be asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Junctions,
    Super,
    Oneway,
    Highway,
    Transport,
    Barrier,
    Turns,
    Speed,
    Weight,
    Height,
    Width,
    Length,
    Property,
    Errorlogs,
}

impl DataType {
    pub const ALL: [DataType; 14] = [
        DataType::Junctions,
        DataType::Super,
        DataType::Oneway,
        DataType::Highway,
        DataType::Transport,
        DataType::Barrier,
        DataType::Turns,
        DataType::Speed,
        DataType::Weight,
        DataType::Height,
        DataType::Width,
        DataType::Length,
        DataType::Property,
        DataType::Errorlogs,
    ];

    /// Token used in the `data=` request argument
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Junctions => "junctions",
            Self::Super => "super",
            Self::Oneway => "oneway",
            Self::Highway => "highway",
            Self::Transport => "transport",
            Self::Barrier => "barrier",
            Self::Turns => "turns",
            Self::Speed => "speed",
            Self::Weight => "weight",
            Self::Height => "height",
            Self::Width => "width",
            Self::Length => "length",
            Self::Property => "property",
            Self::Errorlogs => "errorlogs",
        }
    }

    /// Key of the status message template; all limit types share one
    #[must_use]
    pub fn status_key(self) -> &'static str {
        if self.is_limit() {
            "limit"
        } else {
            self.as_str()
        }
    }

    #[must_use]
    pub fn is_limit(self) -> bool {
        matches!(self, Self::Speed | Self::Weight | Self::Height | Self::Width | Self::Length)
    }

    /// Values accepted after the `-` in the request token, empty if the type takes none
    #[must_use]
    pub fn subselectors(self) -> &'static [&'static str] {
        match self {
            Self::Highway => HIGHWAYS,
            Self::Transport | Self::Barrier => TRANSPORTS,
            Self::Property => PROPERTIES,
            _ => &[],
        }
    }

    #[must_use]
    pub fn needs_subselector(self) -> bool {
        !self.subselectors().is_empty()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown data type: {s}"))
    }
}

/// A data type together with its attribute filter, if the type needs one
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataSelection {
    pub data_type: DataType,
    pub subselector: Option<String>,
}

impl DataSelection {
    /// Selection of `data_type` using its first subselector when one is required
    #[must_use]
    pub fn new(data_type: DataType) -> Self {
        Self {
            data_type,
            subselector: data_type.subselectors().first().map(|s| (*s).to_string()),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the type takes no subselector or the value is not one it accepts
    pub fn with_subselector(data_type: DataType, subselector: &str) -> Result<Self, String> {
        if !data_type.subselectors().contains(&subselector) {
            return Err(format!("'{subselector}' is not a valid selection for {data_type}"));
        }

        Ok(Self {
            data_type,
            subselector: Some(subselector.to_string()),
        })
    }

    /// Value of the `data=` request argument, e.g. `highway-primary`
    #[must_use]
    pub fn token(&self) -> String {
        match &self.subselector {
            Some(sub) if self.data_type.needs_subselector() => format!("{}-{sub}", self.data_type),
            _ => self.data_type.to_string(),
        }
    }
}
