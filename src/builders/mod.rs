//! Per-data-type rules turning decoded records into styled features.

mod anchored;
mod oneway;
mod points;
mod segments;

pub use anchored::{LimitBuilder, SuperBuilder};
pub use oneway::OnewayBuilder;
pub use points::{JunctionBuilder, PointBuilder, JUNCTION_COLORS};
pub use segments::{PathBuilder, SegmentBuilder};

use crate::models::{DataType, StyledFeature};
use crate::projection::{to_projected, Projected};
use crate::protocol::Record;
use indexmap::IndexMap;

pub const MARKER_COLOR: &str = "#FF0000";

/// Features produced from one response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildOutput {
    pub features: Vec<StyledFeature>,
    /// Records that were missing fields or otherwise could not be drawn as intended
    pub malformed: usize,
}

/// Decoding and styling rule for one data type
pub trait FeatureBuilder {
    fn build(&self, records: &[Record]) -> BuildOutput;
}

/// Projected position stored as latitude/longitude at `index` of the record
fn projected(record: &Record, index: usize) -> Option<Projected> {
    record.lat_lon(index).map(to_projected)
}

/// Lookup from data type to its builder
pub struct BuilderRegistry {
    builders: IndexMap<DataType, Box<dyn FeatureBuilder>>,
}

impl BuilderRegistry {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            builders: IndexMap::new(),
        }
    }

    pub fn register(&mut self, data_type: DataType, builder: Box<dyn FeatureBuilder>) {
        self.builders.insert(data_type, builder);
    }

    #[must_use]
    pub fn get(&self, data_type: DataType) -> Option<&dyn FeatureBuilder> {
        self.builders.get(&data_type).map(AsRef::as_ref)
    }
}

impl Default for BuilderRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();

        registry.register(DataType::Junctions, Box::new(JunctionBuilder));
        registry.register(DataType::Super, Box::new(SuperBuilder));
        registry.register(DataType::Oneway, Box::new(OnewayBuilder));
        registry.register(DataType::Highway, Box::new(SegmentBuilder::default()));
        registry.register(DataType::Transport, Box::new(SegmentBuilder::default()));
        registry.register(DataType::Barrier, Box::new(PointBuilder::default()));
        registry.register(DataType::Turns, Box::new(PathBuilder::default()));
        for limit in [DataType::Speed, DataType::Weight, DataType::Height, DataType::Width, DataType::Length] {
            registry.register(limit, Box::new(LimitBuilder));
        }
        registry.register(DataType::Property, Box::new(SegmentBuilder::default()));
        registry.register(DataType::Errorlogs, Box::new(PointBuilder::default()));

        registry
    }
}
