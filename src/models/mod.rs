mod data_type;
mod feature;
mod map_props;
mod style;
mod view;

pub use data_type::{DataSelection, DataType};
pub use feature::{BoundingBox, StyledFeature};
pub use map_props::{Attribution, MapProps, TileLayerProps};
pub use style::{direction_color, Icon, Stroke, Style, HIGHLIGHT_COLOR};
pub use view::{ViewArgs, ViewState};
