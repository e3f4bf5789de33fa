// Re-export of the public API surface.
pub use crate::{DEFAULT_MAX_SPEED_KPH, NodeId};

pub use crate::error::{Error, TrackDirectionChange};
pub use crate::inspect::TramTrackGraphInspector;
pub use crate::loading::{CityConfiguration, TramStopPairCheck};
pub use crate::model::{
    DensifiedGraph, GeodeticEdge, NodeType, RawNode, RawTrackGraph, TrackEdge, TrackNode, TramWay,
};
pub use crate::transform::TramTrackGraphTransformer;
