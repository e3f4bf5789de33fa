//! Data model for the tram track graph.
//!
//! Contains the node/edge value types, the raw input records handed over by
//! the data-source collaborator, and the graph wrappers produced by the
//! transformation pipeline.

mod graph;
mod node;
mod way;

pub use graph::{DensifiedGraph, GeodeticEdge, RawTrackGraph, TrackEdge};
pub use node::{NodeType, TrackNode};
pub use way::{RawNode, TramWay};
