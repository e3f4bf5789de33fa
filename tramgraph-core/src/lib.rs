//! Core engine turning raw tram-infrastructure survey data into a routable,
//! geometry-accurate directed graph.
//!
//! The pipeline starts from raw way/node records (as exported from a
//! collaborative mapping database), builds a directed track graph, classifies
//! the nodes that must survive simplification (stops, switches, endpoints,
//! speed-change points), collapses unambiguous chains between them into a
//! skeleton, and finally re-expands every skeleton edge into evenly spaced
//! nodes bounded by a caller-supplied maximum segment length. The resulting
//! graph carries ellipsoidal azimuth and distance on every edge and can be
//! queried through [`inspect::TramTrackGraphInspector`] for shortest paths
//! and path plausibility.
//!
//! All I/O happens in external collaborators; this crate is synchronous and
//! allocation-only. Densification calls with different segment lengths share
//! no mutable state and may run in parallel.

mod error;
mod geometry;

pub mod inspect;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod transform;

pub use error::{Error, TrackDirectionChange};

/// Identifier of a graph node, matching the source database's node id space.
pub type NodeId = i64;

/// Speed assumed for ways without a parseable `maxspeed` tag, in km/h.
pub const DEFAULT_MAX_SPEED_KPH: f64 = 50.0;
