//! Loading of per-city configuration consumed by the transformation engine.
//!
//! Fetching the raw way/node data and the transit schedule is the job of
//! external collaborators; only their record types ([`crate::model::TramWay`],
//! [`crate::model::RawNode`]) and the city configuration live in this crate.

mod config;

pub use config::{CityConfiguration, TramStopPairCheck};
