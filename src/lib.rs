//! Orbital visibility and pass-prediction engine.
//!
//! Consumes two-line element sets, answers which objects are above an
//! observer's horizon right now, when a given object passes next, and what its
//! orbit looks like in the current Earth-fixed frame.

pub mod catalog;
pub mod config;
pub mod frames;
pub mod predict;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod fixtures;

pub use catalog::{Catalog, CatalogError, RawEntry, TrackedObject};
pub use config::{ConfigError, EngineConfig, Platform};
pub use frames::ObserverLocation;
pub use predict::{
    evaluate, predict_passes, predict_passes_within, sample_path, OrbitPath, Pass, PassSchedule,
    PassSearch, PredictError, Propagator, Sgp4Propagator, VisibilityReport,
};
pub use scheduler::{RefreshScheduler, SchedulerError, SelectionResult};
