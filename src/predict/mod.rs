mod error;
mod format;
mod orbit_path;
mod pass_finder;
mod propagation;
mod types;
mod visibility;

pub use error::PredictError;
pub use format::{format_duration, summarize, PassSummary};
pub use orbit_path::{sample_path, OrbitPath, PathPoint, PathSampling};
pub use pass_finder::{predict_passes, predict_passes_within, PassSearch};
pub use propagation::{InertialPosition, Propagator, Sgp4Propagator};
pub use types::{Pass, PassSchedule, ScanOutcome};
pub use visibility::{evaluate, VisibilityReport, VisibleObject, DEFAULT_MIN_ELEVATION_DEG};

#[cfg(test)]
pub(crate) use propagation::stub;
