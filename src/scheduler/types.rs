use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::{Catalog, TrackedObject};
use crate::frames::ObserverLocation;
use crate::predict::{OrbitPath, PassSchedule, PassSummary};

/// What the visibility refresh is computed from. `generation` changes on
/// every replacement so in-flight work can tell it went stale.
#[derive(Debug, Clone)]
pub(crate) struct Inputs {
    pub catalog: Arc<Catalog>,
    pub observer: ObserverLocation,
    pub generation: u64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Selection {
    pub name: Option<String>,
    pub generation: u64,
}

/// Pass schedule and orbit ring of the selected object, computed together.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionResult {
    pub object: Arc<TrackedObject>,
    pub observer: ObserverLocation,
    pub computed_at: DateTime<Utc>,
    /// `None` when the object could not be propagated at `computed_at`.
    pub schedule: Option<PassSchedule>,
    pub summary: Option<PassSummary>,
    pub path: OrbitPath,
}
