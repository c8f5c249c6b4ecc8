use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::frames::ObserverLocation;

/// One contiguous interval above the elevation threshold, at scan resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pass {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub peak_at: DateTime<Utc>,
    pub max_elevation_deg: f64,
    /// Already above the threshold when the scan began; `start` is the scan start.
    pub truncated_start: bool,
    /// Still above the threshold when the scan stopped; `end` is where it stopped.
    pub truncated_end: bool,
}

impl Pass {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScanOutcome {
    Complete,
    /// Wall-clock budget ran out; nothing after `scanned_until` was examined.
    Partial { scanned_until: DateTime<Utc> },
}

/// Passes of one object over one search window, ordered by start time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassSchedule {
    pub object: String,
    pub observer: ObserverLocation,
    pub search_start: DateTime<Utc>,
    pub search_end: DateTime<Utc>,
    pub step_seconds: i64,
    pub min_elevation_deg: f64,
    pub passes: Vec<Pass>,
    pub outcome: ScanOutcome,
}

impl PassSchedule {
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.outcome == ScanOutcome::Complete
    }

    pub fn next_pass(&self) -> Option<&Pass> {
        self.passes.first()
    }
}
