use std::time::Instant;

use chrono::{DateTime, Duration, Utc};

use crate::catalog::TrackedObject;
use crate::frames::{sidereal_angle, ObserverLocation};
use crate::predict::propagation::{observe, Propagator};
use crate::predict::types::{Pass, PassSchedule, ScanOutcome};
use crate::predict::visibility::DEFAULT_MIN_ELEVATION_DEG;

const DEFAULT_HORIZON_HOURS: i64 = 24;
const DEFAULT_STEP_SECONDS: i64 = 60;

/// Scan parameters. Passes shorter than `step` may fall between samples and
/// go unreported; a pass is reliably found once it lasts about one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassSearch {
    pub horizon: Duration,
    pub step: Duration,
    pub min_elevation_deg: f64,
}

impl Default for PassSearch {
    fn default() -> Self {
        Self {
            horizon: Duration::hours(DEFAULT_HORIZON_HOURS),
            step: Duration::seconds(DEFAULT_STEP_SECONDS),
            min_elevation_deg: DEFAULT_MIN_ELEVATION_DEG,
        }
    }
}

impl PassSearch {
    /// Shortest pass the scan is guaranteed to catch.
    pub fn min_detectable_duration(&self) -> Duration {
        self.effective_step()
    }

    fn effective_step(&self) -> Duration {
        self.step.max(Duration::seconds(1))
    }
}

struct OpenPass {
    start: DateTime<Utc>,
    peak_at: DateTime<Utc>,
    max_elevation_deg: f64,
    truncated_start: bool,
}

impl OpenPass {
    fn close(self, end: DateTime<Utc>, truncated_end: bool) -> Pass {
        Pass {
            start: self.start,
            end,
            peak_at: self.peak_at,
            max_elevation_deg: self.max_elevation_deg,
            truncated_start: self.truncated_start,
            truncated_end,
        }
    }
}

/// Find visibility windows of `object` from `start` over `search.horizon`.
///
/// Returns `None` only when the object cannot be propagated at `start`; no
/// passes in the window is `Some` with an empty schedule. The scan begins in
/// the not-visible state, so an object already up at `start` yields a pass
/// starting at `start` with `truncated_start` set.
pub fn predict_passes<P: Propagator + ?Sized>(
    object: &TrackedObject,
    propagator: &P,
    observer: &ObserverLocation,
    start: DateTime<Utc>,
    search: &PassSearch,
) -> Option<PassSchedule> {
    scan(object, propagator, observer, start, search, None)
}

/// Same as [`predict_passes`], but gives up once `budget` of wall-clock time
/// is spent and returns what was found with [`ScanOutcome::Partial`].
pub fn predict_passes_within<P: Propagator + ?Sized>(
    object: &TrackedObject,
    propagator: &P,
    observer: &ObserverLocation,
    start: DateTime<Utc>,
    search: &PassSearch,
    budget: std::time::Duration,
) -> Option<PassSchedule> {
    let deadline = Instant::now().checked_add(budget);
    scan(object, propagator, observer, start, search, deadline)
}

fn scan<P: Propagator + ?Sized>(
    object: &TrackedObject,
    propagator: &P,
    observer: &ObserverLocation,
    start: DateTime<Utc>,
    search: &PassSearch,
    deadline: Option<Instant>,
) -> Option<PassSchedule> {
    if let Err(e) = observe(propagator, object, observer, start, sidereal_angle(start)) {
        log::debug!("No pass data for {}: {}", object.name(), e);
        return None;
    }

    // Horizons past the last representable instant stop there.
    let end = start
        .checked_add_signed(search.horizon)
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    let step = search.effective_step();
    let mut passes = Vec::new();
    let mut open: Option<OpenPass> = None;
    let mut outcome = ScanOutcome::Complete;
    let mut cursor = start;

    while cursor < end {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            outcome = ScanOutcome::Partial {
                scanned_until: cursor,
            };
            break;
        }

        let elevation = match observe(propagator, object, observer, cursor, sidereal_angle(cursor))
        {
            Ok(obs) => Some(obs.look.elevation_deg),
            Err(e) => {
                log::trace!("{} skipped at {}: {}", object.name(), cursor, e);
                None
            }
        };

        if let Some(elevation) = elevation.filter(|e| *e > search.min_elevation_deg) {
            match open.as_mut() {
                Some(pass) => {
                    if elevation > pass.max_elevation_deg {
                        pass.max_elevation_deg = elevation;
                        pass.peak_at = cursor;
                    }
                }
                None => {
                    open = Some(OpenPass {
                        start: cursor,
                        peak_at: cursor,
                        max_elevation_deg: elevation,
                        truncated_start: cursor == start,
                    });
                }
            }
        } else if elevation.is_some() {
            if let Some(pass) = open.take() {
                passes.push(pass.close(cursor, false));
            }
        }

        match cursor.checked_add_signed(step) {
            Some(next) => cursor = next,
            None => break,
        }
    }

    if let Some(pass) = open.take() {
        let stop = match outcome {
            ScanOutcome::Complete => end,
            ScanOutcome::Partial { scanned_until } => scanned_until,
        };
        passes.push(pass.close(stop, true));
    }

    log::debug!(
        "{}: {} passes between {} and {} ({:?})",
        object.name(),
        passes.len(),
        start,
        end,
        outcome
    );

    Some(PassSchedule {
        object: object.name().to_string(),
        observer: *observer,
        search_start: start,
        search_end: end,
        step_seconds: step.num_seconds(),
        min_elevation_deg: search.min_elevation_deg,
        passes,
        outcome,
    })
}
