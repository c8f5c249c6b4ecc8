use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{oneshot, watch};
use tokio::time::MissedTickBehavior;

use super::error::SchedulerError;
use super::types::{Inputs, Selection, SelectionResult};
use crate::catalog::TrackedObject;
use crate::config::EngineConfig;
use crate::predict::{
    evaluate, predict_passes_within, sample_path, summarize, Propagator, VisibilityReport,
};

const MIN_REFRESH_INTERVAL: std::time::Duration = std::time::Duration::from_millis(1);

/// The slice of the catalog a refresh tick looks at.
pub fn cap_objects(objects: &[Arc<TrackedObject>], max: Option<usize>) -> &[Arc<TrackedObject>] {
    match max {
        Some(max) if max < objects.len() => &objects[..max],
        _ => objects,
    }
}

/// A computation that panicked is skipped so the loop keeps serving.
/// Any other join failure ends the loop.
fn survive_panic<T>(
    joined: Result<T, tokio::task::JoinError>,
    what: &str,
) -> Result<Option<T>, SchedulerError> {
    match joined {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_panic() => {
            log::warn!("Computation for {} panicked, skipping: {}", what, e);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

pub(crate) async fn run_visibility_loop<P: Propagator + 'static>(
    propagator: Arc<P>,
    config: EngineConfig,
    mut inputs_rx: watch::Receiver<Inputs>,
    report_tx: Arc<watch::Sender<Arc<VisibilityReport>>>,
    mut stop_rx: oneshot::Receiver<()>,
) -> Result<(), SchedulerError> {
    let mut ticker = tokio::time::interval(config.refresh_interval().max(MIN_REFRESH_INTERVAL));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let max_objects = config.max_tracked_objects();
    let min_elevation = config.min_elevation_deg();

    loop {
        let should_stop = tokio::select! {
            _ = &mut stop_rx => true,
            _ = ticker.tick() => false,
            changed = inputs_rx.changed() => changed.is_err(),
        };
        if should_stop {
            break;
        }

        let inputs = inputs_rx.borrow_and_update().clone();
        let propagator = Arc::clone(&propagator);
        let catalog = Arc::clone(&inputs.catalog);
        let observer = inputs.observer;
        let report = tokio::task::spawn_blocking(move || {
            let objects = cap_objects(catalog.objects(), max_objects);
            evaluate(objects, propagator.as_ref(), &observer, Utc::now(), min_elevation)
        })
        .await;
        let Some(report) = survive_panic(report, "visibility refresh")? else {
            continue;
        };

        if inputs_rx.borrow().generation != inputs.generation {
            log::debug!(
                "Discarding visibility report for stale inputs (generation {})",
                inputs.generation
            );
            continue;
        }
        report_tx.send_replace(Arc::new(report));
    }

    log::info!("Visibility refresh stopped");
    Ok(())
}

pub(crate) async fn run_selection_loop<P: Propagator + 'static>(
    propagator: Arc<P>,
    config: EngineConfig,
    mut inputs_rx: watch::Receiver<Inputs>,
    mut selection_rx: watch::Receiver<Selection>,
    result_tx: Arc<watch::Sender<Option<Arc<SelectionResult>>>>,
    mut stop_rx: oneshot::Receiver<()>,
) -> Result<(), SchedulerError> {
    let search = config.pass_search();
    let budget = config.pass_budget();
    let sampling = config.path_sampling();
    // Pick up a selection made before the loop started.
    let mut pending = selection_rx.borrow().name.is_some();

    loop {
        if !pending {
            let should_stop = tokio::select! {
                _ = &mut stop_rx => true,
                changed = selection_rx.changed() => changed.is_err(),
                changed = inputs_rx.changed() => changed.is_err(),
            };
            if should_stop {
                break;
            }
        }
        pending = false;

        let selection = selection_rx.borrow_and_update().clone();
        let inputs = inputs_rx.borrow_and_update().clone();

        let Some(name) = selection.name else {
            result_tx.send_replace(None);
            continue;
        };
        let Some(object) = inputs.catalog.get(&name).cloned() else {
            log::warn!("Selected object {} is not in the catalog", name);
            result_tx.send_replace(None);
            continue;
        };

        let propagator = Arc::clone(&propagator);
        let observer = inputs.observer;
        let result = tokio::task::spawn_blocking(move || {
            let now = Utc::now();
            let schedule = predict_passes_within(
                &object,
                propagator.as_ref(),
                &observer,
                now,
                &search,
                budget,
            );
            let path = sample_path(&object, propagator.as_ref(), now, &sampling);
            SelectionResult {
                summary: schedule.as_ref().and_then(summarize),
                object,
                observer,
                computed_at: now,
                schedule,
                path,
            }
        })
        .await;
        let Some(result) = survive_panic(result, &name)? else {
            continue;
        };

        if selection_rx.borrow().generation != selection.generation
            || inputs_rx.borrow().generation != inputs.generation
        {
            log::debug!("Discarding pass data for {}: selection or inputs changed", name);
            continue;
        }
        if result.schedule.as_ref().is_some_and(|s| !s.is_complete()) {
            log::warn!("Pass search for {} ran out of time, schedule is partial", name);
        }
        result_tx.send_replace(Some(Arc::new(result)));
    }

    log::info!("Selection worker stopped");
    Ok(())
}
