use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

use super::error::SchedulerError;
use super::types::{Inputs, Selection, SelectionResult};
use super::worker::{run_selection_loop, run_visibility_loop};
use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::frames::ObserverLocation;
use crate::predict::{Propagator, VisibilityReport};

#[derive(Debug)]
struct WorkerHandle {
    stop_tx: oneshot::Sender<()>,
    join: JoinHandle<Result<(), SchedulerError>>,
}

impl WorkerHandle {
    async fn stop(self) {
        let _ = self.stop_tx.send(());
        match self.join.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => log::warn!("Worker exited with error: {}", e),
            Err(e) => log::warn!("Failed to join worker: {}", e),
        }
    }
}

/// Keeps the visibility report fresh on a fixed cadence and computes pass
/// data for the selected object when the selection or inputs change.
///
/// Results are published by replacing a whole `Arc`, so a reader holds
/// either the previous value or the new one.
pub struct RefreshScheduler<P: Propagator + 'static> {
    propagator: Arc<P>,
    config: EngineConfig,
    inputs_tx: watch::Sender<Inputs>,
    selection_tx: watch::Sender<Selection>,
    report_tx: Arc<watch::Sender<Arc<VisibilityReport>>>,
    result_tx: Arc<watch::Sender<Option<Arc<SelectionResult>>>>,
    workers: Vec<WorkerHandle>,
}

impl<P: Propagator + 'static> RefreshScheduler<P> {
    pub fn new(propagator: P, config: EngineConfig, catalog: Catalog) -> Self {
        let observer = config.observer();
        let (inputs_tx, _) = watch::channel(Inputs {
            catalog: Arc::new(catalog),
            observer,
            generation: 0,
        });
        let (selection_tx, _) = watch::channel(Selection::default());
        let (report_tx, _) = watch::channel(Arc::new(VisibilityReport::empty(
            Utc::now(),
            observer,
            config.min_elevation_deg(),
        )));
        let (result_tx, _) = watch::channel(None);

        Self {
            propagator: Arc::new(propagator),
            config,
            inputs_tx,
            selection_tx,
            report_tx: Arc::new(report_tx),
            result_tx: Arc::new(result_tx),
            workers: Vec::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        !self.workers.is_empty()
    }

    /// Spawns the refresh and selection workers on the current runtime.
    pub fn start(&mut self) -> Result<(), SchedulerError> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }

        let (stop_tx, stop_rx) = oneshot::channel();
        let join = tokio::spawn(run_visibility_loop(
            Arc::clone(&self.propagator),
            self.config.clone(),
            self.inputs_tx.subscribe(),
            Arc::clone(&self.report_tx),
            stop_rx,
        ));
        self.workers.push(WorkerHandle { stop_tx, join });

        let (stop_tx, stop_rx) = oneshot::channel();
        let join = tokio::spawn(run_selection_loop(
            Arc::clone(&self.propagator),
            self.config.clone(),
            self.inputs_tx.subscribe(),
            self.selection_tx.subscribe(),
            Arc::clone(&self.result_tx),
            stop_rx,
        ));
        self.workers.push(WorkerHandle { stop_tx, join });

        log::info!(
            "Refresh started: every {:?}, tracking {} of {} objects",
            self.config.refresh_interval(),
            self.config
                .max_tracked_objects()
                .map_or(self.catalog().len(), |max| max.min(self.catalog().len())),
            self.catalog().len()
        );
        Ok(())
    }

    pub async fn stop(&mut self) {
        for worker in self.workers.drain(..) {
            worker.stop().await;
        }
    }

    /// Swap in a new catalog. Work in flight against the old one is dropped.
    pub fn set_catalog(&self, catalog: Catalog) {
        let catalog = Arc::new(catalog);
        self.inputs_tx.send_modify(|inputs| {
            inputs.catalog = catalog;
            inputs.generation += 1;
        });
    }

    /// Move the observer. Work in flight for the old location is dropped.
    pub fn set_observer(&self, observer: ObserverLocation) {
        self.inputs_tx.send_modify(|inputs| {
            inputs.observer = observer;
            inputs.generation += 1;
        });
    }

    /// Choose the object to compute passes and the orbit ring for, or clear it.
    pub fn select(&self, name: Option<&str>) {
        let name = name.map(|n| n.trim().to_string());
        self.selection_tx.send_modify(|selection| {
            selection.name = name;
            selection.generation += 1;
        });
    }

    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.inputs_tx.borrow().catalog)
    }

    pub fn observer(&self) -> ObserverLocation {
        self.inputs_tx.borrow().observer
    }

    pub fn selected(&self) -> Option<String> {
        self.selection_tx.borrow().name.clone()
    }

    pub fn latest_report(&self) -> Arc<VisibilityReport> {
        self.report_tx.borrow().clone()
    }

    pub fn latest_selection(&self) -> Option<Arc<SelectionResult>> {
        self.result_tx.borrow().clone()
    }

    pub fn subscribe_reports(&self) -> watch::Receiver<Arc<VisibilityReport>> {
        self.report_tx.subscribe()
    }

    pub fn subscribe_selection(&self) -> watch::Receiver<Option<Arc<SelectionResult>>> {
        self.result_tx.subscribe()
    }
}
