use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("scheduler already running")]
    AlreadyRunning,
    #[error("evaluation task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
