mod error;
mod refresh;
mod types;
mod worker;

pub use error::SchedulerError;
pub use refresh::RefreshScheduler;
pub use types::SelectionResult;
pub use worker::cap_objects;
