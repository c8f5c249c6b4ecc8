use thiserror::Error;

use crate::frames::FrameError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    #[error("propagation invalid: {0}")]
    PropagationInvalid(String),
    #[error("invalid position: {0}")]
    InvalidPosition(#[from] FrameError),
}
