use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameError {
    #[error("degenerate position vector [{0}, {1}, {2}]")]
    InvalidPosition(f64, f64, f64),
}

impl FrameError {
    pub(crate) fn invalid(pos: [f64; 3]) -> Self {
        FrameError::InvalidPosition(pos[0], pos[1], pos[2])
    }
}
