use super::LoopState;
use crate::journal::JournalError;
use crate::ring::RingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoopError {
    #[error("fatal journal error: {0}")]
    Journal(#[from] JournalError),
    #[error(transparent)]
    Ring(#[from] RingError),
    #[error("cannot {operation} an event loop that is {state}")]
    InvalidState {
        state: LoopState,
        operation: &'static str,
    },
}
