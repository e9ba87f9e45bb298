use thiserror::Error;

#[derive(Debug, Error)]
pub enum RingError {
    #[error("Invalid capacity {capacity}: {reason}")]
    InvalidCapacity {
        capacity: usize,
        reason: &'static str,
    },
}
