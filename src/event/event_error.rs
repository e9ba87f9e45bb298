use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("payload must not be empty")]
    EmptyPayload,
    #[error("payload too large: {payload_len} bytes exceeds maximum of {max_len} bytes")]
    PayloadTooLarge { payload_len: usize, max_len: usize },
    #[error("unknown event kind tag {0}")]
    UnknownKind(u8),
    #[error("{kind} record carries {payload_len} payload bytes")]
    UnexpectedPayload { kind: &'static str, payload_len: u32 },
    #[error("console record has no payload")]
    MissingPayload,
    #[error("record declares {declared} payload bytes but {actual} were supplied")]
    PayloadLengthMismatch { declared: u32, actual: usize },
}
