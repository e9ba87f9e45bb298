use crate::event::EventError;
use std::io;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Events,
    Data,
}

impl std::fmt::Display for StreamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Events => "event",
            Self::Data => "payload",
        })
    }
}

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("Error reading from journal {stream} stream: expected {expected} bytes, got {got}")]
    ShortRead {
        stream: StreamKind,
        expected: usize,
        got: usize,
    },
    #[error("Error writing to journal {stream} stream: expected {expected} bytes, wrote {written}")]
    ShortWrite {
        stream: StreamKind,
        expected: usize,
        written: usize,
    },
    #[error("I/O error on journal {stream} stream: {source}")]
    Io {
        stream: StreamKind,
        #[source]
        source: io::Error,
    },
    #[error("corrupt journal record: {0}")]
    Corrupt(#[from] EventError),
    #[error("secondary journal record without a preceding primary event")]
    OrphanSecondary,
    #[error("journal has a pushed event here but none was pushed on replay")]
    UnexpectedPushed,
    #[error("pushed event on replay has no matching journal marker")]
    MissingPushed,
    #[error("journal stream is not open")]
    NotOpen,
    #[error("invalid journal mode {0:?}, expected off/record/playback or 0/1/2")]
    InvalidMode(String),
}

impl JournalError {
    pub fn is_clean_end(&self) -> bool {
        matches!(
            self,
            Self::ShortRead {
                stream: StreamKind::Events,
                got: 0,
                ..
            }
        )
    }
}
