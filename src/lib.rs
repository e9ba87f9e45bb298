pub mod config;
pub mod consumer;
pub mod event;
pub mod event_loop;
pub mod journal;
pub mod pointer;
pub mod ring;
pub mod source;
pub mod storage;

pub use config::LoopConfig;
pub use consumer::{CommandBuffer, Dispatcher, KeyTracker, Session};
pub use event::{Event, EventKind, Payload};
pub use event_loop::{EventLoop, LoopError, PassStats};
pub use journal::{Journal, JournalMode};
pub use source::EventSource;
pub use storage::{DirStorage, JournalStorage};
