use crate::event::Event;
pub mod dispatcher;

pub use dispatcher::{DispatchStats, Dispatcher, Route};

pub trait CommandBuffer {
    fn append_command_text(&mut self, text: &str);

    fn execute_buffered(&mut self);
}

pub trait Session {
    fn handle_event(&mut self, event: &Event);
}

pub trait KeyTracker {
    fn key_event(&mut self, code: i32, down: bool);
}
