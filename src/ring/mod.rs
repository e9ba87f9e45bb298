pub mod buffer;
pub mod push;
pub mod ring_error;

pub use buffer::PushedEvents;
pub use ring_error::*;

pub const MAX_PUSHED_EVENTS: usize = 64;
