pub mod event_error;
pub mod payload;
pub mod record;

pub use event_error::EventError;
pub use payload::Payload;
pub use record::{EventRecord, RecordFlags};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    None,
    Key { code: i32, down: bool },
    Char { ch: i32 },
    MouseMove { dx: i32, dy: i32 },
    MouseButton { button: i32, down: bool },
    JoystickAxis { axis: i32, value: i32 },
    Console(Payload),
}

impl EventKind {
    pub const TAG_NONE: u8 = 0;
    pub const TAG_KEY: u8 = 1;
    pub const TAG_CHAR: u8 = 2;
    pub const TAG_MOUSE_MOVE: u8 = 3;
    pub const TAG_MOUSE_BUTTON: u8 = 4;
    pub const TAG_JOYSTICK_AXIS: u8 = 5;
    pub const TAG_CONSOLE: u8 = 6;

    #[inline]
    pub fn tag(&self) -> u8 {
        match self {
            Self::None => Self::TAG_NONE,
            Self::Key { .. } => Self::TAG_KEY,
            Self::Char { .. } => Self::TAG_CHAR,
            Self::MouseMove { .. } => Self::TAG_MOUSE_MOVE,
            Self::MouseButton { .. } => Self::TAG_MOUSE_BUTTON,
            Self::JoystickAxis { .. } => Self::TAG_JOYSTICK_AXIS,
            Self::Console(_) => Self::TAG_CONSOLE,
        }
    }

    #[inline]
    pub fn values(&self) -> (i32, i32) {
        match *self {
            Self::None | Self::Console(_) => (0, 0),
            Self::Key { code, down } => (code, down as i32),
            Self::Char { ch } => (ch, 0),
            Self::MouseMove { dx, dy } => (dx, dy),
            Self::MouseButton { button, down } => (button, down as i32),
            Self::JoystickAxis { axis, value } => (axis, value),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Key { .. } => "key",
            Self::Char { .. } => "char",
            Self::MouseMove { .. } => "mouse-move",
            Self::MouseButton { .. } => "mouse-button",
            Self::JoystickAxis { .. } => "joystick-axis",
            Self::Console(_) => "console",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub time: u64,
    pub kind: EventKind,
}

impl Event {
    pub fn new(time: u64, kind: EventKind) -> Self {
        Self { time, kind }
    }

    pub fn none(time: u64) -> Self {
        Self::new(time, EventKind::None)
    }

    pub fn key(time: u64, code: i32, down: bool) -> Self {
        Self::new(time, EventKind::Key { code, down })
    }

    pub fn char(time: u64, ch: i32) -> Self {
        Self::new(time, EventKind::Char { ch })
    }

    pub fn mouse_move(time: u64, dx: i32, dy: i32) -> Self {
        Self::new(time, EventKind::MouseMove { dx, dy })
    }

    pub fn mouse_button(time: u64, button: i32, down: bool) -> Self {
        Self::new(time, EventKind::MouseButton { button, down })
    }

    pub fn joystick_axis(time: u64, axis: i32, value: i32) -> Self {
        Self::new(time, EventKind::JoystickAxis { axis, value })
    }

    pub fn console(time: u64, text: &str) -> Result<Self, EventError> {
        let payload = Payload::new(text.as_bytes())?;
        Ok(Self::new(time, EventKind::Console(payload)))
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self.kind, EventKind::None)
    }

    #[inline]
    pub fn payload(&self) -> Option<&Payload> {
        match &self.kind {
            EventKind::Console(payload) => Some(payload),
            _ => None,
        }
    }

    #[inline]
    pub fn payload_len(&self) -> usize {
        self.payload().map_or(0, Payload::len)
    }
}
