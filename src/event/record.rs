use super::{Event, EventError, EventKind, Payload};

pub struct RecordFlags;

impl RecordFlags {
    pub const SECONDARY: u8 = 0x01;
    // Marker only; pushed events themselves are not journaled.
    pub const PUSHED: u8 = 0x02;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRecord {
    pub time: u64,
    pub kind: u8,
    pub flags: u8,
    pub value1: i32,
    pub value2: i32,
    pub payload_len: u32,
}

impl EventRecord {
    pub const SIZE: usize = 24;

    pub fn from_event(event: &Event, flags: u8) -> Self {
        let (value1, value2) = event.kind.values();
        Self {
            time: event.time,
            kind: event.kind.tag(),
            flags,
            value1,
            value2,
            payload_len: event.payload_len() as u32,
        }
    }

    pub fn total_size(&self) -> usize {
        Self::SIZE + self.payload_len as usize
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        buf[0..8].copy_from_slice(&self.time.to_le_bytes());
        buf[8] = self.kind;
        buf[9] = self.flags;
        // 10..12 reserved
        buf[12..16].copy_from_slice(&self.value1.to_le_bytes());
        buf[16..20].copy_from_slice(&self.value2.to_le_bytes());
        buf[20..24].copy_from_slice(&self.payload_len.to_le_bytes());
        buf
    }

    pub fn from_bytes(buf: &[u8; Self::SIZE]) -> Self {
        let u32_at = |i: usize| u32::from_le_bytes([buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]);
        Self {
            time: u64::from_le_bytes([
                buf[0], buf[1], buf[2], buf[3], buf[4], buf[5], buf[6], buf[7],
            ]),
            kind: buf[8],
            flags: buf[9],
            value1: u32_at(12) as i32,
            value2: u32_at(16) as i32,
            payload_len: u32_at(20),
        }
    }

    pub fn into_event(self, payload: Option<Payload>) -> Result<Event, EventError> {
        let actual = payload.as_ref().map_or(0, Payload::len);
        if actual != self.payload_len as usize {
            return Err(EventError::PayloadLengthMismatch {
                declared: self.payload_len,
                actual,
            });
        }

        let (v1, v2) = (self.value1, self.value2);
        let kind = match self.kind {
            EventKind::TAG_NONE => EventKind::None,
            EventKind::TAG_KEY => EventKind::Key { code: v1, down: v2 != 0 },
            EventKind::TAG_CHAR => EventKind::Char { ch: v1 },
            EventKind::TAG_MOUSE_MOVE => EventKind::MouseMove { dx: v1, dy: v2 },
            EventKind::TAG_MOUSE_BUTTON => EventKind::MouseButton {
                button: v1,
                down: v2 != 0,
            },
            EventKind::TAG_JOYSTICK_AXIS => EventKind::JoystickAxis {
                axis: v1,
                value: v2,
            },
            EventKind::TAG_CONSOLE => {
                return match payload {
                    Some(payload) => Ok(Event::new(self.time, EventKind::Console(payload))),
                    None => Err(EventError::MissingPayload),
                };
            }
            other => return Err(EventError::UnknownKind(other)),
        };

        if self.payload_len != 0 {
            return Err(EventError::UnexpectedPayload {
                kind: kind.name(),
                payload_len: self.payload_len,
            });
        }
        Ok(Event::new(self.time, kind))
    }
}
