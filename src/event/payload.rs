use super::EventError;
use std::fmt;
use std::ops::Deref;

/// Variable-length event data. Never empty.
///
/// The buffer is released when the payload is dropped, which happens exactly
/// once on whichever path gives the owning event up: ring eviction, the end
/// of dispatch, or unwinding out of a failed pass.
#[derive(PartialEq, Eq)]
pub struct Payload {
    bytes: Box<[u8]>,
}

impl Payload {
    /// Checked before a replayed record's buffer is allocated.
    pub const MAX_LEN: usize = 1 << 20;

    pub fn new(bytes: &[u8]) -> Result<Self, EventError> {
        Self::from_boxed(bytes.into())
    }

    pub fn from_boxed(bytes: Box<[u8]>) -> Result<Self, EventError> {
        if bytes.is_empty() {
            return Err(EventError::EmptyPayload);
        }
        if bytes.len() > Self::MAX_LEN {
            return Err(EventError::PayloadTooLarge {
                payload_len: bytes.len(),
                max_len: Self::MAX_LEN,
            });
        }
        tracking::allocated();
        Ok(Self { bytes })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Payload bytes as console text: lossy UTF-8 with trailing NULs removed.
    pub fn to_text(&self) -> String {
        let end = self
            .bytes
            .iter()
            .rposition(|&b| b != 0)
            .map_or(0, |i| i + 1);
        String::from_utf8_lossy(&self.bytes[..end]).into_owned()
    }
}

impl Clone for Payload {
    fn clone(&self) -> Self {
        tracking::allocated();
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl Drop for Payload {
    fn drop(&mut self) {
        tracking::released();
    }
}

impl Deref for Payload {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payload")
            .field("len", &self.bytes.len())
            .field("text", &String::from_utf8_lossy(&self.bytes))
            .finish()
    }
}


#[cfg(not(test))]
mod tracking {
    #[inline(always)]
    pub(crate) fn allocated() {}

    #[inline(always)]
    pub(crate) fn released() {}
}
