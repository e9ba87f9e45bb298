pub mod journal_error;
pub mod mode;

pub use journal_error::{JournalError, StreamKind};
pub use mode::JournalMode;

use crate::event::{Event, EventError, EventKind, EventRecord, Payload, RecordFlags};
use crate::storage::{DATA_FILE, EVENTS_FILE, JournalStorage, JournalStream};

/// Records the events crossing the platform boundary, or plays them back.
///
/// Two streams: fixed-size [`EventRecord`]s, and the payload bytes those
/// records reference, back to back in the same order. The mode is settled
/// when the journal is opened and never changes afterwards.
pub struct Journal {
    mode: JournalMode,
    events: Option<Box<dyn JournalStream>>,
    data: Option<Box<dyn JournalStream>>,
    lookahead: Option<(Event, u8)>,
    records: u64,
}

impl Journal {
    pub fn off() -> Self {
        Self {
            mode: JournalMode::Off,
            events: None,
            data: None,
            lookahead: None,
            records: 0,
        }
    }

    pub fn open(mode: JournalMode, storage: &dyn JournalStorage) -> Self {
        let opened = match mode {
            JournalMode::Off => return Self::off(),
            JournalMode::Record => {
                log::info!("Journaling events");
                storage
                    .open_write(EVENTS_FILE)
                    .and_then(|events| Ok((events, storage.open_write(DATA_FILE)?)))
            }
            JournalMode::Playback => {
                log::info!("Replaying journaled events");
                storage
                    .open_read(EVENTS_FILE)
                    .and_then(|events| Ok((events, storage.open_read(DATA_FILE)?)))
            }
        };

        match opened {
            Ok((events, data)) => Self {
                mode,
                events: Some(events),
                data: Some(data),
                lookahead: None,
                records: 0,
            },
            Err(e) => {
                log::warn!("Couldn't open journal files ({}), journaling disabled", e);
                Self::off()
            }
        }
    }

    #[inline]
    pub fn mode(&self) -> JournalMode {
        self.mode
    }

    #[inline]
    pub fn is_recording(&self) -> bool {
        self.mode == JournalMode::Record
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.mode == JournalMode::Playback
    }

    #[inline]
    pub fn record_count(&self) -> u64 {
        self.records
    }

    pub fn record(&mut self, event: &Event, secondary: bool) -> Result<(), JournalError> {
        let flags = if secondary { RecordFlags::SECONDARY } else { 0 };
        let record = EventRecord::from_event(event, flags);

        write_all(&mut self.events, StreamKind::Events, &record.to_bytes())?;
        if let Some(payload) = event.payload() {
            write_all(&mut self.data, StreamKind::Data, payload.as_bytes())?;
        }

        self.records += 1;
        Ok(())
    }

    /// Marks where a pushed event was dispatched. Pushed events are not
    /// journaled themselves, but the secondaries that follow them are, and
    /// the marker keeps those apart from the preceding primary's batch.
    pub fn record_pushed(&mut self, time: u64) -> Result<(), JournalError> {
        let record = EventRecord {
            time,
            kind: EventKind::TAG_NONE,
            flags: RecordFlags::PUSHED,
            value1: 0,
            value2: 0,
            payload_len: 0,
        };
        write_all(&mut self.events, StreamKind::Events, &record.to_bytes())?;
        self.records += 1;
        Ok(())
    }

    pub fn next_primary(&mut self) -> Result<Event, JournalError> {
        let (event, flags) = match self.lookahead.take() {
            Some(entry) => entry,
            None => self.read_entry()?,
        };
        if flags & RecordFlags::SECONDARY != 0 {
            return Err(JournalError::OrphanSecondary);
        }
        if flags & RecordFlags::PUSHED != 0 {
            return Err(JournalError::UnexpectedPushed);
        }
        Ok(event)
    }

    pub fn next_pushed(&mut self) -> Result<(), JournalError> {
        let (_, flags) = match self.lookahead.take() {
            Some(entry) => entry,
            None => self.read_entry()?,
        };
        if flags & RecordFlags::PUSHED == 0 {
            return Err(JournalError::MissingPushed);
        }
        Ok(())
    }

    pub fn next_secondary(&mut self) -> Result<Option<Event>, JournalError> {
        if self.lookahead.is_some() {
            return Ok(None);
        }
        let (event, flags) = self.read_entry()?;
        if flags & RecordFlags::SECONDARY != 0 {
            Ok(Some(event))
        } else {
            self.lookahead = Some((event, flags));
            Ok(None)
        }
    }

    fn read_entry(&mut self) -> Result<(Event, u8), JournalError> {
        let mut buf = [0u8; EventRecord::SIZE];
        read_exact(&mut self.events, StreamKind::Events, &mut buf)?;
        let record = EventRecord::from_bytes(&buf);

        let payload = match record.payload_len as usize {
            0 => None,
            len if len > Payload::MAX_LEN => {
                return Err(EventError::PayloadTooLarge {
                    payload_len: len,
                    max_len: Payload::MAX_LEN,
                }
                .into());
            }
            len => {
                let mut bytes = vec![0u8; len].into_boxed_slice();
                read_exact(&mut self.data, StreamKind::Data, &mut bytes)?;
                Some(Payload::from_boxed(bytes)?)
            }
        };

        let flags = record.flags;
        let event = record.into_event(payload)?;
        self.records += 1;
        Ok((event, flags))
    }

    pub fn close(&mut self) {
        for (stream, kind) in [
            (self.events.take(), StreamKind::Events),
            (self.data.take(), StreamKind::Data),
        ] {
            if let Some(mut stream) = stream {
                if let Err(e) = stream.close() {
                    log::error!("failed to close journal {} stream: {}", kind, e);
                }
            }
        }
        self.lookahead = None;
    }
}

impl Drop for Journal {
    fn drop(&mut self) {
        self.close();
    }
}

fn write_all(
    stream: &mut Option<Box<dyn JournalStream>>,
    kind: StreamKind,
    buf: &[u8],
) -> Result<(), JournalError> {
    let stream = stream.as_mut().ok_or(JournalError::NotOpen)?;
    let written = stream
        .write(buf)
        .map_err(|source| JournalError::Io { stream: kind, source })?;
    if written != buf.len() {
        return Err(JournalError::ShortWrite {
            stream: kind,
            expected: buf.len(),
            written,
        });
    }
    Ok(())
}

fn read_exact(
    stream: &mut Option<Box<dyn JournalStream>>,
    kind: StreamKind,
    buf: &mut [u8],
) -> Result<(), JournalError> {
    let stream = stream.as_mut().ok_or(JournalError::NotOpen)?;
    let got = stream
        .read(buf)
        .map_err(|source| JournalError::Io { stream: kind, source })?;
    if got != buf.len() {
        return Err(JournalError::ShortRead {
            stream: kind,
            expected: buf.len(),
            got,
        });
    }
    Ok(())
}
