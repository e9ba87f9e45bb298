pub mod loop_error;
pub mod state;

pub use loop_error::LoopError;
pub use state::{LoopState, PassStats};

use crate::config::LoopConfig;
use crate::consumer::Dispatcher;
use crate::event::{Event, EventKind};
use crate::journal::{Journal, JournalError, JournalMode};
use crate::pointer::{AxisState, PointerConfig};
use crate::ring::PushedEvents;
use crate::source::{EventSource, SecondaryBatch};
use crate::storage::JournalStorage;
use std::time::Instant;

pub struct EventLoop<S: EventSource> {
    source: S,
    dispatcher: Dispatcher,
    pushed: PushedEvents,
    journal: Journal,
    journal_mode: JournalMode,
    pointer: PointerConfig,
    axes: AxisState,
    last_time: u64,
    state: LoopState,
    started: Instant,
}

impl<S: EventSource> EventLoop<S> {
    pub fn new(config: &LoopConfig, source: S, dispatcher: Dispatcher) -> Result<Self, LoopError> {
        Ok(Self {
            source,
            dispatcher,
            pushed: PushedEvents::new(config.pushed_capacity)?,
            journal: Journal::off(),
            journal_mode: config.journal,
            pointer: config.pointer,
            axes: AxisState::default(),
            last_time: 0,
            state: LoopState::Constructed,
            started: Instant::now(),
        })
    }

    pub fn init(&mut self, storage: &dyn JournalStorage) -> Result<(), LoopError> {
        self.expect_state(LoopState::Constructed, "initialise")?;

        self.started = Instant::now();
        self.journal = Journal::open(self.journal_mode, storage);
        self.journal_mode = self.journal.mode();
        self.state = LoopState::Running;

        log::debug!("event loop initialised, journal {}", self.journal_mode);
        Ok(())
    }

    /// Dispatches every event available right now and returns once the
    /// source reports nothing pending.
    ///
    /// With `command_execution` set, buffered commands run before each fetch.
    /// A journal error faults the loop; the run cannot continue after it.
    pub fn run_pass(&mut self, command_execution: bool) -> Result<PassStats, LoopError> {
        self.expect_state(LoopState::Running, "run")?;

        match self.pass(command_execution) {
            Ok(stats) => Ok(stats),
            Err(e) => {
                log::error!("{}", e);
                self.state = LoopState::Faulted;
                self.pushed.clear();
                Err(e.into())
            }
        }
    }

    fn pass(&mut self, command_execution: bool) -> Result<PassStats, JournalError> {
        let mut stats = PassStats::default();

        if let Some(pointer) = self.axes.synthesize(self.last_time, &self.pointer) {
            self.dispatcher.dispatch(&pointer);
            stats.synthesized += 1;
        }

        loop {
            if command_execution {
                self.dispatcher.execute_commands();
            }

            let event = match self.pushed.pop() {
                Some(event) => {
                    self.journal_pushed(&event)?;
                    stats.pushed += 1;
                    event
                }
                None => self.real_event()?,
            };

            if event.is_none() {
                return Ok(stats);
            }

            self.last_time = event.time;
            self.dispatcher.dispatch(&event);
            stats.primary += 1;

            if let EventKind::JoystickAxis { axis, value } = event.kind {
                self.axes.observe(axis, value, &self.pointer);
            }

            stats.secondary += self.drain_secondary()?;

            // Payload released here, after the secondary batch.
            drop(event);
        }
    }

    fn journal_pushed(&mut self, event: &Event) -> Result<(), JournalError> {
        if self.journal.is_recording() {
            self.journal.record_pushed(event.time)
        } else if self.journal.is_playing() {
            self.journal.next_pushed()
        } else {
            Ok(())
        }
    }

    fn real_event(&mut self) -> Result<Event, JournalError> {
        if self.journal.is_playing() {
            return self.journal.next_primary();
        }

        let event = self.source.poll_event();
        if self.journal.is_recording() {
            self.journal.record(&event, false)?;
        }
        Ok(event)
    }

    fn drain_secondary(&mut self) -> Result<u64, JournalError> {
        let mut drained = 0;

        if self.journal.is_playing() {
            while let Some(event) = self.journal.next_secondary()? {
                self.dispatcher.dispatch(&event);
                drained += 1;
            }
            return Ok(drained);
        }

        let recording = self.journal.is_recording();
        for event in SecondaryBatch::begin(&mut self.source) {
            if event.is_none() {
                log::warn!("ignoring empty secondary event (t={})", event.time);
                continue;
            }
            if recording {
                self.journal.record(&event, true)?;
            }
            self.dispatcher.dispatch(&event);
            drained += 1;
        }
        Ok(drained)
    }

    pub fn push_event(&mut self, event: Event) {
        if event.is_none() {
            log::debug!("ignoring pushed empty event (t={})", event.time);
            return;
        }
        self.pushed.push(event);
    }

    pub fn shutdown(&mut self) {
        if self.state == LoopState::ShutDown {
            return;
        }
        self.journal.close();
        self.pushed.clear();
        self.state = LoopState::ShutDown;
        log::debug!("event loop shut down");
    }

    pub fn milliseconds(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    #[inline]
    pub fn journal_mode(&self) -> JournalMode {
        self.journal_mode
    }

    #[inline]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[inline]
    pub fn axis_state(&self) -> AxisState {
        self.axes
    }

    #[inline]
    pub fn pushed(&self) -> &PushedEvents {
        &self.pushed
    }

    #[inline]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    #[inline]
    pub fn source(&self) -> &S {
        &self.source
    }

    fn expect_state(&self, expected: LoopState, operation: &'static str) -> Result<(), LoopError> {
        if self.state != expected {
            return Err(LoopError::InvalidState {
                state: self.state,
                operation,
            });
        }
        Ok(())
    }
}

impl<S: EventSource> Drop for EventLoop<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
