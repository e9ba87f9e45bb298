use super::{CommandBuffer, KeyTracker, Session};
use crate::event::{Event, EventKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Console,
    Session,
    Dropped,
}

pub struct Dispatcher {
    commands: Box<dyn CommandBuffer>,
    session: Box<dyn Session>,
    keys: Box<dyn KeyTracker>,
    stats: DispatchStats,
}

impl Dispatcher {
    pub fn new<C, S, K>(commands: C, session: S, keys: K) -> Self
    where
        C: CommandBuffer + 'static,
        S: Session + 'static,
        K: KeyTracker + 'static,
    {
        Self {
            commands: Box::new(commands),
            session: Box::new(session),
            keys: Box::new(keys),
            stats: DispatchStats::default(),
        }
    }

    #[inline]
    pub fn dispatch(&mut self, event: &Event) -> Route {
        if let EventKind::Key { code, down } = event.kind {
            self.keys.key_event(code, down);
            self.stats.keys_tracked += 1;
        }

        match &event.kind {
            EventKind::None => {
                log::warn!("dropping unroutable {} event (t={})", event.kind.name(), event.time);
                self.stats.dropped += 1;
                Route::Dropped
            }
            EventKind::Console(payload) => {
                self.commands.append_command_text(&payload.to_text());
                self.commands.append_command_text("\n");
                self.stats.console += 1;
                Route::Console
            }
            _ => {
                self.session.handle_event(event);
                self.stats.session += 1;
                Route::Session
            }
        }
    }

    #[inline]
    pub fn execute_commands(&mut self) {
        self.commands.execute_buffered();
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchStats {
    pub console: u64,
    pub session: u64,
    pub keys_tracked: u64,
    pub dropped: u64,
}

impl DispatchStats {
    #[inline]
    pub fn routed(&self) -> u64 {
        self.console + self.session
    }
}
