use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::{Receiver, TryRecvError};
use evloop::consumer::{CommandBuffer, KeyTracker, Session};
use evloop::event_loop::LoopError;
use evloop::{DirStorage, Dispatcher, Event, EventLoop, EventSource, JournalMode, LoopConfig};
use std::collections::HashSet;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "evloop", version, about = "Drive the event loop from stdin, with journaling")]
struct Args {
    /// TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Journal mode: off, record or playback (or 0, 1, 2).
    #[arg(short, long)]
    journal: Option<JournalMode>,

    /// Directory holding journal.dat and journaldata.dat.
    #[arg(long)]
    journal_dir: Option<PathBuf>,

    /// Milliseconds between loop passes.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
}

/// Lines typed on stdin, delivered as console events.
struct StdinSource {
    lines: Receiver<String>,
    started: Instant,
}

impl StdinSource {
    fn spawn() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        std::thread::spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        Self {
            lines: rx,
            started: Instant::now(),
        }
    }

    fn now(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

impl EventSource for StdinSource {
    fn poll_event(&mut self) -> Event {
        loop {
            match self.lines.try_recv() {
                Ok(line) => match Event::console(self.now(), line.trim_end()) {
                    Ok(event) => return event,
                    Err(_) => continue,
                },
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => {
                    return Event::none(self.now());
                }
            }
        }
    }

    fn poll_secondary(&mut self) -> usize {
        0
    }

    fn secondary_event(&mut self, _index: usize) -> Event {
        Event::none(self.now())
    }

    fn end_secondary(&mut self) {}
}

struct LogCommands {
    pending: String,
    running: Arc<AtomicBool>,
}

impl CommandBuffer for LogCommands {
    fn append_command_text(&mut self, text: &str) {
        self.pending.push_str(text);
    }

    fn execute_buffered(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        for line in std::mem::take(&mut self.pending).lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            log::info!("exec: {}", line);
            if line == "quit" {
                self.running.store(false, Ordering::SeqCst);
            }
        }
    }
}

struct LogSession;

impl Session for LogSession {
    fn handle_event(&mut self, event: &Event) {
        log::info!("session <- {} {:?} (t={})", event.kind.name(), event.kind.values(), event.time);
    }
}

#[derive(Default)]
struct KeyStates {
    down: HashSet<i32>,
}

impl KeyTracker for KeyStates {
    fn key_event(&mut self, code: i32, down: bool) {
        if down {
            self.down.insert(code);
        } else {
            self.down.remove(&code);
        }
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => LoopConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => LoopConfig::default(),
    };
    if let Some(mode) = args.journal {
        config.journal = mode;
    }
    if let Some(dir) = args.journal_dir {
        config.journal_dir = dir;
    }
    config.validate()?;

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        log::info!("Shutting down...");
        r.store(false, Ordering::SeqCst);
    })
    .context("failed to set Ctrl+C handler")?;

    let dispatcher = Dispatcher::new(
        LogCommands {
            pending: String::new(),
            running: running.clone(),
        },
        LogSession,
        KeyStates::default(),
    );
    let mut event_loop = EventLoop::new(&config, StdinSource::spawn(), dispatcher)?;
    event_loop.init(&DirStorage::new(&config.journal_dir))?;

    log::info!(
        "evloop running, journal {}; type commands, \"quit\" or Ctrl+C to stop",
        event_loop.journal_mode()
    );

    let frame = Duration::from_millis(args.frame_ms);
    let mut last_report = Instant::now();
    let mut total = 0u64;

    while running.load(Ordering::SeqCst) {
        match event_loop.run_pass(true) {
            Ok(stats) => total += stats.dispatched(),
            Err(LoopError::Journal(e)) if e.is_clean_end() => {
                log::info!("journal replay complete");
                break;
            }
            Err(e) => return Err(e).context("event loop aborted"),
        }

        if last_report.elapsed() >= Duration::from_secs(5) {
            let stats = event_loop.dispatcher().stats();
            log::debug!(
                "[STATUS] dispatched={} console={} session={} pushed_queued={}",
                total,
                stats.console,
                stats.session,
                event_loop.pushed().len()
            );
            last_report = Instant::now();
        }

        std::thread::sleep(frame);
    }

    event_loop.shutdown();
    log::info!("Total events dispatched: {} in {} ms", total, event_loop.milliseconds());
    Ok(())
}
