use anyhow::{Context, Result, bail};
use clap::Parser;
use evloop::storage::DirStorage;
use evloop::{Event, Journal, JournalMode};
use std::path::PathBuf;
use std::time::Instant;

/// Records a synthetic event stream, replays it and checks it comes back
/// identical.
#[derive(Parser, Debug)]
#[command(name = "journal_check", version)]
struct Args {
    /// Number of primary events to record.
    #[arg(short = 'n', long, default_value_t = 1_000_000)]
    events: u64,

    /// Journal directory; a scratch directory is used when omitted.
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Leave the scratch journal files in place afterwards.
    #[arg(long)]
    keep: bool,
}

fn synthetic(i: u64) -> Event {
    let v = (i % 997) as i32;
    match i % 16 {
        0 => Event::console(i, &format!("echo {i}")).unwrap_or_else(|_| Event::none(i)),
        1..=5 => Event::key(i, v, i % 2 == 0),
        6..=9 => Event::mouse_move(i, v - 498, 498 - v),
        10..=13 => Event::joystick_axis(i, (i % 4) as i32, v * 32 - 16000),
        _ => Event::mouse_button(i, (i % 3) as i32, i % 2 == 1),
    }
}

fn main() {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let dir = args.dir.clone().unwrap_or_else(|| {
        std::env::temp_dir().join(format!("evloop_check_{}", std::process::id()))
    });
    let storage = DirStorage::new(&dir).with_initial_capacity(64 * 1024 * 1024);

    log::info!("recording {} events to {}", args.events, dir.display());

    let start = Instant::now();
    let mut journal = Journal::open(JournalMode::Record, &storage);
    if journal.mode() != JournalMode::Record {
        bail!("could not open journal for recording in {}", dir.display());
    }
    for i in 0..args.events {
        journal.record(&synthetic(i), false)?;
        if i % 8 == 7 {
            journal.record(&Event::char(i, 'a' as i32 + (i % 26) as i32), true)?;
        }
    }
    journal.record(&Event::none(args.events), false)?;
    journal.close();
    let record_secs = start.elapsed().as_secs_f64();

    let start = Instant::now();
    let mut journal = Journal::open(JournalMode::Playback, &storage);
    if journal.mode() != JournalMode::Playback {
        bail!("could not open journal for playback in {}", dir.display());
    }
    for i in 0..args.events {
        let event = journal.next_primary()?;
        if event != synthetic(i) {
            bail!("event {} differs on replay: {:?}", i, event);
        }
        let secondary = journal.next_secondary()?;
        let expected = (i % 8 == 7).then(|| Event::char(i, 'a' as i32 + (i % 26) as i32));
        if secondary != expected {
            bail!("secondary of event {} differs on replay: {:?}", i, secondary);
        }
    }
    if !journal.next_primary()?.is_none() {
        bail!("journal does not end with the recorded empty event");
    }
    let replay_secs = start.elapsed().as_secs_f64();
    let records = journal.record_count();
    journal.close();

    log::info!("replayed {} records identically", records);
    log::info!(
        "  record: {:.2}M events/sec",
        args.events as f64 / record_secs / 1_000_000.0
    );
    log::info!(
        "  replay: {:.2}M events/sec",
        args.events as f64 / replay_secs / 1_000_000.0
    );

    if args.dir.is_none() && !args.keep {
        std::fs::remove_dir_all(&dir)
            .with_context(|| format!("removing {}", dir.display()))?;
    }
    Ok(())
}
