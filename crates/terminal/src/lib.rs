//! Terminal front end for `cpustat`.
//!
//! Owns the refresh loop and merges its three event sources:
//! - sample timer (every `interval`)
//! - terminal events (quit keys, resize)
//! - the process interrupt signal
//!
//! Exactly one message is handled per iteration, on a single thread.

pub mod app;
pub mod session;

pub use app::{step, App, Flow};
pub use session::TerminalSession;

use cpustat_config::Config;
use cpustat_core::{CategoryMode, CpuStatError, Message, Result};
use cpustat_renderer::ChartConfig;
use cpustat_system::ProcStat;
use cpustat_theme::Theme;
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use futures::{Stream, StreamExt};
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::{self, Interval, MissedTickBehavior};
use tracing::info;

/// Everything the loop needs, resolved from config and command line.
#[derive(Debug, Clone)]
pub struct Settings {
    pub mode:      CategoryMode,
    pub interval:  Duration,
    pub proc_stat: PathBuf,
    pub chart:     ChartConfig,
}

impl Settings {
    pub fn from_config(config: &Config) -> Self {
        let mode = CategoryMode::from_detailed(config.general.detailed);
        let theme = Theme::from_config(&config.theme, mode);
        Self {
            mode,
            interval:  config.general.interval,
            proc_stat: config.source.proc_stat.clone(),
            chart:     ChartConfig::from_theme(&theme, config.general.bar_width),
        }
    }
}

/// Run the chart until the user quits.  Any error is fatal for the caller.
pub fn run(settings: Settings) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_loop(settings))
}

async fn run_loop(settings: Settings) -> Result<()> {
    // Read the baseline before touching the terminal so a broken counter
    // source fails on a normal screen.
    let source = ProcStat::open(&settings.proc_stat)?;
    let mut app = App::new(source, settings.mode, settings.chart)?;

    let mut session = TerminalSession::enter()?;
    let terminal = session.terminal_mut();

    let size = terminal.size()?;
    step(
        &mut app,
        terminal,
        Message::Resize {
            width:  size.width,
            height: size.height,
        },
    )?;

    let mut events = EventStream::new();
    let mut ticker = time::interval_at(time::Instant::now() + settings.interval, settings.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);

    // One listener for the whole loop: a SIGINT that lands while a frame
    // is being drawn stays pending until the next wait.
    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);

    info!(mode = ?settings.mode, interval = ?settings.interval, "Refresh loop started");

    loop {
        let message = next_message(&mut ticker, &mut events, interrupt.as_mut()).await?;
        if step(&mut app, terminal, message)? == Flow::Stop {
            break;
        }
    }

    info!("Refresh loop stopped");
    Ok(())
}

/// Wait for the next message from the ticker, the terminal or `interrupt`.
///
/// Ignored terminal events are skipped. `interrupt` must not be polled again
/// after it yields [`Message::Quit`].
async fn next_message<E, I>(
    ticker: &mut Interval,
    events: &mut E,
    mut interrupt: Pin<&mut I>,
) -> Result<Message>
where
    E: Stream<Item = std::io::Result<Event>> + Unpin,
    I: Future,
{
    loop {
        let message = tokio::select! {
            _ = ticker.tick() => Message::Tick,
            event = events.next() => match event {
                Some(Ok(event)) => match classify(&event) {
                    Some(message) => message,
                    None => continue,
                },
                Some(Err(e)) => {
                    return Err(CpuStatError::Terminal(format!("event stream failed: {e}")));
                }
                None => Message::Quit,
            },
            _ = interrupt.as_mut() => Message::Quit,
        };
        return Ok(message);
    }
}

/// Map a raw terminal event to a loop message; `None` means ignore it.
pub fn classify(event: &Event) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Message::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::Quit)
            }
            _ => None,
        },
        Event::Resize(width, height) => Some(Message::Resize {
            width:  *width,
            height: *height,
        }),
        _ => None,
    }
}
