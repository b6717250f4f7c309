// TUI module - Terminal User Interface
//
// This module manages the component gallery using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard and mouse input, animation ticks, timers)
// - Results from background clipboard and shell tasks
// - Rendering the UI

pub mod app;
pub mod components;
pub mod traits;
pub mod ui;

use crate::clipboard::{SystemClipboard, SystemClock};
use crate::config::Config;
use crate::logging::LogBuffer;
use crate::shell::{NativeShell, Notification};
use anyhow::{Context, Result};
use app::{App, AppMessage};
use components::PortForwardRecord;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

type GalleryApp = App<SystemClipboard, NativeShell, SystemClock>;

/// Idle wait when no timer is pending
const IDLE_WAIT: Duration = Duration::from_secs(3600);

/// Run the gallery
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// when done, even if the loop failed.
pub async fn run_gallery(
    config: Config,
    log_buffer: LogBuffer,
    records: Vec<PortForwardRecord>,
) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Background tasks report back through these
    let (tx, mut message_rx) = mpsc::channel(64);
    let (notify_tx, mut notify_rx) = mpsc::channel(16);

    let shell = Arc::new(NativeShell::new(notify_tx));
    let mut app: GalleryApp = App::new(
        &config,
        SystemClipboard,
        shell,
        tx,
        log_buffer,
        records,
        SystemClock,
    );
    app.request_version();
    tracing::info!("Gallery started with {} port forwards", app.table.records().len());

    let result = run_event_loop(&mut terminal, &mut app, &mut message_rx, &mut notify_rx).await;

    // Cancel pending resets before the controls go away
    app.teardown();

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on whichever happens first:
/// 1. Keyboard or mouse input
/// 2. Animation tick (spinners, shimmer, stripes)
/// 3. The next scheduled timer (copy reset, toast expiry, forward settle)
/// 4. Results from background tasks
/// 5. Shell notifications
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut GalleryApp,
    message_rx: &mut mpsc::Receiver<AppMessage>,
    notify_rx: &mut mpsc::Receiver<Notification>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        let timer_wait = app.timers.time_until_next().unwrap_or(IDLE_WAIT);

        tokio::select! {
            // Keyboard or mouse input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => app.handle_key(key_event),
                        Ok(Event::Mouse(mouse_event)) => app.handle_mouse(mouse_event),
                        _ => {}
                    }
                }
            } => {}

            // Periodic tick for animation
            _ = tick_interval.tick() => {
                app.tick();
            }

            _ = tokio::time::sleep(timer_wait) => {}

            Some(message) = message_rx.recv() => {
                app.handle_message(message);
            }

            Some(notification) = notify_rx.recv() => {
                app.show_notification(notification);
            }
        }

        // Deadlines may also pass while another branch was running
        app.fire_timers();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
