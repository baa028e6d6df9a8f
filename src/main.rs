// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Switch scanning keyboard.
//!
//! A terminal on-screen keyboard operated with two switches, built on the
//! `switchscan` engine.
//!
//! The space bar is the primary switch and Enter the secondary switch. Rows
//! of keys are highlighted and announced one at a time, selecting a row
//! scans its keys, and selecting a key types it.
//!
//! ## Architecture
//!
//! * The **Main Thread** owns the engine, the board and the terminal, and
//!   processes every event in order.
//! * An **Input Thread** forwards raw key events, including releases when
//!   the terminal can report them.
//! * A **Tick Thread** sends a periodic tick which drives the engine's
//!   timers and doubles as the minimum frame rate.
//!
//! Communication is over a single `std::sync::mpsc` channel, and the
//! terminal is restored even when the event loop fails.

mod board;
mod events;
mod logging;
mod render;
mod theme;
mod util;
mod voice;

use std::{
    cell::RefCell,
    io,
    rc::Rc,
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};

use anyhow::{Context, Result};
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use switchscan::{
    Collaborators, ScanEngine,
    config::{self, ScanConfig},
};
use tracing::{info, warn};

use crate::{
    board::{Board, BoardHost},
    events::{AppEvent, process_events},
    render::draw,
    theme::Theme,
    voice::{Captions, Voice},
};

/// Timer resolution for holds, cooldowns and read-aloud steps.
const TICK_INTERVAL: Duration = Duration::from_millis(10);

/// Application state.
struct App {
    config: ScanConfig,
    theme: Theme,

    board: Rc<RefCell<Board>>,
    captions: Captions,
    engine: ScanEngine,

    event_tx: Sender<AppEvent>,
    event_rx: Receiver<AppEvent>,

    /// The terminal only reports presses, so each press stands in for a
    /// complete short press.
    tap_mode: bool,
}

impl App {
    fn new(config: ScanConfig) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        let board = Rc::new(RefCell::new(Board::new()));
        let captions = Captions::default();

        let host = BoardHost::new(board.clone(), event_tx.clone());
        let collaborators = Collaborators::new(
            Box::new(host.clone()),
            Box::new(host.clone()),
            Box::new(host),
        )
        .with_speech(Box::new(Voice::new(&config.speech, captions.clone())));

        let engine = ScanEngine::new(&config, collaborators);

        Self {
            config,
            theme: Theme::default(),
            board,
            captions,
            engine,
            event_tx,
            event_rx,
            tap_mode: false,
        }
    }
}

/// The entry point of the application.
///
/// Loads and validates the configuration, starts logging, and runs the
/// keyboard until the user quits.
fn main() -> Result<()> {
    let config = config::load_config();
    config
        .timing
        .validate()
        .context("Invalid timing configuration")?;

    let log_path = logging::init_logging()?;
    info!(log = %log_path.display(), "starting");

    let mut app = App::new(config);

    let mut terminal = setup_terminal(&mut app)?;
    let res = run(&mut terminal, &mut app);
    restore_terminal(&mut terminal, &app);

    res.context("Application error occurred")
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background colour from the theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
/// * Requests key release reporting, falling back to tap mode without it.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &mut App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Without this there is a thin outline in the terminal's own colour.
    if let Some(hex) = Theme::to_hex(app.theme.background_colour) {
        util::term::set_terminal_bg(&hex).ok();
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    app.tap_mode = !util::term::enable_key_releases().unwrap_or(false);
    if app.tap_mode {
        warn!("terminal does not report key releases, using tap mode");
    }

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`] on a best-effort
/// basis, as it runs during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &App) {
    if !app.tap_mode {
        util::term::disable_key_releases().ok();
    }
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg().ok();
    terminal.show_cursor().ok();
}

/// Starts the input and tick threads, focuses the first row and enters the
/// main event loop.
///
/// # Errors
///
/// Returns an error if drawing fails or the event loop encounters an
/// unrecoverable error.
fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            if let Ok(event::Event::Key(key)) = event::read()
                && tx_keys.send(AppEvent::Key(key)).is_err()
            {
                break;
            }
        }
    });

    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });

    app.engine.start();
    terminal.draw(|f| draw(f, app))?;

    process_events(terminal, app)
}
