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

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use switchscan::Channel;

use super::{AppEvent, handlers::handle_toggle_speech};
use crate::App;

/// Maps keyboard input onto the two switch channels and a few host controls.
///
/// Space is the primary switch and Enter the secondary switch. When the
/// terminal reports key releases these are forwarded as raw down and up
/// events and the engine classifies the gesture from their timing. Otherwise
/// each press is treated as a complete short press, and the hold gestures are
/// reachable through dedicated keys instead.
///
/// # Arguments
///
/// * `app` - A mutable reference to the application state.
/// * `key` - The key event captured from the terminal backend.
///
/// # Errors
///
/// Returns an error if the exit event cannot be sent.
pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char(' ') => switch_event(app, Channel::Primary, key.kind),
        KeyCode::Enter => switch_event(app, Channel::Secondary, key.kind),
        _ if key.kind != KeyEventKind::Press => {}
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.event_tx.send(AppEvent::ExitApplication)?;
        }
        KeyCode::Char('q') | KeyCode::Esc => app.event_tx.send(AppEvent::ExitApplication)?,
        KeyCode::Char('m') => handle_toggle_speech(app),
        KeyCode::Char('s') => app.engine.stop_speech(),
        KeyCode::Char('r') if app.tap_mode => {
            let held = app.config.timing.reverse_hold();
            tap(app, Channel::Primary, held);
        }
        KeyCode::Tab if app.tap_mode => {
            let held = app.config.timing.long_select_hold();
            tap(app, Channel::Secondary, held);
        }
        _ => {}
    }
    Ok(())
}

fn switch_event(app: &mut App, channel: Channel, kind: KeyEventKind) {
    let now = Instant::now();
    match kind {
        KeyEventKind::Press if app.tap_mode => {
            let held = app.config.timing.short_min();
            tap(app, channel, held);
        }
        KeyEventKind::Press => app.engine.on_channel_down(channel, now),
        KeyEventKind::Release => app.engine.on_channel_up(channel, now),
        // Auto-repeat while held.
        KeyEventKind::Repeat => {}
    }
}

/// Replays a press that was held for `held`, ending now.
fn tap(app: &mut App, channel: Channel, held: Duration) {
    let now = Instant::now();
    let pressed = now.checked_sub(held).unwrap_or(now);

    app.engine.on_channel_down(channel, pressed);
    // A hold timer that `held` reached fires inside the release.
    app.engine.on_channel_up(channel, now);
}
