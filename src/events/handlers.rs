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

use std::time::Instant;

use switchscan::config;
use tracing::{info, warn};

use crate::App;

pub(super) fn handle_tick(app: &mut App) {
    app.engine.tick(Instant::now());
}

pub(super) fn handle_open_overlay(app: &mut App) {
    app.engine.open_overlay(Instant::now());
}

pub(super) fn handle_close_overlay(app: &mut App) {
    app.engine.close_overlay();
}

pub(super) fn handle_refresh_targets(app: &mut App) {
    app.engine.refresh();
}

pub(super) fn handle_say(app: &mut App, text: &str) {
    app.engine.say(text);
}

/// Flips speech on or off and remembers the choice for the next session.
pub(super) fn handle_toggle_speech(app: &mut App) {
    let enabled = !app.engine.speech_enabled();
    app.engine.set_speech_enabled(enabled);
    info!(enabled, "speech toggled");

    app.config.speech.enabled = enabled;
    if let Err(e) = config::save_config(&app.config) {
        warn!(error = %e, "failed to save configuration");
    }
}
