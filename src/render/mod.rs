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

//! User interface rendering.
//!
//! Translates the board and engine state into `ratatui` widgets. The primary
//! entry point is [`draw`], called after every event so that focus changes
//! made by the engine show up immediately.

mod board;
mod help;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::{
    App,
    render::{board::draw_board, help::draw_help, status::draw_status},
};

/// Renders the whole interface: the keyboard, the caption line, the status
/// bar and, while open, the help popup on top.
///
/// # Arguments
///
/// * `f` - The current terminal frame used for drawing.
/// * `app` - The application state to reflect.
pub(crate) fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let board = app.board.borrow();

    draw_board(f, outer[0], &board, &app.theme);
    status::draw_captions(f, outer[1], &app.captions.recent(), &app.theme);
    draw_status(f, outer[2], app);

    if board.help_open() {
        draw_help(f, area, &board, &app.theme);
    }
}
