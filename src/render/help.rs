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

//! The help popup, drawn over the keyboard while open.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Padding, Paragraph},
};

use crate::{board::Board, theme::Theme};

const POPUP_WIDTH: u16 = 36;

pub(crate) fn draw_help(f: &mut Frame, area: Rect, board: &Board, theme: &Theme) {
    let keys = board.overlay_keys();

    let lines: Vec<Line> = keys
        .iter()
        .map(|key| {
            let style = if board.focus.overlay.as_ref() == Some(&key.id) {
                Style::default()
                    .fg(theme.focus_fg)
                    .bg(theme.accent_colour)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.key_fg)
            };
            Line::styled(format!(" {} ", key.caption), style)
        })
        .collect();

    let popup = centered(area, POPUP_WIDTH, lines.len() as u16 + 4);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent_colour))
        .title(" help ")
        .padding(Padding::uniform(1))
        .style(Style::default().bg(theme.status_bar_colour));

    f.render_widget(Clear, popup);
    f.render_widget(Paragraph::new(lines).block(block), popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
