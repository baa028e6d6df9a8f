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

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    board::{Board, BoardRow},
    theme::Theme,
};

const FOCUS_MARKER: &str = "▶ ";
const NO_MARKER: &str = "  ";

pub(crate) fn draw_board(f: &mut Frame, area: Rect, board: &Board, theme: &Theme) {
    let mut lines = vec![];
    for row in board.rows() {
        lines.push(row_line(board, &row, theme));
        lines.push(Line::default());
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_colour))
        .title(" switchscan ")
        .style(Style::default().bg(theme.background_colour));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn row_line(board: &Board, row: &BoardRow, theme: &Theme) -> Line<'static> {
    let focused = board.focus.row.as_ref() == Some(&row.target.id);
    let marker = if focused { FOCUS_MARKER } else { NO_MARKER };

    let mut spans = vec![Span::styled(marker, Style::default().fg(theme.accent_colour))];

    if row.target.is_text_entry() {
        let text = board.input().value().to_string();
        spans.push(Span::styled("> ", Style::default().fg(theme.row_label_fg)));
        spans.push(Span::styled(text, Style::default().fg(theme.text_fg)));
        return Line::from(spans);
    }

    let key_style = if focused {
        Style::default().fg(theme.accent_colour)
    } else {
        Style::default().fg(theme.key_fg)
    };

    for key in &row.keys {
        let style = if board.focus.item.as_ref() == Some(&key.id) {
            Style::default()
                .fg(theme.focus_fg)
                .bg(theme.accent_colour)
                .add_modifier(Modifier::BOLD)
        } else {
            key_style
        };
        spans.push(Span::styled(format!(" {} ", key.caption), style));
        spans.push(Span::raw(" "));
    }

    if row.target.is_predictive() {
        spans.push(Span::styled(
            format!("  ({})", row.target.label),
            Style::default().fg(theme.row_label_fg),
        ));
    }

    Line::from(spans)
}
