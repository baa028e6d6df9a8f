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

//! The caption line and status bar along the bottom of the screen.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use switchscan::Channel;

use crate::{App, theme::Theme};

const SWITCH_LEGEND: &str = "Space=next  Enter=select";
const TAP_LEGEND: &str = "r=back  Tab=hold select";

/// Shows recent utterances, the newest emphasised.
pub(crate) fn draw_captions(f: &mut Frame, area: Rect, captions: &[String], theme: &Theme) {
    let mut spans = vec![Span::raw(" ")];
    if let Some((newest, older)) = captions.split_last() {
        for caption in older {
            spans.push(Span::styled(
                format!("{caption} · "),
                Style::default().fg(theme.row_label_fg),
            ));
        }
        spans.push(Span::styled(
            newest.clone(),
            Style::default()
                .fg(theme.caption_fg)
                .add_modifier(Modifier::BOLD),
        ));
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.background_colour)),
        area,
    );
}

pub(crate) fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let container = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(16)])
        .horizontal_margin(1)
        .split(area);

    let mut legend = format!(
        "{}{}  {}",
        app.engine.status_text(),
        held_switches(app),
        SWITCH_LEGEND
    );
    if app.tap_mode {
        legend.push_str("  ");
        legend.push_str(TAP_LEGEND);
    }

    let style = Style::default()
        .fg(app.theme.key_fg)
        .bg(app.theme.status_bar_colour);

    f.render_widget(Paragraph::new(legend).style(style), container[0]);

    let speech = if app.engine.speech_enabled() {
        "speech on (m)"
    } else {
        "speech off (m)"
    };
    f.render_widget(Paragraph::new(speech).style(style), container[1]);
}

/// Marks the switches currently held down, e.g. `  [1 2]`.
fn held_switches(app: &App) -> String {
    let held: Vec<&str> = [(Channel::Primary, "1"), (Channel::Secondary, "2")]
        .into_iter()
        .filter(|(channel, _)| app.engine.is_channel_down(*channel))
        .map(|(_, mark)| mark)
        .collect();

    if held.is_empty() {
        String::new()
    } else {
        format!("  [{}]", held.join(" "))
    }
}
