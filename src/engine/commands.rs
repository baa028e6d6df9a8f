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

//! Command handlers.
//!
//! Each handler re-queries the live list and clamps the stored index before
//! acting, since the provider may have changed the lists since the last
//! command.

use std::time::Instant;

use tracing::{debug, trace};

use crate::{
    engine::{ScanEngine, clamp, wrap_step},
    model::{Mode, TargetKind},
    targets::FocusScope,
};

impl ScanEngine {
    /// Moves focus one step forwards or backwards in the live list.
    pub(super) fn step(&mut self, forward: bool) {
        if self.ctx.overlay_active {
            let targets = self.targets.overlay_targets();
            if let Some(index) = wrap_step(self.ctx.overlay_index, targets.len(), forward) {
                self.ctx.overlay_index = index;
                self.show_overlay_target(&targets[index]);
            }
            return;
        }

        match self.ctx.mode {
            Mode::Rows => {
                let rows = self.targets.rows();
                if let Some(index) = wrap_step(self.ctx.row_index, rows.len(), forward) {
                    self.ctx.row_index = index;
                    self.show_row(&rows[index]);
                }
            }
            Mode::Items => {
                let Some(row) = self.current_row() else {
                    return;
                };
                let items = self.targets.items(&row.id);
                if let Some(index) = wrap_step(self.ctx.item_index, items.len(), forward) {
                    self.ctx.item_index = index;
                    self.show_item(&items[index]);
                }
            }
        }
    }

    pub(super) fn select(&mut self) {
        if self.ctx.overlay_active {
            let targets = self.targets.overlay_targets();
            if targets.is_empty() {
                return;
            }
            self.ctx.overlay_index = clamp(self.ctx.overlay_index, targets.len());
            self.activator.activate(&targets[self.ctx.overlay_index]);
            return;
        }

        match self.ctx.mode {
            Mode::Items => {
                if let Some(row) = self.current_row() {
                    let items = self.targets.items(&row.id);
                    if !items.is_empty() {
                        self.ctx.item_index = clamp(self.ctx.item_index, items.len());
                        self.unfocus(FocusScope::Items);
                        self.activator.activate(&items[self.ctx.item_index]);
                    }
                }

                // Activation may have reshaped the rows, so re-query them.
                self.ctx.mode = Mode::Rows;
                debug!(row = self.ctx.row_index, "back to rows after activation");
                self.show_current_row();
            }
            Mode::Rows => {
                let Some(row) = self.current_row() else {
                    return;
                };

                if let TargetKind::TextEntry { text } = &row.kind {
                    let text = text.trim();
                    let spoken = if text.is_empty() {
                        self.phrases.empty.clone()
                    } else {
                        text.to_string()
                    };
                    self.announce(&spoken);
                    return;
                }

                self.unfocus(FocusScope::Rows);
                self.ctx.mode = Mode::Items;
                self.ctx.item_index = 0;
                debug!(row = %row.id, "entered items");

                let items = self.targets.items(&row.id);
                if let Some(first) = items.first() {
                    self.show_item(first);
                }
            }
        }
    }

    pub(super) fn hold_select(&mut self, now: Instant) {
        if self.ctx.overlay_active {
            trace!("hold select ignored in overlay");
            return;
        }

        match self.ctx.mode {
            Mode::Items => {
                self.ctx.mode = Mode::Rows;
                self.ctx.suppress_next_announcement = true;
                self.show_current_row();
                // An empty row list leaves the flag unconsumed.
                self.ctx.suppress_next_announcement = false;

                let rows = self.phrases.rows.clone();
                self.announce(&rows);
                debug!(row = self.ctx.row_index, "escaped to rows");
            }
            Mode::Rows => {
                let rows = self.targets.rows();
                let Some(index) = rows.iter().position(|row| row.is_predictive()) else {
                    trace!("no predictive row to jump to");
                    return;
                };

                let row = &rows[index];
                self.ctx.row_index = index;
                self.ctx.suppress_next_announcement = true;
                self.show_row(row);
                self.ctx.suppress_next_announcement = false;

                let words: Vec<String> = self
                    .targets
                    .items(&row.id)
                    .into_iter()
                    .filter_map(|item| item.spoken_label().map(str::to_string))
                    .collect();
                debug!(count = words.len(), "reading predictive row");

                self.feedback
                    .announce_sequence(words, now, self.timers.as_mut());
            }
        }
    }
}
