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

//! Overlay lifecycle and target list refresh.

use std::time::Instant;

use tracing::{debug, trace};

use crate::{
    engine::{LiveList, RefreshSnapshot, ScanEngine, clamp},
    model::{Mode, Target},
    targets::FocusScope,
    timing::{TimerHandle, TimerKind},
};

impl ScanEngine {
    /// Routes scanning to the overlay's targets.
    ///
    /// The first target is focused once the host has had a refresh cycle to
    /// show the overlay, on the settle timer.
    pub fn open_overlay(&mut self, now: Instant) {
        self.ctx.overlay_active = true;
        self.ctx.overlay_index = 0;
        self.last_refresh = None;

        if let Some(handle) = self.overlay_timer.take() {
            self.timers.cancel(handle);
        }
        self.overlay_timer = Some(
            self.timers
                .arm(now, self.overlay_settle, TimerKind::OverlaySettle),
        );
        debug!("overlay opened");
    }

    /// Returns scanning to rows or items exactly where it left off.
    pub fn close_overlay(&mut self) {
        self.ctx.overlay_active = false;
        self.ctx.overlay_index = 0;
        self.last_refresh = None;

        if let Some(handle) = self.overlay_timer.take() {
            self.timers.cancel(handle);
        }
        self.unfocus(FocusScope::Overlay);
        debug!(mode = ?self.ctx.mode, row = self.ctx.row_index, "overlay closed");
    }

    pub(super) fn settle_overlay(&mut self, handle: TimerHandle) {
        if self.overlay_timer != Some(handle) {
            trace!(?handle, "stale overlay settle");
            return;
        }
        self.overlay_timer = None;
        if !self.ctx.overlay_active {
            return;
        }

        let targets = self.targets.overlay_targets();
        if targets.is_empty() {
            return;
        }
        self.ctx.overlay_index = clamp(self.ctx.overlay_index, targets.len());
        self.show_overlay_target(&targets[self.ctx.overlay_index]);
    }

    /// Re-reads the live list after the interface changed, clamps the focused
    /// index into it and re-applies focus there.
    ///
    /// A refresh that finds the same list and position as the previous one
    /// does nothing.
    ///
    /// While a freshly opened overlay is still settling only the index is
    /// clamped, its first focus is left to the settle timer.
    ///
    /// Focus is re-applied on any change, but the target is only announced
    /// again if it is not the one already focused.
    pub fn refresh(&mut self) {
        let (live, targets) = self.live_list();
        let index = self.live_index_mut(&live);
        *index = clamp(*index, targets.len());
        let index = *index;

        if live == LiveList::Overlay && self.overlay_timer.is_some() {
            trace!("refresh during overlay settle");
            return;
        }

        let snapshot = RefreshSnapshot {
            live,
            ids: targets.iter().map(|t| t.id.clone()).collect(),
            index,
        };
        if self.last_refresh.as_ref() == Some(&snapshot) {
            trace!("refresh found nothing changed");
            return;
        }

        let scope = match snapshot.live {
            LiveList::Rows => FocusScope::Rows,
            LiveList::Items(_) => FocusScope::Items,
            LiveList::Overlay => FocusScope::Overlay,
        };
        self.last_refresh = Some(snapshot);

        let Some(target) = targets.get(index) else {
            self.unfocus(scope);
            return;
        };

        let already_focused = self.is_focused(target, scope);
        self.focus(target, scope);
        if self.policy.announce_on_refresh && !already_focused {
            let label = match scope {
                FocusScope::Rows => self.row_label(target),
                FocusScope::Items | FocusScope::Overlay => Some(self.item_label(target)),
            };
            if let Some(label) = label {
                self.announce_focus(&label);
            }
        }
    }

    fn live_list(&mut self) -> (LiveList, Vec<Target>) {
        if self.ctx.overlay_active {
            return (LiveList::Overlay, self.targets.overlay_targets());
        }

        match self.ctx.mode {
            Mode::Rows => (LiveList::Rows, self.targets.rows()),
            Mode::Items => match self.current_row() {
                Some(row) => {
                    let items = self.targets.items(&row.id);
                    (LiveList::Items(row.id), items)
                }
                // No rows left at all, fall back to an empty row list.
                None => (LiveList::Rows, vec![]),
            },
        }
    }

    fn live_index_mut(&mut self, live: &LiveList) -> &mut usize {
        match live {
            LiveList::Rows => &mut self.ctx.row_index,
            LiveList::Items(_) => &mut self.ctx.item_index,
            LiveList::Overlay => &mut self.ctx.overlay_index,
        }
    }
}
