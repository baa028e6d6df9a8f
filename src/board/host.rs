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

//! Adapts the board to the engine's collaborator traits.

use std::{cell::RefCell, rc::Rc, sync::mpsc::Sender};

use switchscan::{
    Target, TargetId, TargetKind,
    targets::{Activator, FocusScope, Renderer, TargetProvider},
};
use tracing::debug;

use super::{Board, Effect};
use crate::events::AppEvent;

/// Shared handle on the board, cloned once per collaborator role.
#[derive(Clone)]
pub(crate) struct BoardHost {
    board: Rc<RefCell<Board>>,
    event_tx: Sender<AppEvent>,
}

impl BoardHost {
    pub(crate) fn new(board: Rc<RefCell<Board>>, event_tx: Sender<AppEvent>) -> Self {
        Self { board, event_tx }
    }
}

impl TargetProvider for BoardHost {
    fn rows(&self) -> Vec<Target> {
        self.board
            .borrow()
            .rows()
            .into_iter()
            .map(|row| row.target)
            .collect()
    }

    fn items(&self, row: &TargetId) -> Vec<Target> {
        self.board
            .borrow()
            .rows()
            .into_iter()
            .find(|r| &r.target.id == row)
            .map(|r| r.keys.iter().map(|k| k.as_target(TargetKind::Item)).collect())
            .unwrap_or_default()
    }

    fn overlay_targets(&self) -> Vec<Target> {
        self.board
            .borrow()
            .overlay_keys()
            .iter()
            .map(|k| k.as_target(TargetKind::OverlayButton))
            .collect()
    }
}

impl Renderer for BoardHost {
    fn set_focus(&mut self, target: &Target, scope: FocusScope) {
        let mut board = self.board.borrow_mut();
        let mark = Some(target.id.clone());
        match scope {
            FocusScope::Rows => board.focus.row = mark,
            FocusScope::Items => board.focus.item = mark,
            FocusScope::Overlay => board.focus.overlay = mark,
        }
    }

    fn clear_focus(&mut self, scope: FocusScope) {
        let mut board = self.board.borrow_mut();
        match scope {
            FocusScope::Rows => board.focus.row = None,
            FocusScope::Items => board.focus.item = None,
            FocusScope::Overlay => board.focus.overlay = None,
        }
    }
}

impl Activator for BoardHost {
    // The engine is mid-command here, so anything that needs it again goes
    // back through the event loop.
    fn activate(&mut self, target: &Target) {
        let effects = self.board.borrow_mut().activate(&target.id);
        debug!(target = %target.id, ?effects, "activated");

        for effect in effects {
            let event = match effect {
                Effect::RowsChanged => AppEvent::RefreshTargets,
                Effect::OpenHelp => AppEvent::OpenOverlay,
                Effect::CloseHelp => AppEvent::CloseOverlay,
                Effect::Say(text) => AppEvent::Say(text),
            };
            self.event_tx.send(event).ok();
        }
    }
}
