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

//! Collaborator interfaces consumed by the engine.
//!
//! The engine never builds target lists or paints anything itself. Whatever
//! composes the interface implements these traits by whatever means fit the
//! platform and injects them into [`ScanEngine`](crate::engine::ScanEngine).

use crate::model::{Target, TargetId};

/// Which level of the scanning hierarchy a focus decoration belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FocusScope {
    Rows,
    Items,
    Overlay,
}

/// Supplies the ordered, currently visible targets for each scanning context.
///
/// Lists are re-queried on every traversal, so implementations should return
/// the live state rather than a cached snapshot.
pub trait TargetProvider {
    fn rows(&self) -> Vec<Target>;

    /// Items of the given row. An unknown or stale id yields an empty list.
    fn items(&self, row: &TargetId) -> Vec<Target>;

    fn overlay_targets(&self) -> Vec<Target>;
}

/// Visual focus side effects. The engine writes, never reads back.
pub trait Renderer {
    fn set_focus(&mut self, target: &Target, scope: FocusScope);

    fn clear_focus(&mut self, scope: FocusScope);
}

/// Performs the action behind an item or overlay button.
///
/// Fire and forget: failures are the implementation's concern.
pub trait Activator {
    fn activate(&mut self, target: &Target);
}
