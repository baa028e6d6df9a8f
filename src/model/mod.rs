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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the scanning engine, the
//! switch channels, the scanning mode, the commands produced from switch
//! gestures, and the transient scan targets handed out by a
//! [`TargetProvider`](crate::targets::TargetProvider).

use std::fmt;

/// One of the two discrete switch inputs feeding the engine.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Channel {
    /// Advance on a short press, reverse on a long hold.
    Primary,
    /// Select on release, hold-select on a long hold.
    Secondary,
}

/// Which of the two nested target lists drives traversal outside an overlay.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Mode {
    #[default]
    Rows,
    Items,
}

/// A scan command emitted by the input disambiguator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    Advance,
    Reverse,
    Select,
    HoldSelect,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TargetId(pub String);

impl TargetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// The role a target plays in the scanning hierarchy.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TargetKind {
    /// A plain row grouping items.
    Row,
    /// The free-text entry row, carrying its current text content.
    TextEntry { text: String },
    /// The row of predicted words, read aloud on hold-select.
    Predictive,
    /// An activatable item within a row.
    Item,
    /// An activatable button within an overlay.
    OverlayButton,
}

/// A focusable target.
///
/// Targets are produced afresh on every provider query, the engine only ever
/// remembers indices into the lists.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Target {
    pub id: TargetId,
    pub label: String,
    pub kind: TargetKind,
}

impl Target {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: TargetKind) -> Self {
        Self {
            id: TargetId::new(id),
            label: label.into(),
            kind,
        }
    }

    pub fn row(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, TargetKind::Row)
    }

    pub fn item(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, TargetKind::Item)
    }

    pub fn overlay_button(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, TargetKind::OverlayButton)
    }

    pub fn is_text_entry(&self) -> bool {
        matches!(self.kind, TargetKind::TextEntry { .. })
    }

    pub fn is_predictive(&self) -> bool {
        matches!(self.kind, TargetKind::Predictive)
    }

    /// Returns the trimmed label, or `None` when there is nothing to speak.
    pub fn spoken_label(&self) -> Option<&str> {
        let label = self.label.trim();
        (!label.is_empty()).then_some(label)
    }
}
