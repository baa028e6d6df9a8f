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

//! Spoken feedback.
//!
//! [`Speech`] is the backend boundary, [`FeedbackSequencer`] layers
//! cancel-then-speak announcements and cancellable sequential read-aloud on
//! top of it.

mod sequencer;

pub use sequencer::FeedbackSequencer;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("speech backend is unavailable")]
    Unavailable,

    #[error("speech backend failed: {0}")]
    Backend(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A text-to-speech backend.
pub trait Speech {
    /// Starts speaking `text`.
    fn say(&mut self, text: &str) -> Result<(), SpeechError>;

    /// Stops any utterance in progress.
    fn cancel(&mut self) -> Result<(), SpeechError>;
}
