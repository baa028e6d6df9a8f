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

//! # Switch scanning engine.
//!
//! Lets a user operate an entire interface with one or two binary switches.
//! Targets are presented one at a time and the user acts on the highlighted
//! one, with spoken feedback for every move.
//!
//! The library is organised leaves first:
//!
//! * [`timing`]: single-shot timers and the cooldown gate.
//! * [`targets`]: the provider, renderer and activator interfaces the host
//!   implements.
//! * [`input`]: classifies press and release timing into scan commands.
//! * [`speech`]: cancel-then-speak announcements and sequential read-aloud.
//! * [`engine`]: the row, item and overlay state machine tying it together.
//!
//! ## Gestures
//!
//! With the default [`config::ScanTiming`]:
//!
//! * a primary press released between 250ms and 3s moves to the next target,
//! * holding the primary switch for 2.5s moves to the previous target,
//! * releasing the secondary switch selects,
//! * holding the secondary switch for 3s leaves item mode, or from row mode
//!   jumps to the predictive row and reads its words aloud.

pub mod config;
pub mod engine;
pub mod input;
pub mod model;
pub mod speech;
pub mod targets;
pub mod timing;

pub use engine::{Collaborators, ScanContext, ScanEngine};
pub use model::{Channel, Command, Mode, Target, TargetId, TargetKind};
