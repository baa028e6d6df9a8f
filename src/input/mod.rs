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

//! Switch gesture classification.
//!
//! Raw press and release events for the two channels are turned into scan
//! [`Command`]s here. Holds are detected with a timer armed on press rather
//! than by measuring on release, so a long hold acts while the switch is
//! still down.
//!
//! | Channel   | Gesture                                 | Command      |
//! |-----------|-----------------------------------------|--------------|
//! | Primary   | released within `[short_min, short_max)` | `Advance`    |
//! | Primary   | held for `reverse_hold`                  | `Reverse`    |
//! | Secondary | released                                 | `Select`     |
//! | Secondary | held for `long_select_hold`, no overlay  | `HoldSelect` |
//!
//! Every emitted command restarts the cooldown, during which further
//! commands are discarded.

use std::time::Instant;

use tracing::trace;

use crate::{
    config::ScanTiming,
    model::{Channel, Command},
    timing::{Cooldown, FiredTimer, Scheduler, TimerHandle, TimerKind},
};

#[derive(Debug, Default)]
struct ChannelState {
    is_down: bool,
    pressed_at: Option<Instant>,
    timer: Option<TimerHandle>,
    /// A hold timer already acted on this press, so release does nothing.
    consumed: bool,
}

#[derive(Debug)]
pub struct InputDisambiguator {
    timing: ScanTiming,
    primary: ChannelState,
    secondary: ChannelState,
    cooldown: Cooldown,
}

impl InputDisambiguator {
    pub fn new(timing: ScanTiming) -> Self {
        Self {
            timing,
            primary: ChannelState::default(),
            secondary: ChannelState::default(),
            cooldown: Cooldown::new(timing.cooldown()),
        }
    }

    pub fn is_down(&self, channel: Channel) -> bool {
        self.state(channel).is_down
    }

    pub fn cooldown_until(&self) -> Option<Instant> {
        self.cooldown.until()
    }

    /// Records a press. Repeated presses while the channel is already down
    /// (keyboard auto-repeat) are ignored.
    ///
    /// The long-select timer is only armed outside an overlay.
    pub fn on_down(
        &mut self,
        channel: Channel,
        now: Instant,
        overlay_active: bool,
        timers: &mut dyn Scheduler,
    ) {
        let timing = self.timing;
        let state = self.state_mut(channel);
        if state.is_down {
            return;
        }

        state.is_down = true;
        state.pressed_at = Some(now);
        state.consumed = false;
        if let Some(handle) = state.timer.take() {
            timers.cancel(handle);
        }

        state.timer = match channel {
            Channel::Primary => Some(timers.arm(now, timing.reverse_hold(), TimerKind::Reverse)),
            Channel::Secondary if !overlay_active => {
                Some(timers.arm(now, timing.long_select_hold(), TimerKind::LongSelect))
            }
            Channel::Secondary => None,
        };
    }

    /// Records a release and classifies the completed gesture.
    pub fn on_up(
        &mut self,
        channel: Channel,
        now: Instant,
        timers: &mut dyn Scheduler,
    ) -> Option<Command> {
        let state = self.state_mut(channel);
        if !state.is_down {
            return None;
        }

        if let Some(handle) = state.timer.take() {
            timers.cancel(handle);
        }
        state.is_down = false;
        if std::mem::take(&mut state.consumed) {
            return None;
        }

        let held = state
            .pressed_at
            .map(|at| now.saturating_duration_since(at))
            .unwrap_or_default();

        let command = match channel {
            Channel::Primary => {
                if held < self.timing.short_min() || held >= self.timing.short_max() {
                    trace!(held_ms = held.as_millis() as u64, "primary press outside short window");
                    return None;
                }
                Command::Advance
            }
            Channel::Secondary => Command::Select,
        };

        self.emit(command, now)
    }

    /// Handles a fired hold timer.
    ///
    /// The timer is re-validated against the channel's current press, a
    /// firing that outlived its press is dropped. A long-select armed before
    /// an overlay opened is dropped too, leaving the press to select on
    /// release.
    pub fn on_timer(
        &mut self,
        fired: FiredTimer,
        now: Instant,
        overlay_active: bool,
    ) -> Option<Command> {
        let channel = fired.kind.channel()?;
        let state = self.state_mut(channel);
        if !state.is_down || state.timer != Some(fired.handle) {
            trace!(?channel, handle = ?fired.handle, "stale hold timer");
            return None;
        }

        state.timer = None;
        if channel == Channel::Secondary && overlay_active {
            trace!("long select ignored in overlay");
            return None;
        }
        state.consumed = true;

        let command = match channel {
            Channel::Primary => Command::Reverse,
            Channel::Secondary => Command::HoldSelect,
        };
        self.emit(command, now)
    }

    fn emit(&mut self, command: Command, now: Instant) -> Option<Command> {
        if self.cooldown.is_active(now) {
            trace!(?command, "discarded during cooldown");
            return None;
        }
        self.cooldown.arm(now);
        Some(command)
    }

    fn state(&self, channel: Channel) -> &ChannelState {
        match channel {
            Channel::Primary => &self.primary,
            Channel::Secondary => &self.secondary,
        }
    }

    fn state_mut(&mut self, channel: Channel) -> &mut ChannelState {
        match channel {
            Channel::Primary => &mut self.primary,
            Channel::Secondary => &mut self.secondary,
        }
    }
}
