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

//! Timing primitives.
//!
//! The engine never blocks waiting for a hold to complete. Instead it arms
//! single-shot timers through the [`Scheduler`] capability and is called back
//! when the host polls a fired timer out of the scheduler.
//!
//! * [`Scheduler`]: arm, cancel and poll single-shot timers.
//! * [`TimerQueue`]: a virtual-time scheduler driven by explicit instants.
//! * [`Cooldown`]: the refractory gate applied after every accepted command.

mod queue;

pub use queue::TimerQueue;

use std::time::{Duration, Instant};

use crate::model::Channel;

/// Opaque identity of one armed timer.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TimerHandle(pub(crate) u64);

/// What a timer is for, delivered back to the engine when it fires.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TimerKind {
    /// Primary channel held long enough to scan backwards.
    Reverse,
    /// Secondary channel held long enough for a hold-select.
    LongSelect,
    /// Next step of a sequential read-aloud.
    Sequence { generation: u64 },
    /// The host has had a refresh cycle to lay out a newly opened overlay.
    OverlaySettle,
}

impl TimerKind {
    /// The switch channel owning this timer, if it is channel scoped.
    pub fn channel(self) -> Option<Channel> {
        match self {
            TimerKind::Reverse => Some(Channel::Primary),
            TimerKind::LongSelect => Some(Channel::Secondary),
            TimerKind::Sequence { .. } | TimerKind::OverlaySettle => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FiredTimer {
    pub handle: TimerHandle,
    pub kind: TimerKind,
}

/// Single-shot delayed callback capability.
///
/// Firing is modelled as data rather than closures: the host polls fired
/// timers and hands them back to the engine, which keeps every mutation on
/// the caller's thread.
pub trait Scheduler {
    /// Arms a timer firing `delay` after `now`.
    fn arm(&mut self, now: Instant, delay: Duration, kind: TimerKind) -> TimerHandle;

    /// Cancels a pending timer. Cancelling a fired or unknown handle is a
    /// no-op.
    fn cancel(&mut self, handle: TimerHandle);

    /// Removes and returns the earliest timer due at `now`, if any.
    fn poll(&mut self, now: Instant) -> Option<FiredTimer>;
}

/// Refractory gate suppressing commands for a fixed window after each
/// accepted one.
#[derive(Clone, Copy, Debug)]
pub struct Cooldown {
    window: Duration,
    until: Option<Instant>,
}

impl Cooldown {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            until: None,
        }
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.until.is_some_and(|until| now < until)
    }

    /// Restarts the window from `now`.
    pub fn arm(&mut self, now: Instant) {
        self.until = Some(now + self.window);
    }

    pub fn until(&self) -> Option<Instant> {
        self.until
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldown_starts_inactive() {
        let cooldown = Cooldown::new(Duration::from_millis(500));
        assert!(!cooldown.is_active(Instant::now()));
        assert_eq!(cooldown.until(), None);
    }

    #[test]
    fn cooldown_window_is_half_open() {
        let t0 = Instant::now();
        let mut cooldown = Cooldown::new(Duration::from_millis(500));
        cooldown.arm(t0);

        assert!(cooldown.is_active(t0));
        assert!(cooldown.is_active(t0 + Duration::from_millis(499)));
        assert!(!cooldown.is_active(t0 + Duration::from_millis(500)));
    }

    #[test]
    fn rearming_extends_from_latest_emission() {
        let t0 = Instant::now();
        let mut cooldown = Cooldown::new(Duration::from_millis(500));
        cooldown.arm(t0);
        cooldown.arm(t0 + Duration::from_millis(400));

        assert!(cooldown.is_active(t0 + Duration::from_millis(800)));
        assert_eq!(cooldown.until(), Some(t0 + Duration::from_millis(900)));
    }

    #[test]
    fn only_hold_timers_are_channel_scoped() {
        assert_eq!(TimerKind::Reverse.channel(), Some(Channel::Primary));
        assert_eq!(TimerKind::LongSelect.channel(), Some(Channel::Secondary));
        assert_eq!(TimerKind::OverlaySettle.channel(), None);
        assert_eq!(TimerKind::Sequence { generation: 3 }.channel(), None);
    }
}
