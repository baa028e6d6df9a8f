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

//! Virtual-time timer queue.
//!
//! Timers are kept in arming order and fire strictly by deadline. Nothing
//! happens on its own; a host calls [`Scheduler::poll`] with the current
//! instant, typically from a periodic tick.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::timing::{FiredTimer, Scheduler, TimerHandle, TimerKind};

#[derive(Debug)]
struct Pending {
    handle: TimerHandle,
    kind: TimerKind,
    deadline: Instant,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    next_handle: u64,
    pending: Vec<Pending>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn is_armed(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    /// The earliest deadline among pending timers.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.deadline).min()
    }
}

impl Scheduler for TimerQueue {
    fn arm(&mut self, now: Instant, delay: Duration, kind: TimerKind) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;

        trace!(?handle, ?kind, delay_ms = delay.as_millis() as u64, "arm timer");
        self.pending.push(Pending {
            handle,
            kind,
            deadline: now + delay,
        });

        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        if self.pending.len() != before {
            trace!(?handle, "cancel timer");
        }
    }

    fn poll(&mut self, now: Instant) -> Option<FiredTimer> {
        // Earliest deadline first, ties broken by arming order.
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.deadline <= now)
            .min_by_key(|(_, p)| (p.deadline, p.handle))
            .map(|(i, _)| i)?;

        let fired = self.pending.remove(index);
        trace!(handle = ?fired.handle, kind = ?fired.kind, "timer fired");

        Some(FiredTimer {
            handle: fired.handle,
            kind: fired.kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn nothing_fires_before_deadline() {
        let t0 = Instant::now();
        let mut queue = TimerQueue::new();
        queue.arm(t0, ms(100), TimerKind::Reverse);

        assert_eq!(queue.poll(t0 + ms(99)), None);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn fires_in_deadline_order() {
        let t0 = Instant::now();
        let mut queue = TimerQueue::new();
        let late = queue.arm(t0, ms(300), TimerKind::LongSelect);
        let early = queue.arm(t0, ms(100), TimerKind::Reverse);

        let now = t0 + ms(500);
        assert_eq!(queue.poll(now).map(|f| f.handle), Some(early));
        assert_eq!(queue.poll(now).map(|f| f.handle), Some(late));
        assert_eq!(queue.poll(now), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let t0 = Instant::now();
        let mut queue = TimerQueue::new();
        let handle = queue.arm(t0, ms(100), TimerKind::OverlaySettle);
        queue.cancel(handle);

        assert!(!queue.is_armed(handle));
        assert_eq!(queue.poll(t0 + ms(1000)), None);
    }

    #[test]
    fn cancelling_unknown_handle_is_harmless() {
        let t0 = Instant::now();
        let mut queue = TimerQueue::new();
        let handle = queue.arm(t0, ms(10), TimerKind::Reverse);
        assert!(queue.poll(t0 + ms(10)).is_some());

        queue.cancel(handle);
        assert!(queue.is_empty());
    }

    #[test]
    fn next_deadline_tracks_earliest() {
        let t0 = Instant::now();
        let mut queue = TimerQueue::new();
        assert_eq!(queue.next_deadline(), None);

        queue.arm(t0, ms(1000), TimerKind::Sequence { generation: 1 });
        queue.arm(t0, ms(250), TimerKind::Reverse);
        assert_eq!(queue.next_deadline(), Some(t0 + ms(250)));
    }
}
