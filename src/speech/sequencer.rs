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

//! Announcement sequencing.
//!
//! Every call to [`FeedbackSequencer::announce`] or
//! [`FeedbackSequencer::announce_sequence`] starts a new generation. A
//! sequence step timer carries the generation it was armed for and is ignored
//! once a newer call has superseded it, so a running read-aloud stops the
//! moment anything else is said.

use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

use tracing::{trace, warn};

use crate::{
    speech::Speech,
    timing::{Scheduler, TimerHandle, TimerKind},
};

pub struct FeedbackSequencer {
    speech: Option<Box<dyn Speech>>,
    enabled: bool,
    generation: u64,
    gap: Duration,
    remaining: VecDeque<String>,
    step_timer: Option<TimerHandle>,
}

impl FeedbackSequencer {
    /// Creates a sequencer. A `None` backend turns every announcement into a
    /// no-op.
    pub fn new(speech: Option<Box<dyn Speech>>, gap: Duration) -> Self {
        Self {
            speech,
            enabled: true,
            generation: 0,
            gap,
            remaining: VecDeque::new(),
            step_timer: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.speech.is_some()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turns spoken feedback on or off. Turning it off stops anything in
    /// progress.
    pub fn set_enabled(&mut self, enabled: bool, timers: &mut dyn Scheduler) {
        if !enabled {
            self.stop(timers);
        }
        self.enabled = enabled;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a read-aloud still has labels left to speak.
    pub fn is_sequencing(&self) -> bool {
        !self.remaining.is_empty()
    }

    /// Cancels any speech in progress and speaks `label` immediately.
    pub fn announce(&mut self, label: &str, timers: &mut dyn Scheduler) {
        if !self.can_speak() {
            return;
        }
        let label = label.trim();
        if label.is_empty() {
            return;
        }

        self.supersede(timers);
        self.say(label);
    }

    /// Speaks `labels` one at a time, `gap` apart, until the end of the list
    /// or until superseded by another announcement.
    pub fn announce_sequence<I>(&mut self, labels: I, now: Instant, timers: &mut dyn Scheduler)
    where
        I: IntoIterator<Item = String>,
    {
        if !self.can_speak() {
            return;
        }

        self.supersede(timers);
        self.remaining = labels
            .into_iter()
            .filter(|label| !label.trim().is_empty())
            .collect();

        self.speak_next(now, timers);
    }

    /// Handles a fired sequence step timer.
    pub fn on_step(&mut self, generation: u64, now: Instant, timers: &mut dyn Scheduler) {
        if generation != self.generation {
            trace!(generation, current = self.generation, "stale sequence step");
            return;
        }
        self.step_timer = None;
        self.speak_next(now, timers);
    }

    /// Stops speech and abandons the rest of any sequence.
    pub fn stop(&mut self, timers: &mut dyn Scheduler) {
        self.supersede(timers);
    }

    fn can_speak(&self) -> bool {
        self.enabled && self.speech.is_some()
    }

    fn supersede(&mut self, timers: &mut dyn Scheduler) {
        self.generation += 1;
        self.remaining.clear();
        if let Some(handle) = self.step_timer.take() {
            timers.cancel(handle);
        }
        if let Some(speech) = self.speech.as_mut() {
            if let Err(e) = speech.cancel() {
                warn!(error = %e, "failed to cancel speech");
            }
        }
    }

    fn speak_next(&mut self, now: Instant, timers: &mut dyn Scheduler) {
        let Some(label) = self.remaining.pop_front() else {
            return;
        };
        self.say(&label);

        if !self.remaining.is_empty() {
            let kind = TimerKind::Sequence {
                generation: self.generation,
            };
            self.step_timer = Some(timers.arm(now, self.gap, kind));
        }
    }

    fn say(&mut self, text: &str) {
        if let Some(speech) = self.speech.as_mut() {
            trace!(text, "say");
            if let Err(e) = speech.say(text) {
                warn!(error = %e, text, "speech failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{speech::SpeechError, timing::TimerQueue};

    #[derive(Clone, Default)]
    struct Transcript(Rc<RefCell<Vec<String>>>);

    impl Transcript {
        fn said(&self) -> Vec<String> {
            self.0.borrow().clone()
        }
    }

    impl Speech for Transcript {
        fn say(&mut self, text: &str) -> Result<(), SpeechError> {
            self.0.borrow_mut().push(text.to_string());
            Ok(())
        }

        fn cancel(&mut self) -> Result<(), SpeechError> {
            Ok(())
        }
    }

    struct Broken;

    impl Speech for Broken {
        fn say(&mut self, _text: &str) -> Result<(), SpeechError> {
            Err(SpeechError::Unavailable)
        }

        fn cancel(&mut self) -> Result<(), SpeechError> {
            Err(SpeechError::Backend("no audio device".to_string()))
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn fire_due(seq: &mut FeedbackSequencer, timers: &mut TimerQueue, now: Instant) {
        while let Some(fired) = timers.poll(now) {
            if let TimerKind::Sequence { generation } = fired.kind {
                seq.on_step(generation, now, timers);
            }
        }
    }

    #[test]
    fn sequence_speaks_one_label_per_gap() {
        let transcript = Transcript::default();
        let mut seq = FeedbackSequencer::new(Some(Box::new(transcript.clone())), ms(1000));
        let mut timers = TimerQueue::new();
        let t0 = Instant::now();

        seq.announce_sequence(words(&["hello", "help", "her"]), t0, &mut timers);
        assert_eq!(transcript.said(), ["hello"]);

        fire_due(&mut seq, &mut timers, t0 + ms(999));
        assert_eq!(transcript.said(), ["hello"]);

        fire_due(&mut seq, &mut timers, t0 + ms(1000));
        assert_eq!(transcript.said(), ["hello", "help"]);

        fire_due(&mut seq, &mut timers, t0 + ms(2000));
        assert_eq!(transcript.said(), ["hello", "help", "her"]);
        assert!(!seq.is_sequencing());
        assert!(timers.is_empty());
    }

    #[test]
    fn announce_cancels_remaining_sequence() {
        let transcript = Transcript::default();
        let mut seq = FeedbackSequencer::new(Some(Box::new(transcript.clone())), ms(1000));
        let mut timers = TimerQueue::new();
        let t0 = Instant::now();

        seq.announce_sequence(words(&["one", "two", "three"]), t0, &mut timers);
        seq.announce("rows", &mut timers);
        fire_due(&mut seq, &mut timers, t0 + ms(5000));

        assert_eq!(transcript.said(), ["one", "rows"]);
    }

    #[test]
    fn stale_generation_step_is_ignored() {
        let transcript = Transcript::default();
        let mut seq = FeedbackSequencer::new(Some(Box::new(transcript.clone())), ms(1000));
        let mut timers = TimerQueue::new();
        let t0 = Instant::now();

        seq.announce_sequence(words(&["a", "b"]), t0, &mut timers);
        let stale = seq.generation();
        seq.announce_sequence(words(&["x", "y"]), t0, &mut timers);

        seq.on_step(stale, t0 + ms(1000), &mut timers);
        assert_eq!(transcript.said(), ["a", "x"]);
    }

    #[test]
    fn blank_labels_are_skipped() {
        let transcript = Transcript::default();
        let mut seq = FeedbackSequencer::new(Some(Box::new(transcript.clone())), ms(1000));
        let mut timers = TimerQueue::new();
        let t0 = Instant::now();

        seq.announce("   ", &mut timers);
        seq.announce_sequence(words(&["", "go", " "]), t0, &mut timers);
        fire_due(&mut seq, &mut timers, t0 + ms(3000));

        assert_eq!(transcript.said(), ["go"]);
    }

    #[test]
    fn missing_backend_is_silent() {
        let mut seq = FeedbackSequencer::new(None, ms(1000));
        let mut timers = TimerQueue::new();

        seq.announce("anything", &mut timers);
        seq.announce_sequence(words(&["a", "b"]), Instant::now(), &mut timers);

        assert!(!seq.is_available());
        assert!(timers.is_empty());
    }

    #[test]
    fn failing_backend_does_not_stop_sequence() {
        let mut seq = FeedbackSequencer::new(Some(Box::new(Broken)), ms(1000));
        let mut timers = TimerQueue::new();
        let t0 = Instant::now();

        seq.announce_sequence(words(&["a", "b"]), t0, &mut timers);
        assert!(seq.is_sequencing());
        fire_due(&mut seq, &mut timers, t0 + ms(1000));
        assert!(!seq.is_sequencing());
    }

    #[test]
    fn disabling_stops_speech() {
        let transcript = Transcript::default();
        let mut seq = FeedbackSequencer::new(Some(Box::new(transcript.clone())), ms(1000));
        let mut timers = TimerQueue::new();
        let t0 = Instant::now();

        seq.announce_sequence(words(&["a", "b"]), t0, &mut timers);
        seq.set_enabled(false, &mut timers);
        seq.announce("ignored", &mut timers);
        fire_due(&mut seq, &mut timers, t0 + ms(2000));

        assert_eq!(transcript.said(), ["a"]);
        assert!(!seq.is_enabled());
    }
}
