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

//! The scan state machine.
//!
//! [`ScanEngine`] owns the [`ScanContext`] and every collaborator injected at
//! construction. The host feeds it three kinds of input, all on one thread:
//!
//! * switch presses and releases ([`ScanEngine::on_channel_down`],
//!   [`ScanEngine::on_channel_up`]),
//! * the passage of time ([`ScanEngine::tick`]), which fires due timers,
//! * interface changes ([`ScanEngine::open_overlay`],
//!   [`ScanEngine::close_overlay`], [`ScanEngine::refresh`]).
//!
//! Every entry point runs to completion. Nothing in here fails: empty lists,
//! stale timers and missing speech all degrade to "input ignored".

mod commands;
mod overlay;

use std::time::Instant;

use tracing::debug;

use crate::{
    config::{AnnouncePolicy, Phrases, ScanConfig},
    input::InputDisambiguator,
    model::{Channel, Command, Mode, Target, TargetId},
    speech::{FeedbackSequencer, Speech},
    targets::{Activator, FocusScope, Renderer, TargetProvider},
    timing::{FiredTimer, Scheduler, TimerHandle, TimerKind, TimerQueue},
};

/// The scanning position, mutated only by [`ScanEngine`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ScanContext {
    mode: Mode,
    row_index: usize,
    item_index: usize,
    overlay_active: bool,
    overlay_index: usize,
    suppress_next_announcement: bool,
}

impl ScanContext {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn row_index(&self) -> usize {
        self.row_index
    }

    pub fn item_index(&self) -> usize {
        self.item_index
    }

    pub fn overlay_active(&self) -> bool {
        self.overlay_active
    }

    pub fn overlay_index(&self) -> usize {
        self.overlay_index
    }

    pub fn suppress_next_announcement(&self) -> bool {
        self.suppress_next_announcement
    }
}

/// The collaborators an engine is built from.
pub struct Collaborators {
    pub targets: Box<dyn TargetProvider>,
    pub renderer: Box<dyn Renderer>,
    pub activator: Box<dyn Activator>,
    pub speech: Option<Box<dyn Speech>>,
    pub timers: Box<dyn Scheduler>,
}

impl Collaborators {
    /// Bundles the required collaborators with no speech backend and a
    /// [`TimerQueue`] scheduler.
    pub fn new(
        targets: Box<dyn TargetProvider>,
        renderer: Box<dyn Renderer>,
        activator: Box<dyn Activator>,
    ) -> Self {
        Self {
            targets,
            renderer,
            activator,
            speech: None,
            timers: Box::new(TimerQueue::new()),
        }
    }

    pub fn with_speech(mut self, speech: Box<dyn Speech>) -> Self {
        self.speech = Some(speech);
        self
    }

    pub fn with_scheduler(mut self, timers: Box<dyn Scheduler>) -> Self {
        self.timers = timers;
        self
    }
}

/// Identifies which of the three target lists is live, for refresh
/// bookkeeping.
#[derive(Clone, Debug, Eq, PartialEq)]
enum LiveList {
    Rows,
    Items(TargetId),
    Overlay,
}

/// What the last refresh applied, so an unchanged refresh can be skipped.
#[derive(Clone, Debug, Eq, PartialEq)]
struct RefreshSnapshot {
    live: LiveList,
    ids: Vec<TargetId>,
    index: usize,
}

pub struct ScanEngine {
    ctx: ScanContext,
    phrases: Phrases,
    policy: AnnouncePolicy,
    overlay_settle: std::time::Duration,

    input: InputDisambiguator,
    feedback: FeedbackSequencer,

    timers: Box<dyn Scheduler>,
    targets: Box<dyn TargetProvider>,
    renderer: Box<dyn Renderer>,
    activator: Box<dyn Activator>,

    overlay_timer: Option<TimerHandle>,
    last_refresh: Option<RefreshSnapshot>,
    /// The target most recently handed to the renderer, and its scope.
    focused: Option<(FocusScope, TargetId)>,
}

impl ScanEngine {
    /// Creates an engine in row mode at the first row with no overlay.
    pub fn new(config: &ScanConfig, collaborators: Collaborators) -> Self {
        let timing = config.timing;

        let mut feedback = FeedbackSequencer::new(collaborators.speech, timing.sequence_gap());
        let mut timers = collaborators.timers;
        feedback.set_enabled(config.speech.enabled, timers.as_mut());

        Self {
            ctx: ScanContext::default(),
            phrases: config.phrases.clone(),
            policy: config.announce,
            overlay_settle: timing.overlay_settle(),
            input: InputDisambiguator::new(timing),
            feedback,
            timers,
            targets: collaborators.targets,
            renderer: collaborators.renderer,
            activator: collaborators.activator,
            overlay_timer: None,
            last_refresh: None,
            focused: None,
        }
    }

    pub fn context(&self) -> &ScanContext {
        &self.ctx
    }

    pub fn cooldown_until(&self) -> Option<Instant> {
        self.input.cooldown_until()
    }

    pub fn is_channel_down(&self, channel: Channel) -> bool {
        self.input.is_down(channel)
    }

    pub fn speech_enabled(&self) -> bool {
        self.feedback.is_enabled()
    }

    pub fn set_speech_enabled(&mut self, enabled: bool) {
        self.feedback.set_enabled(enabled, self.timers.as_mut());
    }

    /// Silences speech and abandons any read-aloud in progress.
    pub fn stop_speech(&mut self) {
        self.feedback.stop(self.timers.as_mut());
    }

    /// Speaks host-supplied text, interrupting whatever is being spoken.
    pub fn say(&mut self, text: &str) {
        self.announce(text);
    }

    /// A short description of the current scanning context.
    pub fn status_text(&self) -> String {
        let mode = if self.ctx.overlay_active {
            "Overlay"
        } else {
            match self.ctx.mode {
                Mode::Rows => "Rows",
                Mode::Items => "Keys",
            }
        };
        format!("Mode: {mode}")
    }

    /// Focuses and announces the first row. Call once the host has laid out
    /// its interface.
    pub fn start(&mut self) {
        let rows = self.targets.rows();
        self.ctx.row_index = clamp(self.ctx.row_index, rows.len());
        if let Some(row) = rows.get(self.ctx.row_index) {
            self.show_row(row);
        }
    }

    pub fn on_channel_down(&mut self, channel: Channel, now: Instant) {
        self.input
            .on_down(channel, now, self.ctx.overlay_active, self.timers.as_mut());
    }

    /// Records a release. Hold timers already due fire first, so a release
    /// that beats the next tick is still classified as the hold it was.
    pub fn on_channel_up(&mut self, channel: Channel, now: Instant) {
        self.tick(now);
        if let Some(command) = self.input.on_up(channel, now, self.timers.as_mut()) {
            self.execute(command, now);
        }
    }

    /// Fires every timer due at `now`.
    pub fn tick(&mut self, now: Instant) {
        while let Some(fired) = self.timers.poll(now) {
            self.on_timer(fired, now);
        }
    }

    /// Handles one fired timer. Hosts driving their own [`Scheduler`] call
    /// this directly instead of [`ScanEngine::tick`].
    pub fn on_timer(&mut self, fired: FiredTimer, now: Instant) {
        match fired.kind {
            TimerKind::Reverse | TimerKind::LongSelect => {
                let overlay_active = self.ctx.overlay_active;
                if let Some(command) = self.input.on_timer(fired, now, overlay_active) {
                    self.execute(command, now);
                }
            }
            TimerKind::Sequence { generation } => {
                self.feedback.on_step(generation, now, self.timers.as_mut());
            }
            TimerKind::OverlaySettle => self.settle_overlay(fired.handle),
        }
    }

    /// Runs a command against the current context.
    ///
    /// This bypasses gesture classification and the cooldown, it is the
    /// entry point the disambiguator's output is routed through.
    pub fn execute(&mut self, command: Command, now: Instant) {
        debug!(?command, mode = ?self.ctx.mode, overlay = self.ctx.overlay_active, "command");
        self.last_refresh = None;

        match command {
            Command::Advance => self.step(true),
            Command::Reverse => self.step(false),
            Command::Select => self.select(),
            Command::HoldSelect => self.hold_select(now),
        }
    }

    fn current_row(&mut self) -> Option<Target> {
        let mut rows = self.targets.rows();
        if rows.is_empty() {
            return None;
        }
        self.ctx.row_index = clamp(self.ctx.row_index, rows.len());
        Some(rows.swap_remove(self.ctx.row_index))
    }

    fn show_row(&mut self, row: &Target) {
        self.unfocus(FocusScope::Items);
        self.focus(row, FocusScope::Rows);
        if let Some(label) = self.row_label(row) {
            self.announce_focus(&label);
        }
    }

    fn show_item(&mut self, item: &Target) {
        self.focus(item, FocusScope::Items);
        let label = self.item_label(item);
        self.announce_focus(&label);
    }

    fn show_overlay_target(&mut self, target: &Target) {
        self.focus(target, FocusScope::Overlay);
        let label = self.item_label(target);
        self.announce_focus(&label);
    }

    fn focus(&mut self, target: &Target, scope: FocusScope) {
        self.renderer.set_focus(target, scope);
        self.focused = Some((scope, target.id.clone()));
    }

    fn unfocus(&mut self, scope: FocusScope) {
        self.renderer.clear_focus(scope);
        if self.focused.as_ref().is_some_and(|(s, _)| *s == scope) {
            self.focused = None;
        }
    }

    /// Whether `target` is already the focused target in `scope`.
    fn is_focused(&self, target: &Target, scope: FocusScope) -> bool {
        self.focused
            .as_ref()
            .is_some_and(|(s, id)| *s == scope && *id == target.id)
    }

    /// Re-focuses the current row after returning from item mode.
    fn show_current_row(&mut self) {
        match self.current_row() {
            Some(row) => self.show_row(&row),
            None => self.unfocus(FocusScope::Rows),
        }
    }

    /// Announces a newly focused target unless the one-shot suppression flag
    /// is set, in which case the flag is consumed instead.
    fn announce_focus(&mut self, label: &str) {
        if std::mem::take(&mut self.ctx.suppress_next_announcement) {
            return;
        }
        self.feedback.announce(label, self.timers.as_mut());
    }

    fn announce(&mut self, label: &str) {
        self.feedback.announce(label, self.timers.as_mut());
    }

    fn row_label(&self, row: &Target) -> Option<String> {
        if row.is_text_entry() && !self.policy.announce_text_row_focus {
            return None;
        }
        let label = row.spoken_label().unwrap_or(self.phrases.row_fallback.as_str());
        Some(label.to_string())
    }

    fn item_label(&self, item: &Target) -> String {
        item.spoken_label()
            .unwrap_or(self.phrases.item_fallback.as_str())
            .to_string()
    }
}

/// Clamps `index` into `[0, len)`, or to zero for an empty list.
fn clamp(index: usize, len: usize) -> usize {
    if len == 0 { 0 } else { index.min(len - 1) }
}

/// Moves one step with wraparound, after clamping. `None` for an empty list.
fn wrap_step(index: usize, len: usize, forward: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let index = index.min(len - 1);
    Some(if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    })
}
