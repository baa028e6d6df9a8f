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

//! A recording host for driving the engine through raw switch events on a
//! virtual clock.

#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::HashMap,
    rc::Rc,
    time::{Duration, Instant},
};

use switchscan::{
    Channel, Collaborators, ScanEngine, Target, TargetId,
    config::ScanConfig,
    speech::{Speech, SpeechError},
    targets::{Activator, FocusScope, Renderer, TargetProvider},
};

#[derive(Default)]
pub struct Surface {
    pub rows: Vec<Target>,
    pub items: HashMap<TargetId, Vec<Target>>,
    pub overlay: Vec<Target>,
    pub activated: Vec<TargetId>,
    pub said: Vec<String>,
    pub focus: Option<(FocusScope, TargetId)>,
}

#[derive(Clone, Default)]
pub struct Host(pub Rc<RefCell<Surface>>);

impl TargetProvider for Host {
    fn rows(&self) -> Vec<Target> {
        self.0.borrow().rows.clone()
    }

    fn items(&self, row: &TargetId) -> Vec<Target> {
        self.0.borrow().items.get(row).cloned().unwrap_or_default()
    }

    fn overlay_targets(&self) -> Vec<Target> {
        self.0.borrow().overlay.clone()
    }
}

impl Renderer for Host {
    fn set_focus(&mut self, target: &Target, scope: FocusScope) {
        self.0.borrow_mut().focus = Some((scope, target.id.clone()));
    }

    fn clear_focus(&mut self, scope: FocusScope) {
        let mut surface = self.0.borrow_mut();
        if surface.focus.as_ref().is_some_and(|(s, _)| *s == scope) {
            surface.focus = None;
        }
    }
}

impl Activator for Host {
    fn activate(&mut self, target: &Target) {
        self.0.borrow_mut().activated.push(target.id.clone());
    }
}

impl Speech for Host {
    fn say(&mut self, text: &str) -> Result<(), SpeechError> {
        self.0.borrow_mut().said.push(text.to_string());
        Ok(())
    }

    fn cancel(&mut self) -> Result<(), SpeechError> {
        Ok(())
    }
}

impl Host {
    /// Adds a plain row with one item per label.
    pub fn add_row(&self, id: &str, labels: &[&str]) {
        let row = Target::row(id, id);
        let items = labels
            .iter()
            .enumerate()
            .map(|(i, label)| Target::item(format!("{id}/{i}"), *label))
            .collect();

        let mut surface = self.0.borrow_mut();
        surface.items.insert(row.id.clone(), items);
        surface.rows.push(row);
    }

    pub fn set_overlay(&self, labels: &[&str]) {
        self.0.borrow_mut().overlay = labels
            .iter()
            .map(|label| Target::overlay_button(*label, *label))
            .collect();
    }

    pub fn said(&self) -> Vec<String> {
        self.0.borrow().said.clone()
    }

    pub fn last_said(&self) -> Option<String> {
        self.0.borrow().said.last().cloned()
    }

    pub fn activated(&self) -> Vec<String> {
        self.0.borrow().activated.iter().map(|id| id.to_string()).collect()
    }
}

/// An engine plus a virtual clock advanced by the helpers.
pub struct Rig {
    pub host: Host,
    pub engine: ScanEngine,
    pub now: Instant,
}

impl Rig {
    pub fn new(host: Host) -> Self {
        Self::with_config(host, &ScanConfig::default())
    }

    pub fn with_config(host: Host, config: &ScanConfig) -> Self {
        let collaborators = Collaborators::new(
            Box::new(host.clone()),
            Box::new(host.clone()),
            Box::new(host.clone()),
        )
        .with_speech(Box::new(host.clone()));

        Self {
            host,
            engine: ScanEngine::new(config, collaborators),
            now: Instant::now(),
        }
    }

    /// Lets `ms` pass, firing any timers that fall due.
    pub fn wait(&mut self, ms: u64) {
        // Small steps so timers fire at their own deadline, not all at the end.
        for _ in 0..ms / 10 {
            self.now += Duration::from_millis(10);
            self.engine.tick(self.now);
        }
        self.now += Duration::from_millis(ms % 10);
        self.engine.tick(self.now);
    }

    /// Presses `channel`, holds it for `held` ms and releases.
    pub fn press(&mut self, channel: Channel, held: u64) {
        self.engine.on_channel_down(channel, self.now);
        self.wait(held);
        self.engine.on_channel_up(channel, self.now);
    }

    /// A short primary press followed by enough idle time to clear the
    /// cooldown.
    pub fn next(&mut self) {
        self.press(Channel::Primary, 300);
        self.wait(600);
    }

    pub fn select(&mut self) {
        self.press(Channel::Secondary, 100);
        self.wait(600);
    }

    pub fn hold_select(&mut self) {
        self.press(Channel::Secondary, 3100);
        self.wait(600);
    }
}
