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

//! Speech backend for the terminal demo.
//!
//! Every utterance is shown as an on-screen caption. When a speech command is
//! configured (for example `espeak-ng` or `say`) it is also spawned with the
//! text as its final argument, and cancelled by killing the child process.

use std::{
    cell::RefCell,
    collections::VecDeque,
    process::{Child, Command, Stdio},
    rc::Rc,
};

use switchscan::{
    config::SpeechSettings,
    speech::{Speech, SpeechError},
};
use tracing::debug;

const CAPTION_HISTORY: usize = 4;

/// Most recent utterances, newest last.
#[derive(Clone, Default)]
pub(crate) struct Captions(Rc<RefCell<VecDeque<String>>>);

impl Captions {
    pub(crate) fn recent(&self) -> Vec<String> {
        self.0.borrow().iter().cloned().collect()
    }

    fn push(&self, text: &str) {
        let mut captions = self.0.borrow_mut();
        if captions.len() == CAPTION_HISTORY {
            captions.pop_front();
        }
        captions.push_back(text.to_string());
    }
}

pub(crate) struct Voice {
    captions: Captions,
    command: Option<(String, Vec<String>)>,
    child: Option<Child>,
}

impl Voice {
    pub(crate) fn new(settings: &SpeechSettings, captions: Captions) -> Self {
        let command = settings
            .command
            .as_ref()
            .filter(|c| !c.trim().is_empty())
            .map(|c| (c.clone(), settings.args.clone()));

        Self {
            captions,
            command,
            child: None,
        }
    }
}

impl Speech for Voice {
    fn say(&mut self, text: &str) -> Result<(), SpeechError> {
        self.captions.push(text);

        if let Some((program, args)) = &self.command {
            let child = Command::new(program)
                .args(args)
                .arg(text)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()?;
            debug!(pid = child.id(), text, "speaking");
            self.child = Some(child);
        }
        Ok(())
    }

    fn cancel(&mut self) -> Result<(), SpeechError> {
        if let Some(mut child) = self.child.take() {
            // Already exited is not an error worth reporting.
            if child.try_wait()?.is_none() {
                child.kill()?;
                child.wait()?;
            }
        }
        Ok(())
    }
}
