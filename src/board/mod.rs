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

//! On-screen keyboard board state.
//!
//! This module provides the scannable layout driven by the engine: a text
//! row, a controls row, six character rows and, while there is a partial
//! word to complete, a row of predicted words. It also holds the help
//! overlay and the focus marks the renderer paints.

mod host;
mod words;

pub(crate) use host::BoardHost;

use switchscan::{Target, TargetId, TargetKind};
use tui_input::{Input, InputRequest};

const MAX_PREDICTIONS: usize = 5;

const CHARACTER_ROWS: [(&str, &str); 6] = [
    ("row1", "abcdef"),
    ("row2", "ghijkl"),
    ("row3", "mnopqr"),
    ("row4", "stuvwx"),
    ("row5", "yz0123"),
    ("row6", "456789"),
];

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum KeyAction {
    Insert(char),
    Delete,
    Clear,
    Speak,
    Help,
    Word(String),
    CloseHelp,
}

#[derive(Clone, Debug)]
pub(crate) struct Key {
    pub(crate) id: TargetId,
    pub(crate) caption: String,
    pub(crate) spoken: String,
    pub(crate) action: KeyAction,
}

impl Key {
    fn new(id: impl Into<String>, caption: impl Into<String>, action: KeyAction) -> Self {
        let caption = caption.into();
        Self {
            id: TargetId::new(id),
            spoken: caption.clone(),
            caption,
            action,
        }
    }

    fn character(c: char) -> Self {
        Self {
            id: TargetId::new(format!("key:{c}")),
            caption: c.to_string(),
            spoken: spoken_char(c),
            action: KeyAction::Insert(c),
        }
    }

    pub(crate) fn as_target(&self, kind: TargetKind) -> Target {
        Target {
            id: self.id.clone(),
            label: self.spoken.clone(),
            kind,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct BoardRow {
    pub(crate) target: Target,
    pub(crate) keys: Vec<Key>,
}

/// Side effects of activating a key that the board cannot apply itself.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Effect {
    RowsChanged,
    OpenHelp,
    CloseHelp,
    Say(String),
}

#[derive(Default)]
pub(crate) struct FocusMarks {
    pub(crate) row: Option<TargetId>,
    pub(crate) item: Option<TargetId>,
    pub(crate) overlay: Option<TargetId>,
}

#[derive(Default)]
pub(crate) struct Board {
    text: Input,
    help_open: bool,
    pub(crate) focus: FocusMarks,
}

impl Board {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn input(&self) -> &Input {
        &self.text
    }

    pub(crate) fn help_open(&self) -> bool {
        self.help_open
    }

    /// The visible rows, top to bottom.
    pub(crate) fn rows(&self) -> Vec<BoardRow> {
        let mut rows = vec![
            BoardRow {
                target: Target::new(
                    "row_text",
                    "text",
                    TargetKind::TextEntry {
                        text: self.text.value().to_string(),
                    },
                ),
                keys: vec![],
            },
            BoardRow {
                target: Target::row("row_controls", "controls"),
                keys: vec![
                    Key::new("ctl:space", "space", KeyAction::Insert(' ')),
                    Key::new("ctl:delete", "delete", KeyAction::Delete),
                    Key::new("ctl:clear", "clear", KeyAction::Clear),
                    Key::new("ctl:speak", "speak", KeyAction::Speak),
                    Key::new("ctl:help", "help", KeyAction::Help),
                ],
            },
        ];

        rows.extend(CHARACTER_ROWS.iter().map(|(id, chars)| {
            let keys: Vec<Key> = chars.chars().map(Key::character).collect();
            let label = keys
                .iter()
                .map(|k| k.spoken.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            BoardRow {
                target: Target::row(*id, label),
                keys,
            }
        }));

        let predictions = self.predictions();
        if !predictions.is_empty() {
            rows.push(BoardRow {
                target: Target::new("row_predict", "predictive text", TargetKind::Predictive),
                keys: predictions
                    .into_iter()
                    .map(|word| Key::new(format!("word:{word}"), word.clone(), KeyAction::Word(word)))
                    .collect(),
            });
        }

        rows
    }

    pub(crate) fn overlay_keys(&self) -> Vec<Key> {
        if !self.help_open {
            return vec![];
        }
        vec![
            Key::new("help:speak", "speak text", KeyAction::Speak),
            Key::new("help:clear", "clear text", KeyAction::Clear),
            Key::new("help:close", "close", KeyAction::CloseHelp),
        ]
    }

    /// Completions for the word currently being typed.
    pub(crate) fn predictions(&self) -> Vec<String> {
        let partial = current_word(self.text.value());
        if partial.is_empty() {
            return vec![];
        }
        words::COMMON
            .iter()
            .filter(|word| word.starts_with(partial) && **word != partial)
            .take(MAX_PREDICTIONS)
            .map(|word| word.to_string())
            .collect()
    }

    /// Performs the action behind `id` and reports what the host must do
    /// in response.
    pub(crate) fn activate(&mut self, id: &TargetId) -> Vec<Effect> {
        let Some(action) = self.find_action(id) else {
            return vec![];
        };

        let before = self.row_ids();
        let mut effects = vec![];

        match action {
            KeyAction::Insert(c) => {
                self.text.handle(InputRequest::InsertChar(c));
            }
            KeyAction::Delete => {
                self.text.handle(InputRequest::DeletePrevChar);
            }
            KeyAction::Clear => self.text.reset(),
            KeyAction::Speak => {
                let text = self.text.value().trim();
                let spoken = if text.is_empty() { "empty" } else { text };
                effects.push(Effect::Say(spoken.to_string()));
            }
            KeyAction::Help => {
                self.help_open = true;
                effects.push(Effect::OpenHelp);
            }
            KeyAction::CloseHelp => {
                self.help_open = false;
                effects.push(Effect::CloseHelp);
            }
            KeyAction::Word(word) => {
                let value = self.text.value();
                let keep = value.len() - current_word(value).len();
                let completed = format!("{}{} ", &value[..keep], word);
                self.text = Input::new(completed);
            }
        }

        if self.row_ids() != before {
            effects.push(Effect::RowsChanged);
        }
        effects
    }

    fn find_action(&self, id: &TargetId) -> Option<KeyAction> {
        self.rows()
            .into_iter()
            .flat_map(|row| row.keys)
            .chain(self.overlay_keys())
            .find(|key| &key.id == id)
            .map(|key| key.action)
    }

    fn row_ids(&self) -> Vec<TargetId> {
        self.rows().into_iter().map(|row| row.target.id).collect()
    }
}

/// The trailing run of non-space characters.
fn current_word(text: &str) -> &str {
    match text.rfind(' ') {
        Some(i) => &text[i + 1..],
        None => text,
    }
}

fn spoken_char(c: char) -> String {
    let name = match c {
        '0' => "zero",
        '1' => "one",
        '2' => "two",
        '3' => "three",
        '4' => "four",
        '5' => "five",
        '6' => "six",
        '7' => "seven",
        '8' => "eight",
        '9' => "nine",
        _ => return c.to_string(),
    };
    name.to_string()
}
