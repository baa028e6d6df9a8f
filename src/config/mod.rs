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

//! Scanning configuration.
//!
//! This module manages the configuration file holding the gesture timing
//! thresholds, the fixed spoken phrases and the announcement policy.
//!
//! Durations are stored as whole milliseconds so the file stays easy to edit
//! by hand.

use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_NAME: &str = "switchscan";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("short press minimum ({short_min_ms}ms) must be below the maximum ({short_max_ms}ms)")]
    ShortWindow { short_min_ms: u64, short_max_ms: u64 },

    #[error("{0} hold threshold must be greater than zero")]
    ZeroHold(&'static str),

    #[error(transparent)]
    Store(#[from] confy::ConfyError),
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScanConfig {
    pub version: u32,
    pub timing: ScanTiming,
    pub phrases: Phrases,
    pub announce: AnnouncePolicy,
    pub speech: SpeechSettings,
}

/// Gesture classification thresholds, in milliseconds.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
#[serde(default)]
pub struct ScanTiming {
    pub short_min_ms: u64,
    pub short_max_ms: u64,
    pub reverse_hold_ms: u64,
    pub long_select_hold_ms: u64,
    pub cooldown_ms: u64,
    /// Gap between consecutive labels of a sequential read-aloud.
    pub sequence_gap_ms: u64,
    /// Time allowed for the host UI to lay out an overlay before it is focused.
    pub overlay_settle_ms: u64,
}

impl Default for ScanTiming {
    fn default() -> Self {
        Self {
            short_min_ms: 250,
            short_max_ms: 3000,
            reverse_hold_ms: 2500,
            long_select_hold_ms: 3000,
            cooldown_ms: 500,
            sequence_gap_ms: 1000,
            overlay_settle_ms: 100,
        }
    }
}

impl ScanTiming {
    pub fn short_min(&self) -> Duration {
        Duration::from_millis(self.short_min_ms)
    }

    pub fn short_max(&self) -> Duration {
        Duration::from_millis(self.short_max_ms)
    }

    pub fn reverse_hold(&self) -> Duration {
        Duration::from_millis(self.reverse_hold_ms)
    }

    pub fn long_select_hold(&self) -> Duration {
        Duration::from_millis(self.long_select_hold_ms)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    pub fn sequence_gap(&self) -> Duration {
        Duration::from_millis(self.sequence_gap_ms)
    }

    pub fn overlay_settle(&self) -> Duration {
        Duration::from_millis(self.overlay_settle_ms)
    }

    /// Checks the relationships between thresholds that classification relies
    /// on.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the short press window is empty or either
    /// hold threshold is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.short_min_ms >= self.short_max_ms {
            return Err(ConfigError::ShortWindow {
                short_min_ms: self.short_min_ms,
                short_max_ms: self.short_max_ms,
            });
        }
        if self.reverse_hold_ms == 0 {
            return Err(ConfigError::ZeroHold("reverse"));
        }
        if self.long_select_hold_ms == 0 {
            return Err(ConfigError::ZeroHold("long select"));
        }
        Ok(())
    }
}

/// Fixed phrases spoken by the engine.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(default)]
pub struct Phrases {
    /// Spoken when the text entry row is selected while blank.
    pub empty: String,
    /// Spoken when hold-select escapes from items back to rows.
    pub rows: String,
    pub item_fallback: String,
    pub row_fallback: String,
}

impl Default for Phrases {
    fn default() -> Self {
        Self {
            empty: "empty".to_string(),
            rows: "rows".to_string(),
            item_fallback: "button".to_string(),
            row_fallback: "row".to_string(),
        }
    }
}

/// Controls when the focused target is announced beyond the normal traversal
/// announcements.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
#[serde(default)]
pub struct AnnouncePolicy {
    /// Re-announce the focused target when a refresh changes the live list.
    pub announce_on_refresh: bool,
    /// Speak the text entry row's label when it gains focus.
    pub announce_text_row_focus: bool,
}

impl Default for AnnouncePolicy {
    fn default() -> Self {
        Self {
            announce_on_refresh: true,
            announce_text_row_focus: false,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(default)]
pub struct SpeechSettings {
    pub enabled: bool,
    /// External text-to-speech program, invoked with the text as its last
    /// argument.
    pub command: Option<String>,
    pub args: Vec<String>,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            command: None,
            args: vec![],
        }
    }
}

pub fn load_config() -> ScanConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

pub fn save_config(cfg: &ScanConfig) -> Result<(), ConfigError> {
    confy::store(CONFIG_NAME, None, cfg)?;
    Ok(())
}

/// Returns the directory holding the configuration file, used for sibling
/// files such as the log.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let path = confy::get_configuration_file_path(CONFIG_NAME, None)?;
    Ok(path.parent().map(PathBuf::from).unwrap_or_default())
}
