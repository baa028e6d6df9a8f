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

//! Diagnostic logging.
//!
//! The terminal belongs to the user interface, so log output goes to
//! `switchscan.log` beside the configuration file. The filter is taken from
//! `SWITCHSCAN_LOG`, then `RUST_LOG`, then defaults to `info`.

use std::{fs::File, path::PathBuf, sync::Mutex};

use anyhow::{Context, Result};
use switchscan::config;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE: &str = "switchscan.log";

/// Installs the global subscriber, returning the path of the log file.
///
/// # Errors
///
/// Returns an error if the configuration directory cannot be resolved or the
/// log file cannot be created.
pub(crate) fn init_logging() -> Result<PathBuf> {
    let dir = config::config_dir().context("Failed to locate configuration directory")?;
    std::fs::create_dir_all(&dir).context("Failed to create configuration directory")?;

    let path = dir.join(LOG_FILE);
    let file = File::create(&path).context("Failed to create log file")?;

    tracing_subscriber::registry()
        .with(build_env_filter())
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .init();

    Ok(path)
}

fn build_env_filter() -> EnvFilter {
    if let Ok(directives) = std::env::var("SWITCHSCAN_LOG")
        && let Ok(filter) = EnvFilter::try_new(&directives)
    {
        return filter;
    }

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}
