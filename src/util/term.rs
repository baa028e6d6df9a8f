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

//! Terminal environment utilities.
//!
//! Background colour control through OSC escape sequences, and the keyboard
//! enhancement protocol that makes the terminal report key releases. Both
//! depend on the terminal emulator, so callers treat failures as
//! non-fatal.

use std::io::{self, Write};

use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::supports_keyboard_enhancement,
};

/// Sets the terminal background colour using an OSC 11 escape sequence.
///
/// # Arguments
///
/// * `hex_color` - The colour as a hex string (e.g., `"#1e1e1e"`).
pub(crate) fn set_terminal_bg(hex_color: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "\x1b]11;{hex_color}\x07")?;
    stdout.flush()
}

/// Resets the terminal background to the user's own colour (OSC 111).
pub(crate) fn reset_terminal_bg() -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "\x1b]111\x07")?;
    stdout.flush()
}

/// Asks the terminal to report key release and repeat events.
///
/// Returns `false` if the terminal does not support the protocol, in which
/// case only presses will arrive.
pub(crate) fn enable_key_releases() -> io::Result<bool> {
    if !supports_keyboard_enhancement()? {
        return Ok(false);
    }
    execute!(
        io::stdout(),
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
    )?;
    Ok(true)
}

pub(crate) fn disable_key_releases() -> io::Result<()> {
    execute!(io::stdout(), PopKeyboardEnhancementFlags)
}
