// SPDX-License-Identifier: GPL-3.0-or-later
// hotkeys - Key event matching

use crate::hotkey::CompiledHotkey;
use crate::keymap::{combo_display, key_code};
use crossterm::event::{KeyCode, KeyModifiers};
use std::fmt;

/// A key press: numeric key code plus the modifier state at press time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: u32,
    pub cmd: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl KeyEvent {
    /// A press of `code` with no modifiers held.
    pub fn new(code: u32) -> Self {
        Self {
            code,
            ..Self::default()
        }
    }

    pub fn with_cmd(mut self) -> Self {
        self.cmd = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Translates a terminal key press. Returns `None` for keys that have no
    /// code in the key model (Insert, media keys, most punctuation).
    pub fn from_crossterm(event: &crossterm::event::KeyEvent) -> Option<Self> {
        let mods = event.modifiers;
        let mut shift = mods.contains(KeyModifiers::SHIFT);

        let code = match event.code {
            KeyCode::Backspace => 8,
            KeyCode::Tab => 9,
            KeyCode::BackTab => {
                shift = true;
                9
            }
            KeyCode::Enter => 13,
            KeyCode::Pause => 19,
            KeyCode::Esc => 27,
            KeyCode::PageUp => 33,
            KeyCode::PageDown => 34,
            KeyCode::End => 35,
            KeyCode::Home => 36,
            KeyCode::Left => 37,
            KeyCode::Up => 38,
            KeyCode::Right => 39,
            KeyCode::Down => 40,
            KeyCode::Delete => 46,
            KeyCode::F(n @ 1..=12) => 111 + u32::from(n),
            KeyCode::Char(' ') => 32,
            KeyCode::Char(c) => {
                if c.is_ascii_uppercase() {
                    // Terminals do not always report shift for capitals.
                    shift = true;
                }
                let name = c.to_ascii_lowercase().to_string();
                key_code(&name)?
            }
            _ => return None,
        };

        Some(Self {
            code,
            cmd: mods.intersects(KeyModifiers::SUPER | KeyModifiers::META),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
            shift,
        })
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = combo_display(self.cmd, self.ctrl, self.alt, self.shift, Some(self.code));
        write!(f, "{} ({})", label, self.code)
    }
}

/// True when the record's key code and all four modifiers equal the event's.
/// Extra held modifiers prevent a match.
pub fn matches(record: &CompiledHotkey, event: &KeyEvent) -> bool {
    record.key_code == Some(event.code)
        && record.cmd == event.cmd
        && record.ctrl == event.ctrl
        && record.alt == event.alt
        && record.shift == event.shift
}

/// Returns the records matching `event`, in registration order.
pub fn match_event<'a>(records: &'a [CompiledHotkey], event: &KeyEvent) -> Vec<&'a CompiledHotkey> {
    records.iter().filter(|r| matches(r, event)).collect()
}
