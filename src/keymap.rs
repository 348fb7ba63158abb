// SPDX-License-Identifier: GPL-3.0-or-later
// hotkeys - Key name table

use std::collections::HashMap;
use std::sync::LazyLock;

/// Named keys with their key codes. Letters, digits and function keys are
/// generated in [`KEY_TABLE`].
const NAMED_KEYS: &[(&str, u32)] = &[
    ("backspace", 8),
    ("tab", 9),
    ("enter", 13),
    ("return", 13),
    ("pause", 19),
    ("esc", 27),
    ("space", 32),
    ("pageup", 33),
    ("pagedown", 34),
    ("end", 35),
    ("home", 36),
    ("left", 37),
    ("up", 38),
    ("right", 39),
    ("down", 40),
    ("delete", 46),
    ("+", 107),
    ("-", 109),
];

const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

const LETTERS: [&str; 26] = [
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r",
    "s", "t", "u", "v", "w", "x", "y", "z",
];

const FUNCTION_KEYS: [&str; 12] = [
    "f1", "f2", "f3", "f4", "f5", "f6", "f7", "f8", "f9", "f10", "f11", "f12",
];

/// Lowercase key name -> key code, built once per process.
pub static KEY_TABLE: LazyLock<HashMap<&'static str, u32>> = LazyLock::new(|| {
    let mut table: HashMap<&'static str, u32> = NAMED_KEYS.iter().copied().collect();
    table.extend(DIGITS.iter().zip(48u32..).map(|(name, code)| (*name, code)));
    table.extend(LETTERS.iter().zip(65u32..).map(|(name, code)| (*name, code)));
    table.extend(FUNCTION_KEYS.iter().zip(112u32..).map(|(name, code)| (*name, code)));
    table
});

/// Looks up a key name. Names are expected lowercase; unknown or empty names
/// return `None`.
pub fn key_code(name: &str) -> Option<u32> {
    if name.is_empty() {
        return None;
    }
    KEY_TABLE.get(name).copied()
}

/// Display name for a key code (e.g. 83 -> "S", 116 -> "F5", 46 -> "Delete").
/// Where two names share a code, the first in the table wins ("enter" over "return").
pub fn key_display_name(code: u32) -> Option<String> {
    match code {
        48..=57 | 65..=90 => char::from_u32(code).map(|c| c.to_string()),
        112..=123 => Some(format!("F{}", code - 111)),
        107 => Some("+".to_string()),
        109 => Some("-".to_string()),
        _ => NAMED_KEYS
            .iter()
            .find(|(_, c)| *c == code)
            .map(|(name, _)| capitalize(name)),
    }
}

/// Human-readable combo such as "Cmd+Ctrl+S". An unknown key renders as "?".
pub fn combo_display(cmd: bool, ctrl: bool, alt: bool, shift: bool, code: Option<u32>) -> String {
    let mut parts = Vec::new();
    if cmd {
        parts.push("Cmd".to_string());
    }
    if ctrl {
        parts.push("Ctrl".to_string());
    }
    if alt {
        parts.push("Alt".to_string());
    }
    if shift {
        parts.push("Shift".to_string());
    }
    parts.push(code.and_then(key_display_name).unwrap_or_else(|| "?".to_string()));
    parts.join("+")
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_every_documented_entry() {
        // 18 named + 10 digits + 26 letters + 12 function keys
        assert_eq!(KEY_TABLE.len(), 66);
    }

    #[test]
    fn resolves_named_keys_and_ranges() {
        assert_eq!(key_code("backspace"), Some(8));
        assert_eq!(key_code("enter"), Some(13));
        assert_eq!(key_code("return"), Some(13));
        assert_eq!(key_code("delete"), Some(46));
        assert_eq!(key_code("0"), Some(48));
        assert_eq!(key_code("9"), Some(57));
        assert_eq!(key_code("a"), Some(65));
        assert_eq!(key_code("s"), Some(83));
        assert_eq!(key_code("z"), Some(90));
        assert_eq!(key_code("+"), Some(107));
        assert_eq!(key_code("-"), Some(109));
        assert_eq!(key_code("f1"), Some(112));
        assert_eq!(key_code("f12"), Some(123));
    }

    #[test]
    fn unknown_and_empty_names_are_absent() {
        assert_eq!(key_code(""), None);
        assert_eq!(key_code("f13"), None);
        assert_eq!(key_code("escape"), None);
        // The table is lowercase only.
        assert_eq!(key_code("S"), None);
    }

    #[test]
    fn display_names() {
        assert_eq!(key_display_name(83).as_deref(), Some("S"));
        assert_eq!(key_display_name(50).as_deref(), Some("2"));
        assert_eq!(key_display_name(116).as_deref(), Some("F5"));
        assert_eq!(key_display_name(13).as_deref(), Some("Enter"));
        assert_eq!(key_display_name(46).as_deref(), Some("Delete"));
        assert_eq!(key_display_name(107).as_deref(), Some("+"));
        assert_eq!(key_display_name(200), None);
    }

    #[test]
    fn combo_display_orders_modifiers() {
        assert_eq!(combo_display(true, true, false, false, Some(83)), "Cmd+Ctrl+S");
        assert_eq!(combo_display(false, false, true, true, Some(9)), "Alt+Shift+Tab");
        assert_eq!(combo_display(false, false, false, false, None), "?");
    }
}
