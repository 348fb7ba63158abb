// SPDX-License-Identifier: GPL-3.0-or-later
// hotkeys - Hotkey specification and compiler

use crate::error::{HotkeyError, Result};
use crate::keymap::{combo_display, key_code};
use std::fmt;
use toml::Value;

/// Ordered mapping of action name -> combo string (e.g. `save = "ctrl:cmd:s"`).
///
/// Re-inserting an action replaces its combo but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HotkeySpec {
    entries: Vec<(String, String)>,
}

impl HotkeySpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the combo bound to `action`.
    pub fn insert(&mut self, action: impl Into<String>, combo: impl Into<String>) {
        let action = action.into();
        let combo = combo.into();
        match self.entries.iter_mut().find(|(name, _)| *name == action) {
            Some(entry) => entry.1 = combo,
            None => self.entries.push((action, combo)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(a, c)| (a.as_str(), c.as_str()))
    }

    /// Builds a spec from a dynamic TOML value. Anything but a table of
    /// strings is an [`HotkeyError::InvalidSpecification`].
    pub fn from_value(value: &Value) -> Result<Self> {
        let table = value.as_table().ok_or_else(|| {
            HotkeyError::InvalidSpecification(format!("expected a table, found {}", value.type_str()))
        })?;

        let mut spec = Self::new();
        for (action, combo) in table {
            let combo = combo.as_str().ok_or_else(|| {
                HotkeyError::InvalidSpecification(format!(
                    "combo for `{}` must be a string, found {}",
                    action,
                    combo.type_str()
                ))
            })?;
            spec.insert(action.as_str(), combo);
        }
        Ok(spec)
    }
}

impl<A, C> FromIterator<(A, C)> for HotkeySpec
where
    A: Into<String>,
    C: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (A, C)>>(iter: I) -> Self {
        let mut spec = Self::new();
        for (action, combo) in iter {
            spec.insert(action, combo);
        }
        spec
    }
}

/// One compiled hotkey: the modifier set plus the resolved key code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompiledHotkey {
    /// Normalized combo string, also the notification suffix.
    pub combo_label: String,
    pub action_name: String,
    /// `None` when the key name was not in the key table. Such a record never matches.
    pub key_code: Option<u32>,
    pub cmd: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl CompiledHotkey {
    /// Parses a single combo (e.g. "ctrl:cmd:s") for `action_name`.
    pub fn parse(action_name: &str, combo: &str) -> Self {
        let combo_label = combo.trim().to_lowercase();
        let mut record = Self {
            combo_label,
            action_name: action_name.to_string(),
            key_code: None,
            cmd: false,
            ctrl: false,
            alt: false,
            shift: false,
        };

        for token in record.combo_label.split(':') {
            match token {
                "cmd" => record.cmd = true,
                "ctrl" => record.ctrl = true,
                "alt" => record.alt = true,
                "shift" => record.shift = true,
                // Last key token wins, even when it does not resolve.
                key => record.key_code = key_code(key),
            }
        }

        record
    }

    pub fn is_resolved(&self) -> bool {
        self.key_code.is_some()
    }

    /// Name of the notification emitted when this hotkey fires.
    pub fn event_name(&self) -> String {
        format!("hotkey:{}", self.combo_label)
    }
}

/// Formats for display (e.g. "ctrl:cmd:s" -> "Cmd+Ctrl+S").
impl fmt::Display for CompiledHotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = combo_display(self.cmd, self.ctrl, self.alt, self.shift, self.key_code);
        f.write_str(&label)
    }
}

/// Compiles every entry of `spec`, in order.
pub fn compile(spec: &HotkeySpec) -> Vec<CompiledHotkey> {
    let records: Vec<CompiledHotkey> = spec
        .iter()
        .map(|(action, combo)| {
            let record = CompiledHotkey::parse(action, combo);
            if !record.is_resolved() {
                tracing::warn!(
                    action = %record.action_name,
                    combo = %record.combo_label,
                    "hotkey has no known key and will never fire"
                );
            }
            record
        })
        .collect();

    tracing::debug!(count = records.len(), "compiled hotkeys");
    records
}

/// Compiles a dynamic TOML value; fails without producing records when the
/// value is not a table of strings.
pub fn compile_value(value: &Value) -> Result<Vec<CompiledHotkey>> {
    let spec = HotkeySpec::from_value(value)?;
    Ok(compile(&spec))
}
