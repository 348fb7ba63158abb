// SPDX-License-Identifier: GPL-3.0-or-later
// hotkeys - Declarative keyboard shortcut behavior for views

use thiserror::Error;

/// Errors raised while building a hotkey behavior from dynamic options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HotkeyError {
    /// The hotkeys value is not a mapping, or one of its combos is not a string.
    #[error("hotkeys option must be a table of action = \"combo\" entries: {0}")]
    InvalidSpecification(String),

    /// An option was present with the wrong type.
    #[error("option `{name}` must be {expected}")]
    InvalidOption {
        name: &'static str,
        expected: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, HotkeyError>;
