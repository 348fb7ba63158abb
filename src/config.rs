// SPDX-License-Identifier: GPL-3.0-or-later
// hotkeys - Playground configuration (config.toml)

use crate::behavior::HotkeysOptions;
use crate::error::HotkeyError;
use crate::hotkey::HotkeySpec;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use toml::Value;

/// Hotkeys written to a fresh config file, in order.
const DEFAULT_HOTKEYS: &[(&str, &str)] = &[
    ("save", "ctrl:s"),
    ("destroy", "delete"),
    ("help", "f1"),
    ("clear", "ctrl:l"),
    ("teardown", "ctrl:t"),
    ("quit", "ctrl:q"),
];

/// Playground appearance and focus handling.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Border style: "rounded", "double", "thick", "plain".
    pub border_style: String,
    /// Combo that moves focus between the view and the outside pane.
    pub focus_key: String,
    /// Log lines kept on screen.
    pub max_log_entries: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            border_style: "rounded".to_string(),
            focus_key: "tab".to_string(),
            max_log_entries: 200,
        }
    }
}

/// Playground configuration loaded from config.toml.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Listen for hotkeys anywhere instead of only while the view has focus.
    pub attach_to_document: bool,
    /// Action name -> combo. Kept dynamic so a malformed value surfaces as
    /// [`HotkeyError::InvalidSpecification`].
    pub hotkeys: Value,
    pub ui: UiConfig,
}

impl Default for Config {
    fn default() -> Self {
        let hotkeys: toml::Table = DEFAULT_HOTKEYS
            .iter()
            .map(|(action, combo)| (action.to_string(), Value::String(combo.to_string())))
            .collect();
        Self {
            attach_to_document: false,
            hotkeys: Value::Table(hotkeys),
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    /// Options for the hotkeys behavior.
    pub fn hotkeys_options(&self) -> std::result::Result<HotkeysOptions, HotkeyError> {
        Ok(HotkeysOptions {
            hotkeys: HotkeySpec::from_value(&self.hotkeys)?,
            attach_to_document: self.attach_to_document,
        })
    }
}

/// Returns the config directory (~/.config/hotkeys), creating it if needed.
pub fn ensure_config_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "hotkeys")
        .context("Could not determine XDG config directory")?;
    let config_dir = dirs.config_dir().to_path_buf();
    fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create config directory: {}", config_dir.display()))?;
    Ok(config_dir)
}

/// Returns the default path to config.toml.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(ensure_config_dir()?.join("config.toml"))
}

/// Load config from `path`. Writes a default config file if it is missing.
pub fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    } else {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }
        let default = Config::default();
        fs::write(path, generate_default_config(&default))
            .with_context(|| format!("Failed to write default config: {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote default config");
        Ok(default)
    }
}

fn generate_default_config(config: &Config) -> String {
    let hotkeys: String = DEFAULT_HOTKEYS
        .iter()
        .map(|(action, combo)| format!("{} = \"{}\"\n", action, combo))
        .collect();
    let u = &config.ui;
    format!(
        r#"# Hotkeys playground configuration

# false: hotkeys fire only while the view pane has focus
# true:  hotkeys fire anywhere until the behavior is torn down
attach_to_document = {}

[hotkeys]
# action = "combo"
# Modifiers: cmd, ctrl, alt, shift. Keys: a-z, 0-9, f1-f12, enter, esc, tab,
# space, backspace, delete, up, down, left, right, home, end, pageup,
# pagedown, pause, "+", "-"
# Built-in actions: quit, clear, teardown. Others only emit notifications.
# The [ui] focus_key combo is reserved for moving focus and never reaches
# the hotkeys; Ctrl+C always quits.
{}
[ui]
# Border style: "rounded", "double", "thick", "plain"
border_style = "{}"
# Moves focus between the view and the outside pane. Hotkeys bound to the
# same combo are shadowed.
focus_key = "{}"
max_log_entries = {}
"#,
        config.attach_to_document, hotkeys, u.border_style, u.focus_key, u.max_log_entries,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = load_config(&path).unwrap();
        assert!(path.exists());
        assert!(!config.attach_to_document);

        // The written file parses back to the same hotkeys, in order.
        let reloaded = load_config(&path).unwrap();
        assert_eq!(reloaded.hotkeys, config.hotkeys);
        let opts = reloaded.hotkeys_options().unwrap();
        let actions: Vec<&str> = opts.hotkeys.iter().map(|(a, _)| a).collect();
        assert_eq!(actions, vec!["save", "destroy", "help", "clear", "teardown", "quit"]);
        assert_eq!(reloaded.ui.focus_key, "tab");
    }

    #[test]
    fn reads_user_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
attach_to_document = true

[hotkeys]
openFilePicker = "ctrl:o"
save = "ctrl:cmd:s"

[ui]
border_style = "double"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert!(config.attach_to_document);
        assert_eq!(config.ui.border_style, "double");
        assert_eq!(config.ui.max_log_entries, 200);

        let opts = config.hotkeys_options().unwrap();
        assert!(opts.attach_to_document);
        let entries: Vec<(&str, &str)> = opts.hotkeys.iter().collect();
        assert_eq!(entries, vec![("openFilePicker", "ctrl:o"), ("save", "ctrl:cmd:s")]);
    }

    #[test]
    fn non_table_hotkeys_is_invalid_specification() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "hotkeys = \"x\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert!(matches!(
            config.hotkeys_options(),
            Err(HotkeyError::InvalidSpecification(_))
        ));
    }

    #[test]
    fn broken_toml_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[hotkeys\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config"));
    }
}
