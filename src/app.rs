// SPDX-License-Identifier: GPL-3.0-or-later
// hotkeys - Playground state: one view hosting the hotkeys behavior

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent as TermKeyEvent, KeyModifiers};
use hotkeys::config::Config;
use hotkeys::{
    match_event, matches, CompiledHotkey, Document, Element, HotkeyHost, Hotkeys, KeyEvent, Lifecycle, Scope,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::rc::Rc;

/// Which pane receives key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    View,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Key,
    Notification,
    Action,
    System,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub time: String,
    pub kind: LogKind,
    pub text: String,
}

/// The host view. Actions it understands: quit, clear, teardown.
#[derive(Debug)]
pub struct PlaygroundView {
    element: Element,
    log: VecDeque<LogEntry>,
    max_log: usize,
    pub quit_requested: bool,
    pub teardown_requested: bool,
}

impl PlaygroundView {
    pub fn new(max_log: usize) -> Self {
        Self {
            element: Element::new("div"),
            log: VecDeque::with_capacity(max_log),
            max_log: max_log.max(1),
            quit_requested: false,
            teardown_requested: false,
        }
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn log(&self) -> &VecDeque<LogEntry> {
        &self.log
    }

    pub fn push_log(&mut self, kind: LogKind, text: impl Into<String>) {
        if self.log.len() == self.max_log {
            self.log.pop_front();
        }
        self.log.push_back(LogEntry {
            time: Local::now().format("%H:%M:%S").to_string(),
            kind,
            text: text.into(),
        });
    }
}

impl HotkeyHost for PlaygroundView {
    fn trigger(&mut self, event_name: &str) {
        self.push_log(LogKind::Notification, event_name);
    }

    fn invoke_action(&mut self, name: &str, event: &KeyEvent) -> bool {
        match name {
            "quit" => self.quit_requested = true,
            "clear" => self.log.clear(),
            "teardown" => self.teardown_requested = true,
            _ => return false,
        }
        self.push_log(LogKind::Action, format!("{}({})", name, event));
        true
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}

pub struct App {
    pub config: Config,
    pub config_path: PathBuf,
    pub document: Document,
    pub view: Rc<RefCell<PlaygroundView>>,
    pub hotkeys: Hotkeys,
    pub focus: Focus,
    pub focus_key: CompiledHotkey,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, config_path: PathBuf) -> Result<Self> {
        let options = config
            .hotkeys_options()
            .with_context(|| format!("Invalid [hotkeys] in {}", config_path.display()))?;
        let hotkeys = Hotkeys::new(options);
        let focus_key = CompiledHotkey::parse("focus", &config.ui.focus_key);
        let view = Rc::new(RefCell::new(PlaygroundView::new(config.ui.max_log_entries)));

        // The focus key is handled before any hotkey sees the event.
        for hk in shadowed_by(&focus_key, hotkeys.records()) {
            tracing::warn!(
                action = %hk.action_name,
                combo = %hk.combo_label,
                "hotkey shadowed by focus key"
            );
            view.borrow_mut().push_log(
                LogKind::System,
                format!(
                    "{} ({}) is the focus key and will never fire",
                    hk.action_name, hk.combo_label
                ),
            );
        }

        Ok(Self {
            config,
            config_path,
            document: Document::new(),
            view,
            hotkeys,
            focus: Focus::View,
            focus_key,
            should_quit: false,
        })
    }

    /// Runs the behavior's attach hook. Call once the first frame is drawn.
    pub fn attach(&mut self) {
        self.hotkeys.attach(&self.view, &self.document);
        let scope = match self.hotkeys.scope() {
            Scope::ViewScoped => "view",
            Scope::DocumentScoped => "document",
        };
        self.view
            .borrow_mut()
            .push_log(LogKind::System, format!("attached, listening on {}", scope));
    }

    pub fn handle_key(&mut self, key: TermKeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        let Some(event) = KeyEvent::from_crossterm(&key) else {
            self.view
                .borrow_mut()
                .push_log(LogKind::System, format!("{:?} has no key code", key.code));
            return;
        };

        if matches(&self.focus_key, &event) {
            self.toggle_focus();
            return;
        }

        self.view.borrow_mut().push_log(LogKind::Key, event.to_string());

        // The document sees every key press, the view only those made while it has focus.
        self.document.dispatch_keydown(&event);
        if self.focus == Focus::View {
            self.hotkeys.handle_keydown(&mut *self.view.borrow_mut(), &event);
        }

        self.apply_requests();
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::View => Focus::Outside,
            Focus::Outside => Focus::View,
        };
        self.view
            .borrow_mut()
            .push_log(LogKind::System, format!("focus -> {:?}", self.focus));
    }

    fn apply_requests(&mut self) {
        let (quit, teardown) = {
            let mut view = self.view.borrow_mut();
            let requests = (view.quit_requested, view.teardown_requested);
            view.teardown_requested = false;
            requests
        };
        if teardown && self.hotkeys.state() != Lifecycle::Destroyed {
            self.hotkeys.teardown();
            self.view
                .borrow_mut()
                .push_log(LogKind::System, "behavior torn down, hotkeys are inactive");
        }
        if quit {
            self.should_quit = true;
        }
    }

    /// Runs the behavior's teardown hook.
    pub fn shutdown(&mut self) {
        if self.hotkeys.state() != Lifecycle::Destroyed {
            self.hotkeys.teardown();
        }
    }
}

/// Hotkeys bound to exactly the focus key's combo.
fn shadowed_by<'a>(
    focus_key: &CompiledHotkey,
    records: &'a [CompiledHotkey],
) -> Vec<&'a CompiledHotkey> {
    let Some(code) = focus_key.key_code else {
        return Vec::new();
    };
    let event = KeyEvent {
        code,
        cmd: focus_key.cmd,
        ctrl: focus_key.ctrl,
        alt: focus_key.alt,
        shift: focus_key.shift,
    };
    match_event(records, &event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    fn started_app(attach_to_document: bool) -> App {
        let mut config = Config::default();
        config.attach_to_document = attach_to_document;
        let mut app = App::new(config, PathBuf::from("config.toml")).unwrap();
        app.attach();
        app
    }

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        app.handle_key(TermKeyEvent::new(code, modifiers));
    }

    fn notifications(app: &App) -> Vec<String> {
        app.view
            .borrow()
            .log()
            .iter()
            .filter(|e| e.kind == LogKind::Notification)
            .map(|e| e.text.clone())
            .collect()
    }

    #[test]
    fn view_scope_only_fires_with_focus() {
        let mut app = started_app(false);
        assert_eq!(app.view.borrow().element().tab_index(), Some(0));

        press(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(notifications(&app), vec!["hotkey:ctrl:s"]);

        press(&mut app, KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.focus, Focus::Outside);
        press(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(notifications(&app).len(), 1);
    }

    #[test]
    fn document_scope_fires_without_focus() {
        let mut app = started_app(true);
        press(&mut app, KeyCode::Tab, KeyModifiers::NONE);
        press(&mut app, KeyCode::Delete, KeyModifiers::NONE);
        assert_eq!(notifications(&app), vec!["hotkey:delete"]);
    }

    #[test]
    fn teardown_action_disables_hotkeys() {
        let mut app = started_app(true);
        press(&mut app, KeyCode::Char('t'), KeyModifiers::CONTROL);
        assert_eq!(app.hotkeys.state(), Lifecycle::Destroyed);
        assert_eq!(app.document.listener_count(), 0);

        press(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(notifications(&app), vec!["hotkey:ctrl:t"]);
    }

    #[test]
    fn quit_action_and_ctrl_c() {
        let mut app = started_app(false);
        press(&mut app, KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);

        let mut app = started_app(false);
        press(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn hotkey_on_focus_key_is_reported_as_shadowed() {
        let mut config = Config::default();
        config.hotkeys = toml::from_str(
            r#"
            indent = "tab"
            outdent = "shift:tab"
            "#,
        )
        .unwrap();
        let mut app = App::new(config, PathBuf::from("config.toml")).unwrap();
        app.attach();

        let system: Vec<String> = app
            .view
            .borrow()
            .log()
            .iter()
            .filter(|e| e.kind == LogKind::System)
            .map(|e| e.text.clone())
            .collect();
        assert!(system[0].starts_with("indent (tab)"), "{:?}", system);
        assert!(!system.iter().any(|line| line.starts_with("outdent")));

        press(&mut app, KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.focus, Focus::Outside);
        assert!(notifications(&app).is_empty());

        press(&mut app, KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.focus, Focus::View);
        press(&mut app, KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(notifications(&app), vec!["hotkey:shift:tab"]);
    }

    #[test]
    fn invalid_hotkeys_fail_startup() {
        let mut config = Config::default();
        config.hotkeys = Value::Integer(3);
        assert!(App::new(config, PathBuf::from("config.toml")).is_err());
    }
}
