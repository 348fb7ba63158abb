// SPDX-License-Identifier: GPL-3.0-or-later
// hotkeys - The hotkeys behavior: options, host contract and lifecycle

use crate::document::{Document, Subscription};
use crate::error::{HotkeyError, Result};
use crate::hotkey::{compile, CompiledHotkey, HotkeySpec};
use crate::matcher::{match_event, KeyEvent};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::rc::{Rc, Weak};
use toml::Value;

/// Tags that receive key events without a tab index.
const FOCUSABLE_TAGS: [&str; 3] = ["input", "textarea", "select"];

/// Root element of a host view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag_name: String,
    tab_index: Option<i32>,
    styles: BTreeMap<String, String>,
}

impl Element {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            tab_index: None,
            styles: BTreeMap::new(),
        }
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn tab_index(&self) -> Option<i32> {
        self.tab_index
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    pub fn set_style(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.styles.insert(property.into(), value.into());
    }

    /// Form controls are focusable on their own.
    pub fn is_naturally_focusable(&self) -> bool {
        let tag = self.tag_name.to_lowercase();
        FOCUSABLE_TAGS.contains(&tag.as_str())
    }

    /// Puts the element in the tab order without a visible focus ring.
    pub fn make_focusable(&mut self) {
        self.tab_index = Some(0);
        self.set_style("outline", "0px solid transparent");
    }
}

/// What a view must provide to host the behavior.
pub trait HotkeyHost {
    /// Emits a notification on the view (e.g. "hotkey:ctrl:s").
    fn trigger(&mut self, event_name: &str);

    /// Runs the action called `name` with the originating event. Returns
    /// false when the view has no such action.
    fn invoke_action(&mut self, _name: &str, _event: &KeyEvent) -> bool {
        false
    }

    fn element_mut(&mut self) -> &mut Element;
}

/// Construction options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HotkeysOptions {
    pub hotkeys: HotkeySpec,
    /// Listen on the whole document instead of the view's own key events.
    pub attach_to_document: bool,
}

impl HotkeysOptions {
    /// Reads options from a dynamic table: `hotkeys` (table, optional) and
    /// `attach_to_document` (bool, optional).
    pub fn from_value(value: &Value) -> Result<Self> {
        let table = value.as_table().ok_or(HotkeyError::InvalidOption {
            name: "options",
            expected: "a table",
        })?;

        let hotkeys = match table.get("hotkeys") {
            Some(v) => HotkeySpec::from_value(v)?,
            None => HotkeySpec::default(),
        };
        let attach_to_document = match table.get("attach_to_document") {
            Some(v) => v.as_bool().ok_or(HotkeyError::InvalidOption {
                name: "attach_to_document",
                expected: "a boolean",
            })?,
            None => false,
        };

        Ok(Self {
            hotkeys,
            attach_to_document,
        })
    }
}

/// Where key events come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Only key events delivered to the view itself.
    ViewScoped,
    /// Any key event in the document, between attach and teardown.
    DocumentScoped,
}

/// Lifecycle of a behavior instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Constructed,
    Attached,
    Destroyed,
}

/// Hotkeys bound to one host view.
#[derive(Debug)]
pub struct Hotkeys {
    scope: Scope,
    records: Rc<[CompiledHotkey]>,
    state: Lifecycle,
    subscription: Option<Subscription>,
    /// Cleared on teardown and drop; checked before every dispatched match.
    active: Rc<Cell<bool>>,
}

impl Hotkeys {
    pub fn new(options: HotkeysOptions) -> Self {
        let scope = if options.attach_to_document {
            Scope::DocumentScoped
        } else {
            Scope::ViewScoped
        };
        let records: Rc<[CompiledHotkey]> = compile(&options.hotkeys).into();
        tracing::debug!(?scope, hotkeys = records.len(), "hotkeys behavior created");
        Self {
            scope,
            records,
            state: Lifecycle::Constructed,
            subscription: None,
            active: Rc::new(Cell::new(true)),
        }
    }

    /// Builds the behavior from dynamic options, failing on a malformed
    /// `hotkeys` value.
    pub fn try_from_value(value: &Value) -> Result<Self> {
        HotkeysOptions::from_value(value).map(Self::new)
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn state(&self) -> Lifecycle {
        self.state
    }

    pub fn records(&self) -> &[CompiledHotkey] {
        &self.records
    }

    /// Attach/render hook. In view scope the host element is made focusable
    /// if needed; in document scope one document listener is registered.
    ///
    /// A host action may dispatch further keydowns into the same document.
    /// Those arrive while the host is still borrowed, so they are queued and
    /// handled in order once the current event's hotkeys have all run. A
    /// keydown that finds the host borrowed by anything else is dropped with
    /// a warning.
    pub fn attach<H>(&mut self, host: &Rc<RefCell<H>>, document: &Document)
    where
        H: HotkeyHost + 'static,
    {
        if self.state != Lifecycle::Constructed {
            tracing::warn!(state = ?self.state, "hotkeys already attached or destroyed, ignoring attach");
            return;
        }

        match self.scope {
            Scope::ViewScoped => {
                let mut host = host.borrow_mut();
                let element = host.element_mut();
                if !element.is_naturally_focusable() {
                    element.make_focusable();
                    tracing::debug!(tag = element.tag_name(), "made host element focusable");
                }
            }
            Scope::DocumentScoped => {
                let records = Rc::clone(&self.records);
                let active = Rc::clone(&self.active);
                let weak: Weak<RefCell<H>> = Rc::downgrade(host);
                let dispatching = Cell::new(false);
                let pending: RefCell<VecDeque<KeyEvent>> = RefCell::default();
                let subscription = document.subscribe(move |event| {
                    if !active.get() {
                        return;
                    }
                    let Some(host) = weak.upgrade() else { return };
                    let Ok(mut host) = host.try_borrow_mut() else {
                        if dispatching.get() {
                            tracing::trace!(%event, "queued keydown raised by a hotkey action");
                            pending.borrow_mut().push_back(*event);
                        } else {
                            tracing::warn!(%event, "host busy, dropping document keydown");
                        }
                        return;
                    };

                    dispatching.set(true);
                    let mut next = Some(*event);
                    while let Some(event) = next {
                        dispatch(&records, &mut *host, &event, &active);
                        next = if active.get() {
                            pending.borrow_mut().pop_front()
                        } else {
                            pending.borrow_mut().clear();
                            None
                        };
                    }
                    dispatching.set(false);
                });
                tracing::debug!(listener = ?subscription.id(), "hotkeys listening on document");
                self.subscription = Some(subscription);
            }
        }

        self.state = Lifecycle::Attached;
    }

    /// Keydown delivered to the view itself. Only dispatches in view scope and
    /// before teardown. Returns the number of hotkeys that fired.
    pub fn handle_keydown(&self, host: &mut dyn HotkeyHost, event: &KeyEvent) -> usize {
        if self.scope != Scope::ViewScoped || self.state == Lifecycle::Destroyed {
            return 0;
        }
        dispatch(&self.records, host, event, &self.active)
    }

    /// Before-teardown hook. Removes the document listener, if any.
    pub fn teardown(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            let removed = subscription.unsubscribe();
            tracing::debug!(removed, "hotkeys stopped listening on document");
        }
        self.active.set(false);
        self.state = Lifecycle::Destroyed;
    }
}

impl Drop for Hotkeys {
    fn drop(&mut self) {
        self.active.set(false);
    }
}

/// Announces and runs every record matching `event`, in registration order.
/// Stops early if an action tears the behavior down. Returns the number of
/// hotkeys that fired.
fn dispatch(
    records: &[CompiledHotkey],
    host: &mut dyn HotkeyHost,
    event: &KeyEvent,
    active: &Cell<bool>,
) -> usize {
    let mut fired = 0;
    for hk in match_event(records, event) {
        if !active.get() {
            break;
        }
        tracing::trace!(combo = %hk.combo_label, action = %hk.action_name, "hotkey fired");
        host.trigger(&hk.event_name());
        host.invoke_action(&hk.action_name, event);
        fired += 1;
    }
    fired
}
