// SPDX-License-Identifier: GPL-3.0-or-later
// hotkeys - Declarative keyboard shortcut behavior for views

//! Binds keyboard combos such as `"ctrl:cmd:s"` to named actions on a host
//! view and emits a `hotkey:<combo>` notification whenever one fires.
//!
//! ```
//! use hotkeys::{Document, Element, HotkeyHost, Hotkeys, HotkeysOptions, KeyEvent};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! struct View {
//!     el: Element,
//!     fired: Vec<String>,
//!     saved: bool,
//! }
//!
//! impl HotkeyHost for View {
//!     fn trigger(&mut self, event_name: &str) {
//!         self.fired.push(event_name.to_string());
//!     }
//!
//!     fn invoke_action(&mut self, name: &str, _event: &KeyEvent) -> bool {
//!         self.saved |= name == "save";
//!         name == "save"
//!     }
//!
//!     fn element_mut(&mut self) -> &mut Element {
//!         &mut self.el
//!     }
//! }
//!
//! let view = Rc::new(RefCell::new(View {
//!     el: Element::new("div"),
//!     fired: Vec::new(),
//!     saved: false,
//! }));
//! let document = Document::new();
//! let options = HotkeysOptions {
//!     hotkeys: [("save", "ctrl:cmd:s"), ("destroy", "delete")].into_iter().collect(),
//!     attach_to_document: true,
//! };
//!
//! let mut hotkeys = Hotkeys::new(options);
//! hotkeys.attach(&view, &document);
//! document.dispatch_keydown(&KeyEvent::new(83).with_cmd().with_ctrl());
//! hotkeys.teardown();
//! document.dispatch_keydown(&KeyEvent::new(46));
//!
//! assert_eq!(view.borrow().fired, vec!["hotkey:ctrl:cmd:s"]);
//! assert!(view.borrow().saved);
//! ```

pub mod behavior;
pub mod config;
pub mod document;
pub mod error;
pub mod hotkey;
pub mod keymap;
pub mod matcher;

pub use behavior::{Element, HotkeyHost, Hotkeys, HotkeysOptions, Lifecycle, Scope};
pub use document::{Document, ListenerId, Subscription};
pub use error::HotkeyError;
pub use hotkey::{compile, compile_value, CompiledHotkey, HotkeySpec};
pub use matcher::{match_event, matches, KeyEvent};
