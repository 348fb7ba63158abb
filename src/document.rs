// SPDX-License-Identifier: GPL-3.0-or-later
// hotkeys - Document-wide keydown event source

use crate::matcher::KeyEvent;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Identifies one registered keydown listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Rc<dyn Fn(&KeyEvent)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

/// The shared event source every view lives in. Cloning yields another handle
/// to the same listener list.
#[derive(Clone, Default)]
pub struct Document {
    listeners: Rc<RefCell<Listeners>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a keydown listener. Pair with [`Document::off_keydown`].
    pub fn on_keydown(&self, listener: impl Fn(&KeyEvent) + 'static) -> ListenerId {
        let mut listeners = self.listeners.borrow_mut();
        let id = ListenerId(listeners.next_id);
        listeners.next_id += 1;
        listeners.entries.push((id, Rc::new(listener)));
        id
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn off_keydown(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.entries.len();
        listeners.entries.retain(|(entry_id, _)| *entry_id != id);
        listeners.entries.len() != before
    }

    /// Registers a listener that is removed when the returned guard drops.
    pub fn subscribe(&self, listener: impl Fn(&KeyEvent) + 'static) -> Subscription {
        let id = self.on_keydown(listener);
        Subscription {
            document: self.clone(),
            id: Some(id),
        }
    }

    /// Delivers `event` to every listener registered at the time of the call
    /// that is still registered when its turn comes. Returns the number of
    /// listeners invoked.
    pub fn dispatch_keydown(&self, event: &KeyEvent) -> usize {
        // Snapshot so listeners may register or remove listeners while running.
        let snapshot: Vec<(ListenerId, Listener)> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect();

        let mut invoked = 0;
        for (id, listener) in &snapshot {
            // A listener removed by an earlier one in this dispatch must not run.
            if !self.is_registered(*id) {
                continue;
            }
            listener(event);
            invoked += 1;
        }
        invoked
    }

    pub fn is_registered(&self, id: ListenerId) -> bool {
        self.listeners
            .borrow()
            .entries
            .iter()
            .any(|(entry_id, _)| *entry_id == id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Keeps a document listener registered for as long as it lives.
#[derive(Debug)]
pub struct Subscription {
    document: Document,
    id: Option<ListenerId>,
}

impl Subscription {
    pub fn id(&self) -> Option<ListenerId> {
        self.id
    }

    /// Removes the listener now. Later calls and the eventual drop do nothing.
    pub fn unsubscribe(&mut self) -> bool {
        match self.id.take() {
            Some(id) => self.document.off_keydown(id),
            None => false,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn on_and_off_are_balanced() {
        let doc = Document::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let id = doc.on_keydown(move |_| counter.set(counter.get() + 1));
        assert_eq!(doc.listener_count(), 1);

        assert_eq!(doc.dispatch_keydown(&KeyEvent::new(65)), 1);
        assert_eq!(hits.get(), 1);

        assert!(doc.off_keydown(id));
        assert!(!doc.off_keydown(id));
        assert_eq!(doc.listener_count(), 0);
        assert_eq!(doc.dispatch_keydown(&KeyEvent::new(65)), 0);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn subscription_removes_on_drop() {
        let doc = Document::new();
        {
            let _sub = doc.subscribe(|_| {});
            assert_eq!(doc.listener_count(), 1);
        }
        assert_eq!(doc.listener_count(), 0);
    }

    #[test]
    fn explicit_unsubscribe_happens_once() {
        let doc = Document::new();
        let mut sub = doc.subscribe(|_| {});
        assert!(sub.unsubscribe());
        assert!(!sub.unsubscribe());
        assert_eq!(sub.id(), None);
        drop(sub);
        assert_eq!(doc.listener_count(), 0);
    }

    #[test]
    fn listener_may_remove_itself_during_dispatch() {
        let doc = Document::new();
        let slot: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));
        let handle = doc.clone();
        let own_id = Rc::clone(&slot);
        let id = doc.on_keydown(move |_| {
            if let Some(id) = own_id.get() {
                handle.off_keydown(id);
            }
        });
        slot.set(Some(id));

        assert_eq!(doc.dispatch_keydown(&KeyEvent::new(13)), 1);
        assert_eq!(doc.listener_count(), 0);
    }

    #[test]
    fn listener_removed_mid_dispatch_does_not_run() {
        let doc = Document::new();
        let hits = Rc::new(Cell::new(0));
        let later: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));

        let handle = doc.clone();
        let victim = Rc::clone(&later);
        doc.on_keydown(move |_| {
            if let Some(id) = victim.get() {
                handle.off_keydown(id);
            }
        });
        let counter = Rc::clone(&hits);
        let id = doc.on_keydown(move |_| counter.set(counter.get() + 1));
        later.set(Some(id));

        assert_eq!(doc.dispatch_keydown(&KeyEvent::new(79)), 1);
        assert_eq!(hits.get(), 0);
        assert!(!doc.is_registered(id));
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let doc = Document::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for name in ["a", "b", "c"] {
            let log = Rc::clone(&log);
            doc.on_keydown(move |_| log.borrow_mut().push(name));
        }
        doc.dispatch_keydown(&KeyEvent::new(32));
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    }
}
