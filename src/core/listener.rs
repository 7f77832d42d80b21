//! Global listener bookkeeping.
//!
//! The widget only reacts to "global" input (pointer movement anywhere on
//! screen, key presses it does not own, scheme notifications) while some
//! state requires it.  Each such listener is represented by a
//! [`ListenerGuard`]: holding the guard means the listener is attached,
//! dropping it detaches.  The registry only counts, so the host (and the
//! tests) can check that nothing is left attached after a state exits.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Kinds of global listener the widget can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Pointer movement anywhere on screen (resize drag).
    PointerMove,
    /// Pointer release anywhere on screen (resize drag).
    PointerUp,
    /// Key presses not bound to a widget action (Escape on an open pane).
    KeyDown,
    /// System colour-scheme notifications (auto theme).
    SchemeChange,
}

/// Per-instance table of attached listeners.
///
/// Cloning shares the table; every guard keeps a handle to it.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    counts: Rc<RefCell<HashMap<ListenerKind, usize>>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener of `kind`.  It stays attached until the returned
    /// guard is dropped.
    #[must_use = "the listener is detached as soon as the guard is dropped"]
    pub fn attach(&self, kind: ListenerKind) -> ListenerGuard {
        *self.counts.borrow_mut().entry(kind).or_insert(0) += 1;
        tracing::trace!(?kind, "listener attached");
        ListenerGuard {
            kind,
            counts: Rc::clone(&self.counts),
        }
    }

    pub fn count(&self, kind: ListenerKind) -> usize {
        self.counts.borrow().get(&kind).copied().unwrap_or(0)
    }

    pub fn is_attached(&self, kind: ListenerKind) -> bool {
        self.count(kind) > 0
    }

    /// Number of listeners attached across all kinds.
    pub fn total(&self) -> usize {
        self.counts.borrow().values().sum()
    }
}

/// An attached listener.  Detaches on drop.
#[derive(Debug)]
pub struct ListenerGuard {
    kind: ListenerKind,
    counts: Rc<RefCell<HashMap<ListenerKind, usize>>>,
}

impl ListenerGuard {
    pub fn kind(&self) -> ListenerKind {
        self.kind
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(n) = self.counts.borrow_mut().get_mut(&self.kind) {
            *n = n.saturating_sub(1);
        }
        tracing::trace!(kind = ?self.kind, "listener detached");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_detaches_on_drop() {
        let registry = ListenerRegistry::new();
        let guard = registry.attach(ListenerKind::KeyDown);
        assert!(registry.is_attached(ListenerKind::KeyDown));
        assert_eq!(guard.kind(), ListenerKind::KeyDown);
        drop(guard);
        assert!(!registry.is_attached(ListenerKind::KeyDown));
        assert_eq!(registry.total(), 0);
    }

    #[test]
    fn counts_are_per_kind() {
        let registry = ListenerRegistry::new();
        let a = registry.attach(ListenerKind::PointerMove);
        let b = registry.attach(ListenerKind::PointerUp);
        let c = registry.attach(ListenerKind::PointerMove);
        assert_eq!(registry.count(ListenerKind::PointerMove), 2);
        assert_eq!(registry.count(ListenerKind::PointerUp), 1);
        assert_eq!(registry.count(ListenerKind::SchemeChange), 0);
        assert_eq!(registry.total(), 3);
        drop((a, b, c));
        assert_eq!(registry.total(), 0);
    }

    #[test]
    fn clones_share_the_table() {
        let registry = ListenerRegistry::new();
        let view = registry.clone();
        let _guard = registry.attach(ListenerKind::SchemeChange);
        assert!(view.is_attached(ListenerKind::SchemeChange));
    }

    #[test]
    fn guard_outliving_registry_handle_is_fine() {
        let guard = {
            let registry = ListenerRegistry::new();
            registry.attach(ListenerKind::KeyDown)
        };
        drop(guard);
    }
}
