//! # Observer Registry
//!
//! Fans out a cart snapshot to every interested party after each committed
//! mutation.
//!
//! ```text
//! mutation committed
//!      │
//!      ▼
//! notify_all(snapshot) ──► observer 1 ──► observer 2 (panics, isolated) ──► observer 3
//! ```
//!
//! Observers run synchronously, in registration order. A panicking observer
//! does not stop the others; the number of failures is returned so the
//! caller can log it. The panic is still reported by the process panic hook,
//! which by default prints it to stderr.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::types::LineItem;

/// Something that wants to hear about cart changes.
///
/// Implemented for every `Fn(&[LineItem])` closure, so most callers simply
/// register a closure.
pub trait CartObserver {
    /// Called with a read-only snapshot of the cart after a mutation.
    fn on_cart_changed(&self, snapshot: &[LineItem]);
}

impl<F> CartObserver for F
where
    F: Fn(&[LineItem]),
{
    fn on_cart_changed(&self, snapshot: &[LineItem]) {
        self(snapshot)
    }
}

/// Ordered list of registered observers.
///
/// Registering the same observer twice is allowed; it is then invoked twice
/// per notification.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<Box<dyn CartObserver>>,
}

impl ObserverRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an observer.
    pub fn register(&mut self, observer: impl CartObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Invokes every observer with `snapshot`, returning how many panicked.
    ///
    /// Panics are caught, not silenced: the installed panic hook still runs
    /// for each one.
    pub fn notify_all(&self, snapshot: &[LineItem]) -> usize {
        self.observers
            .iter()
            .filter(|observer| {
                panic::catch_unwind(AssertUnwindSafe(|| observer.on_cart_changed(snapshot)))
                    .is_err()
            })
            .count()
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Checks if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemCandidate;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn quiet_panics<R>(f: impl FnOnce() -> R) -> R {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(|_| {}));
        let result = f();
        panic::set_hook(previous);
        result
    }

    fn snapshot() -> Vec<LineItem> {
        vec![LineItem::from_candidate(&ItemCandidate::new(1, "Ring", 5.0))]
    }

    #[test]
    fn test_notify_reaches_every_observer() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ObserverRegistry::new();

        for n in 0..3 {
            let calls = Rc::clone(&calls);
            registry.register(move |items: &[LineItem]| calls.borrow_mut().push((n, items.len())));
        }

        assert_eq!(registry.notify_all(&snapshot()), 0);
        assert_eq!(*calls.borrow(), vec![(0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_duplicate_registration_invoked_twice() {
        let count = Rc::new(RefCell::new(0));
        let mut registry = ObserverRegistry::new();

        let observer = {
            let count = Rc::clone(&count);
            move |_: &[LineItem]| *count.borrow_mut() += 1
        };
        registry.register(observer.clone());
        registry.register(observer);

        registry.notify_all(&[]);
        assert_eq!(*count.borrow(), 2);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_panicking_observer_is_isolated() {
        let reached = Rc::new(RefCell::new(false));
        let mut registry = ObserverRegistry::new();

        registry.register(|_: &[LineItem]| panic!("observer failure"));
        {
            let reached = Rc::clone(&reached);
            registry.register(move |_: &[LineItem]| *reached.borrow_mut() = true);
        }

        assert_eq!(quiet_panics(|| registry.notify_all(&snapshot())), 1);
        assert!(*reached.borrow());
    }

    #[test]
    fn test_empty_registry() {
        let registry = ObserverRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.notify_all(&snapshot()), 0);
    }
}
