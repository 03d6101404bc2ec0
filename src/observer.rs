//! Per-property change notification.
//!
//! An [`Emitter`] maps a property key to an ordered list of callbacks.
//! Emitting a property invokes its callbacks synchronously, in registration
//! order. Everything here is single-threaded.

use std::collections::HashMap;
use std::hash::Hash;

/// Handle returned by [`Emitter::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Callback<V> = Box<dyn FnMut(&V)>;

/// Property-keyed callback registry.
pub struct Emitter<P, V> {
    next_id: u64,
    handlers: HashMap<P, Vec<(SubscriptionId, Callback<V>)>>,
}

impl<P, V> Default for Emitter<P, V> {
    fn default() -> Self {
        Self {
            next_id: 0,
            handlers: HashMap::new(),
        }
    }
}

impl<P: Eq + Hash + Copy, V> Emitter<P, V> {
    /// Create an emitter with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for changes of `property`.
    pub fn subscribe(&mut self, property: P, callback: impl FnMut(&V) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers
            .entry(property)
            .or_default()
            .push((id, Box::new(callback)));
        id
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for handlers in self.handlers.values_mut() {
            if let Some(index) = handlers.iter().position(|(sub, _)| *sub == id) {
                handlers.remove(index);
                return true;
            }
        }
        false
    }

    /// Invoke every callback registered for `property`.
    pub fn emit(&mut self, property: P, value: &V) {
        if let Some(handlers) = self.handlers.get_mut(&property) {
            for (_, callback) in handlers.iter_mut() {
                callback(value);
            }
        }
    }

    /// Number of callbacks registered for `property`.
    pub fn subscriber_count(&self, property: P) -> usize {
        self.handlers.get(&property).map_or(0, Vec::len)
    }
}

impl<P, V> std::fmt::Debug for Emitter<P, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count: usize = self.handlers.values().map(Vec::len).sum();
        f.debug_struct("Emitter")
            .field("subscriptions", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_runs_in_registration_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut emitter: Emitter<&str, bool> = Emitter::new();

        for tag in ["first", "second", "third"] {
            let calls = Rc::clone(&calls);
            emitter.subscribe("visible", move |value| calls.borrow_mut().push((tag, *value)));
        }
        emitter.emit("visible", &false);

        assert_eq!(
            *calls.borrow(),
            [("first", false), ("second", false), ("third", false)]
        );
    }

    #[test]
    fn test_emit_only_reaches_matching_property() {
        let hits = Rc::new(RefCell::new(0));
        let mut emitter: Emitter<&str, bool> = Emitter::new();
        let counter = Rc::clone(&hits);
        emitter.subscribe("a", move |_| *counter.borrow_mut() += 1);

        emitter.emit("b", &true);
        assert_eq!(*hits.borrow(), 0);
        emitter.emit("a", &true);
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let hits = Rc::new(RefCell::new(0));
        let mut emitter: Emitter<u8, ()> = Emitter::new();
        let counter = Rc::clone(&hits);
        let id = emitter.subscribe(1, move |_| *counter.borrow_mut() += 1);

        assert!(emitter.unsubscribe(id));
        assert!(!emitter.unsubscribe(id));
        emitter.emit(1, &());
        assert_eq!(*hits.borrow(), 0);
        assert_eq!(emitter.subscriber_count(1), 0);
    }
}
