//! Observer registry for store change notifications.
//!
//! Stores call [`Subscribers::notify`] synchronously after each mutation,
//! once the new state has been persisted. Callbacks run in subscription
//! order.

use std::fmt;

/// Handle returned by [`Subscribers::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<V> = Box<dyn Fn(&V) + Send + Sync>;

/// A list of callbacks interested in values of type `V`.
pub struct Subscribers<V> {
    next_id: u64,
    entries: Vec<(SubscriptionId, Callback<V>)>,
}

impl<V> Subscribers<V> {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Register a callback.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&V) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns `false` if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Invoke every callback with `value`.
    pub fn notify(&self, value: &V) {
        for (_, callback) in &self.entries {
            callback(value);
        }
    }

    /// Number of registered callbacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nobody is listening.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for Subscribers<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for Subscribers<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.entries.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn test_notify_in_subscription_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut subscribers = Subscribers::<u32>::new();

        let first = Arc::clone(&seen);
        subscribers.subscribe(move |v| first.lock().unwrap().push(("first", *v)));
        let second = Arc::clone(&seen);
        subscribers.subscribe(move |v| second.lock().unwrap().push(("second", *v)));

        subscribers.notify(&7);

        assert_eq!(*seen.lock().unwrap(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn test_unsubscribe() {
        let calls = Arc::new(Mutex::new(0));
        let mut subscribers = Subscribers::<()>::new();

        let counter = Arc::clone(&calls);
        let id = subscribers.subscribe(move |()| *counter.lock().unwrap() += 1);

        subscribers.notify(&());
        assert!(subscribers.unsubscribe(id));
        assert!(!subscribers.unsubscribe(id));
        subscribers.notify(&());

        assert_eq!(*calls.lock().unwrap(), 1);
        assert!(subscribers.is_empty());
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut subscribers = Subscribers::<()>::new();
        let a = subscribers.subscribe(|()| {});
        subscribers.unsubscribe(a);
        let b = subscribers.subscribe(|()| {});
        assert_ne!(a, b);
        assert_eq!(subscribers.len(), 1);
    }
}
