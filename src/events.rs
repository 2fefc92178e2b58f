//! Per-store change notification.
//!
//! Each store owns an [`Observers`] registry. Callbacks run synchronously, in
//! registration order, after the store has finished writing. Nothing is queued:
//! an event with no subscribers is simply dropped.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::models::SiteSettings;

#[derive(Debug, Clone, PartialEq)]
pub enum ListingsEvent {
    /// The whole collection was written
    Saved { count: usize },
    /// The cached collection was discarded
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SettingsEvent {
    Saved(SiteSettings),
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct Registry<E> {
    next_id: u64,
    entries: Vec<(SubscriptionId, Callback<E>)>,
}

pub struct Observers<E> {
    inner: Mutex<Registry<E>>,
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(Registry {
                next_id: 0,
                entries: Vec::new(),
            }),
        }
    }
}

impl<E> Observers<E> {
    pub fn new() -> Self {
        Self::default()
    }

    fn registry(&self) -> MutexGuard<'_, Registry<E>> {
        // A panicking callback never runs under the lock, so the data is intact.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let mut registry = self.registry();
        registry.next_id += 1;
        let id = SubscriptionId(registry.next_id);
        registry.entries.push((id, Arc::new(callback)));
        id
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.registry();
        let before = registry.entries.len();
        registry.entries.retain(|(entry_id, _)| *entry_id != id);
        registry.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.registry().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fan out to a snapshot of the current subscribers.
    pub fn notify(&self, event: &E) {
        let snapshot: Vec<Callback<E>> = self
            .registry()
            .entries
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        for callback in snapshot {
            callback(event);
        }
    }
}

impl<E> std::fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifies_in_registration_order() {
        let observers = Observers::<ListingsEvent>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second"] {
            let seen = Arc::clone(&seen);
            observers.subscribe(move |_| seen.lock().unwrap().push(tag));
        }

        observers.notify(&ListingsEvent::Reset);
        assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn unsubscribed_callbacks_are_not_called() {
        let observers = Observers::<ListingsEvent>::new();
        let hits = Arc::new(Mutex::new(0));

        let counter = Arc::clone(&hits);
        let id = observers.subscribe(move |_| *counter.lock().unwrap() += 1);

        observers.notify(&ListingsEvent::Saved { count: 1 });
        assert!(observers.unsubscribe(id));
        assert!(!observers.unsubscribe(id));
        observers.notify(&ListingsEvent::Saved { count: 1 });

        assert_eq!(*hits.lock().unwrap(), 1);
        assert!(observers.is_empty());
    }

    #[test]
    fn callback_may_subscribe_during_fan_out() {
        let observers = Arc::new(Observers::<SettingsEvent>::new());
        let inner = Arc::clone(&observers);
        observers.subscribe(move |_| {
            inner.subscribe(|_| {});
        });

        observers.notify(&SettingsEvent::Reset);
        assert_eq!(observers.len(), 2);
    }
}
