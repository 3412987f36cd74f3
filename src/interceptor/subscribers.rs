//! Broadcast of logged events to interested listeners.
//!
//! The interceptor publishes every entry it records to a registry of
//! callbacks without knowing the listeners' identities. Subscribing hands
//! back a disposer: dropping it (or calling `unsubscribe`) deregisters the
//! callback, so the list never grows without bound.

use crate::models::LogEntry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

type LogCallback = dyn Fn(&LogEntry) + Send + Sync;
type SubscriberMap = Mutex<HashMap<u64, Box<LogCallback>>>;

/// Registry of log event listeners.
///
/// Owned by the interceptor pipeline; every appended entry is passed to
/// each registered callback in turn.
#[derive(Default)]
pub struct SubscriberRegistry {
    subscribers: Arc<SubscriberMap>,
    next_id: AtomicU64,
}

impl SubscriberRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback for every subsequently logged entry.
    ///
    /// # Arguments
    ///
    /// * `callback` - Invoked with each entry as it is recorded
    ///
    /// # Returns
    ///
    /// A [`Subscription`] disposer; the callback stays registered until it
    /// is dropped or explicitly unsubscribed.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&LogEntry) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut map) = self.subscribers.lock() {
            map.insert(id, Box::new(callback));
        }
        Subscription {
            id,
            subscribers: Arc::downgrade(&self.subscribers),
        }
    }

    /// Broadcasts an entry to all registered callbacks.
    pub fn publish(&self, entry: &LogEntry) {
        if let Ok(map) = self.subscribers.lock() {
            for callback in map.values() {
                callback(entry);
            }
        }
    }

    /// Returns the number of registered callbacks.
    pub fn count(&self) -> usize {
        self.subscribers.lock().map(|map| map.len()).unwrap_or(0)
    }
}

/// Disposer handle for a registered callback.
///
/// Deregisters the callback on drop. Outliving the registry is fine; the
/// handle holds only a weak reference.
pub struct Subscription {
    id: u64,
    subscribers: Weak<SubscriberMap>,
}

impl Subscription {
    /// Explicitly deregisters the callback.
    ///
    /// Equivalent to dropping the handle; provided for call sites where
    /// the intent should be visible.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            if let Ok(mut map) = subscribers.lock() {
                map.remove(&self.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryFields, LogKind};
    use std::sync::atomic::AtomicUsize;

    fn sample_entry() -> LogEntry {
        LogEntry::new(
            LogKind::Request,
            EntryFields {
                method: Some("GET".to_string()),
                url: "/doctors".to_string(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_subscribers_receive_published_entries() {
        let registry = SubscriberRegistry::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let seen_clone = Arc::clone(&seen);
        let _subscription = registry.subscribe(move |_entry| {
            seen_clone.fetch_add(1, Ordering::SeqCst);
        });

        registry.publish(&sample_entry());
        registry.publish(&sample_entry());
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let registry = SubscriberRegistry::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let seen_clone = Arc::clone(&seen);
        let subscription = registry.subscribe(move |_entry| {
            seen_clone.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(registry.count(), 1);

        drop(subscription);
        assert_eq!(registry.count(), 0);

        registry.publish(&sample_entry());
        assert_eq!(seen.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_explicit_unsubscribe() {
        let registry = SubscriberRegistry::new();
        let subscription = registry.subscribe(|_entry| {});
        assert_eq!(registry.count(), 1);

        subscription.unsubscribe();
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_multiple_subscribers_all_notified() {
        let registry = SubscriberRegistry::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let a = Arc::clone(&seen);
        let _first = registry.subscribe(move |_| {
            a.fetch_add(1, Ordering::SeqCst);
        });
        let b = Arc::clone(&seen);
        let _second = registry.subscribe(move |_| {
            b.fetch_add(1, Ordering::SeqCst);
        });

        registry.publish(&sample_entry());
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_subscription_outliving_registry_is_harmless() {
        let registry = SubscriberRegistry::new();
        let subscription = registry.subscribe(|_entry| {});
        drop(registry);
        drop(subscription);
    }
}
