//! Observable state cells.
//!
//! A [`StateCell`] stores the latest value of one piece of UI-facing data.
//! Subscribers are called synchronously on every update and immediately on
//! subscription with the current value. Async observers can instead hold a
//! `tokio::sync::watch` receiver from [`StateCell::watch`].

use parking_lot::Mutex;
use std::{
    fmt,
    sync::{Arc, Weak},
};
use tokio::sync::watch;

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Inner<T> {
    value: watch::Sender<T>,
    /// Held for the whole of a publish so subscribers see updates in order.
    /// Callbacks must not write back into the cell that invoked them.
    publish: Mutex<()>,
    subscribers: Mutex<Vec<(u64, Callback<T>)>>,
    next_id: Mutex<u64>,
}

trait Detach: Send + Sync {
    fn detach(&self, id: u64);
}

impl<T: Send + Sync> Detach for Inner<T> {
    fn detach(&self, id: u64) {
        self.subscribers.lock().retain(|(sid, _)| *sid != id);
    }
}

/// Shared, observable holder of the latest `T`. Clones share the same value.
pub struct StateCell<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for StateCell<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T: fmt::Debug> fmt::Debug for StateCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCell")
            .field("value", &*self.inner.value.borrow())
            .field("subscribers", &self.inner.subscribers.lock().len())
            .finish()
    }
}

impl<T: Default + Clone + Send + Sync + 'static> Default for StateCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + Send + Sync + 'static> StateCell<T> {
    pub fn new(initial: T) -> Self {
        let (value, _) = watch::channel(initial);
        Self {
            inner: Arc::new(Inner {
                value,
                publish: Mutex::new(()),
                subscribers: Mutex::new(Vec::new()),
                next_id: Mutex::new(0),
            }),
        }
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Replace the value wholesale and notify subscribers.
    pub fn set(&self, value: T) {
        let _publish = self.inner.publish.lock();
        self.inner.value.send_replace(value);

        let current = self.get();
        for callback in self.snapshot() {
            callback(&current);
        }
    }

    /// Register `callback`. It runs now with the current value, then after
    /// every [`set`](Self::set) until the returned handle is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let _publish = self.inner.publish.lock();

        let id = {
            let mut next = self.inner.next_id.lock();
            *next += 1;
            *next
        };
        let callback: Callback<T> = Arc::new(callback);
        self.inner.subscribers.lock().push((id, Arc::clone(&callback)));

        callback(&self.get());

        let inner: Arc<dyn Detach> = self.inner.clone();
        Subscription { cell: Arc::downgrade(&inner), id }
    }

    /// Receiver that observes the current value and every later change.
    pub fn watch(&self) -> watch::Receiver<T> {
        self.inner.value.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.lock().len()
    }

    fn snapshot(&self) -> Vec<Callback<T>> {
        self.inner.subscribers.lock().iter().map(|(_, cb)| Arc::clone(cb)).collect()
    }
}

/// Handle for a [`StateCell`] subscription. Detaches on drop.
pub struct Subscription {
    cell: Weak<dyn Detach>,
    id: u64,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cell) = self.cell.upgrade() {
            cell.detach(self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_subscriber_receives_current_value_first() {
        let cell = StateCell::new(vec!["London".to_string()]);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        let _sub = cell.subscribe(move |v: &Vec<String>| sink.lock().push(v.clone()));
        cell.set(vec![]);

        assert_eq!(*seen.lock(), vec![vec!["London".to_string()], vec![]]);
    }

    #[test]
    fn set_replaces_value() {
        let cell = StateCell::new(Option::<i32>::None);
        cell.set(Some(3));
        cell.set(Some(4));
        assert_eq!(cell.get(), Some(4));
    }

    #[test]
    fn clones_share_state() {
        let cell = StateCell::new(1);
        let other = cell.clone();
        other.set(2);
        assert_eq!(cell.get(), 2);
    }

    #[test]
    fn dropping_subscription_stops_notifications() {
        let cell = StateCell::new(0);
        let calls = Arc::new(Mutex::new(0));

        let counter = Arc::clone(&calls);
        let sub = cell.subscribe(move |_| *counter.lock() += 1);
        assert_eq!(cell.subscriber_count(), 1);
        cell.set(1);
        sub.unsubscribe();
        cell.set(2);

        assert_eq!(*calls.lock(), 2);
        assert_eq!(cell.subscriber_count(), 0);
    }

    #[test]
    fn subscription_outliving_cell_is_harmless() {
        let cell = StateCell::new(0);
        let sub = cell.subscribe(|_| {});
        drop(cell);
        drop(sub);
    }

    #[tokio::test]
    async fn watch_receiver_sees_changes() {
        let cell = StateCell::new(0);
        let mut rx = cell.watch();
        assert_eq!(*rx.borrow(), 0);

        let writer = cell.clone();
        tokio::spawn(async move { writer.set(7) });

        rx.changed().await.expect("sender alive");
        assert_eq!(*rx.borrow_and_update(), 7);
    }
}
