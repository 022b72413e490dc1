//! The overlay store: sole owner of the overlay stack.
//!
//! Every transition goes through [`OverlayReducer`]; the store adds the side
//! effects around it (settling pending results, duration timers, duplicate
//! rejection and change notification).
//!
//! Removal is idempotent by construction. Each entry's result can be sent
//! exactly once, and the reducer ignores unknown keys, so a timer, an
//! interaction and an explicit close can all race for the same entry: the
//! first one wins and the rest are no-ops.
//!
//! One store per process is the intended usage. Construct it once at startup
//! and hand out clones; call [`OverlayStore::reset`] between tests.

mod entry;
mod error;
mod options;
mod pending;
mod reducer;
mod resolution;
mod stack;
mod subscription;

pub use entry::{EntryId, OverlayEntry, Resolver};
pub use error::OverlayError;
pub use options::OverlayOptions;
pub use pending::Pending;
pub use reducer::{OverlayAction, OverlayReducer};
pub use resolution::Resolution;
pub use stack::OverlayStack;
pub use subscription::Subscription;

use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::AbortHandle;

use crate::mvi::Reducer;
use subscription::Unsubscribe;

type Subscriber = Arc<dyn Fn() + Send + Sync>;

/// Handle to the overlay store. Clones share the same stack.
pub struct OverlayStore<C, V> {
    shared: Arc<Shared<C, V>>,
}

pub(crate) struct Shared<C, V> {
    inner: Mutex<Inner<C, V>>,
}

struct Inner<C, V> {
    stack: OverlayStack<C, V>,
    subscribers: Vec<(u64, Subscriber)>,
    next_subscriber: u64,
    timers: HashMap<EntryId, AbortHandle>,
}

impl<C, V> Inner<C, V>
where
    C: Send + Sync + 'static,
    V: Send + 'static,
{
    /// Run the reducer. Returns whether the stack changed.
    fn dispatch(&mut self, action: OverlayAction<C, V>) -> bool {
        let previous = self.stack.clone();
        self.stack = OverlayReducer::reduce(std::mem::take(&mut self.stack), action);
        !self.stack.same_snapshot(&previous)
    }

    fn cancel_timer(&mut self, id: EntryId) {
        if let Some(timer) = self.timers.remove(&id) {
            timer.abort();
        }
    }

    fn subscribers(&self) -> Vec<Subscriber> {
        self.subscribers
            .iter()
            .map(|(_, subscriber)| Arc::clone(subscriber))
            .collect()
    }
}

/// Callbacks run outside the store lock so they may read the store.
fn notify(subscribers: &[Subscriber]) {
    for subscriber in subscribers {
        subscriber();
    }
}

impl<C, V> Shared<C, V>
where
    C: Send + Sync + 'static,
    V: Send + 'static,
{
    /// Settle an entry and take it off the stack as one step.
    pub(crate) fn release(&self, resolver: &Resolver<C, V>, resolution: Resolution<V>) -> bool {
        let subscribers = {
            let mut inner = self.inner.lock();
            let Some(sender) = resolver.take_sender() else {
                return false;
            };
            let changed = inner.dispatch(OverlayAction::Remove {
                key: resolver.key().to_string(),
            });
            inner.cancel_timer(resolver.id());
            tracing::debug!(
                key = %resolver.key(),
                id = %resolver.id(),
                resolution = resolution.tag(),
                "Overlay resolved"
            );
            let _ = sender.send(resolution);
            if changed {
                inner.subscribers()
            } else {
                Vec::new()
            }
        };
        notify(&subscribers);
        true
    }
}

impl<C, V> Unsubscribe for Shared<C, V>
where
    C: Send + Sync + 'static,
    V: Send + 'static,
{
    fn unsubscribe(&self, id: u64) {
        let removed = {
            let mut inner = self.inner.lock();
            let index = inner
                .subscribers
                .iter()
                .position(|(subscriber_id, _)| *subscriber_id == id);
            index.map(|index| inner.subscribers.remove(index))
        };
        // Dropped outside the lock; the callback may own a Subscription.
        drop(removed);
    }
}

impl<C, V> Drop for Shared<C, V> {
    fn drop(&mut self) {
        for (_, timer) in self.inner.get_mut().timers.drain() {
            timer.abort();
        }
    }
}

impl<C, V> OverlayStore<C, V>
where
    C: Send + Sync + 'static,
    V: Send + 'static,
{
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    stack: OverlayStack::default(),
                    subscribers: Vec::new(),
                    next_subscriber: 0,
                    timers: HashMap::new(),
                }),
            }),
        }
    }

    /// Show an overlay on top of the stack.
    ///
    /// If `key` is already live the stack is left untouched and the returned
    /// [`Pending`] fails with [`OverlayError::DuplicateKey`].
    ///
    /// A positive `options.duration` schedules a timer on the current tokio
    /// runtime that resolves the entry with [`Resolution::TimedOut`].
    pub fn push(&self, key: impl Into<String>, component: C, options: OverlayOptions) -> Pending<V> {
        let key: Arc<str> = Arc::from(key.into());

        let (pending, subscribers) = {
            let mut inner = self.shared.inner.lock();

            if inner.stack.contains(&key) {
                tracing::warn!(
                    key = %key,
                    "Overlay with key \"{}\" already exists. Not adding a duplicate.",
                    key
                );
                let error = OverlayError::DuplicateKey {
                    key: key.to_string(),
                };
                return Pending::rejected(key, error);
            }

            let (entry, pending) = OverlayEntry::attached(
                Arc::clone(&key),
                component,
                options,
                Arc::downgrade(&self.shared),
            );
            let resolver = entry.resolver().clone();
            inner.dispatch(OverlayAction::Push(entry));

            if let Some(delay) = options.auto_dismiss_after() {
                if let Some(timer) = schedule_timeout(resolver.clone(), delay) {
                    inner.timers.insert(resolver.id(), timer);
                }
            }

            tracing::debug!(
                key = %key,
                id = %resolver.id(),
                depth = inner.stack.len(),
                "Overlay pushed"
            );
            (pending, inner.subscribers())
        };

        notify(&subscribers);
        pending
    }

    /// Resolve the entry under `key` with [`Resolution::Removed`].
    pub fn remove(&self, key: &str) -> bool {
        self.remove_with(key, Resolution::Removed)
    }

    /// Resolve the entry under `key` with `reason`, removing it.
    ///
    /// Returns `false` (and does nothing) if no such entry is live.
    pub fn remove_with(&self, key: &str, reason: Resolution<V>) -> bool {
        let resolver = self
            .shared
            .inner
            .lock()
            .stack
            .get(key)
            .map(|entry| entry.resolver().clone());

        match resolver {
            Some(resolver) => resolver.resolve_with(reason),
            None => {
                tracing::trace!(key = key, "Remove of unknown overlay ignored");
                false
            }
        }
    }

    /// Close the topmost overlay with [`Resolution::Closed`].
    pub fn pop(&self) -> bool {
        match self.current() {
            Some(top) => self.remove_with(top.key(), Resolution::Closed),
            None => false,
        }
    }

    /// Settle every entry with [`Resolution::Cleared`] and empty the stack.
    ///
    /// Subscribers are notified once. Returns how many entries were cleared.
    pub fn clear(&self) -> usize {
        let (count, subscribers) = {
            let mut inner = self.shared.inner.lock();
            let entries = inner.stack.clone();
            if entries.is_empty() {
                return 0;
            }

            inner.dispatch(OverlayAction::Clear);
            for entry in entries.iter() {
                inner.cancel_timer(entry.id());
                entry.resolver().settle(Resolution::Cleared);
            }

            tracing::debug!(count = entries.len(), "Overlay stack cleared");
            (entries.len(), inner.subscribers())
        };

        notify(&subscribers);
        count
    }

    /// Clear the stack and drop every subscriber.
    pub fn reset(&self) {
        self.clear();
        let subscribers = std::mem::take(&mut self.shared.inner.lock().subscribers);
        // Dropped outside the lock; a callback may own a Subscription.
        drop(subscribers);
    }

    /// Topmost entry, if any.
    pub fn current(&self) -> Option<OverlayEntry<C, V>> {
        self.shared.inner.lock().stack.top().cloned()
    }

    /// Snapshot of the whole stack, bottom first.
    pub fn all(&self) -> OverlayStack<C, V> {
        self.shared.inner.lock().stack.clone()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.shared.inner.lock().stack.contains(key)
    }

    pub fn len(&self) -> usize {
        self.shared.inner.lock().stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Register `callback` to run after every change to the stack.
    ///
    /// Callbacks run synchronously on the thread that made the change,
    /// outside the store lock.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut inner = self.shared.inner.lock();
        let id = inner.next_subscriber;
        inner.next_subscriber += 1;
        inner.subscribers.push((id, Arc::new(callback)));

        let weak = Arc::downgrade(&self.shared);
        let registry: Weak<dyn Unsubscribe> = weak;
        Subscription::new(id, registry)
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.inner.lock().subscribers.len()
    }
}

fn schedule_timeout<C, V>(resolver: Resolver<C, V>, delay: Duration) -> Option<AbortHandle>
where
    C: Send + Sync + 'static,
    V: Send + 'static,
{
    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
        tracing::warn!(
            key = %resolver.key(),
            delay = ?delay,
            "No tokio runtime; overlay will not auto-dismiss"
        );
        return None;
    };

    let task = runtime.spawn(async move {
        tokio::time::sleep(delay).await;
        resolver.resolve_with(Resolution::TimedOut);
    });
    Some(task.abort_handle())
}

impl<C, V> Clone for OverlayStore<C, V> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<C, V> Default for OverlayStore<C, V>
where
    C: Send + Sync + 'static,
    V: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C, V> std::fmt::Debug for OverlayStore<C, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayStore")
            .field("stack", &self.shared.inner.lock().stack)
            .finish_non_exhaustive()
    }
}
