//! Stack entries and the resolver handle that settles them.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::oneshot;

use super::options::OverlayOptions;
use super::pending::Pending;
use super::resolution::Resolution;
use super::Shared;

/// Identity of one accepted push.
///
/// Keys may be reused after removal; ids never are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

impl EntryId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        EntryId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

type Slot<V> = Arc<Mutex<Option<oneshot::Sender<Resolution<V>>>>>;

/// Settles one overlay entry and removes it from its store.
///
/// Cheap to clone; every clone targets the same entry instance. Only the
/// first resolution has any effect, whichever path (button, timer,
/// interaction, clear) gets there first.
pub struct Resolver<C, V> {
    id: EntryId,
    key: Arc<str>,
    slot: Slot<V>,
    store: Weak<Shared<C, V>>,
}

impl<C, V> Clone for Resolver<C, V> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            key: Arc::clone(&self.key),
            slot: Arc::clone(&self.slot),
            store: Weak::clone(&self.store),
        }
    }
}

impl<C, V> Resolver<C, V> {
    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether this entry's result has already been delivered.
    pub fn is_settled(&self) -> bool {
        self.slot.lock().is_none()
    }

    /// Deliver `resolution` without touching any store.
    ///
    /// Returns `false` if the entry was already settled.
    pub(crate) fn settle(&self, resolution: Resolution<V>) -> bool {
        let Some(sender) = self.slot.lock().take() else {
            return false;
        };
        // The receiver may be gone; the entry still counts as settled.
        let _ = sender.send(resolution);
        true
    }

    pub(crate) fn take_sender(&self) -> Option<oneshot::Sender<Resolution<V>>> {
        self.slot.lock().take()
    }
}

impl<C, V> Resolver<C, V>
where
    C: Send + Sync + 'static,
    V: Send + 'static,
{
    /// Resolve the entry with a caller value.
    pub fn resolve(&self, value: V) -> bool {
        self.resolve_with(Resolution::Value(value))
    }

    /// Resolve the entry and remove it from its store.
    ///
    /// Returns `true` only for the call that actually settled the entry.
    pub fn resolve_with(&self, resolution: Resolution<V>) -> bool {
        match self.store.upgrade() {
            Some(shared) => shared.release(self, resolution),
            None => self.settle(resolution),
        }
    }
}

impl<C, V> fmt::Debug for Resolver<C, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("id", &self.id)
            .field("key", &self.key)
            .field("settled", &self.is_settled())
            .finish()
    }
}

/// One live overlay on the stack.
pub struct OverlayEntry<C, V> {
    component: Arc<C>,
    options: OverlayOptions,
    resolver: Resolver<C, V>,
}

impl<C, V> Clone for OverlayEntry<C, V> {
    fn clone(&self) -> Self {
        Self {
            component: Arc::clone(&self.component),
            options: self.options,
            resolver: self.resolver.clone(),
        }
    }
}

impl<C, V> OverlayEntry<C, V> {
    pub(crate) fn attached(
        key: Arc<str>,
        component: C,
        options: OverlayOptions,
        store: Weak<Shared<C, V>>,
    ) -> (Self, Pending<V>) {
        let (sender, receiver) = oneshot::channel();
        let resolver = Resolver {
            id: EntryId::next(),
            key: Arc::clone(&key),
            slot: Arc::new(Mutex::new(Some(sender))),
            store,
        };
        let entry = Self {
            component: Arc::new(component),
            options,
            resolver,
        };
        (entry, Pending::waiting(key, receiver))
    }

    /// Build an entry that belongs to no store.
    ///
    /// Resolving it only settles its pending result. Useful for driving the
    /// reducer directly.
    pub fn detached(
        key: impl Into<String>,
        component: C,
        options: OverlayOptions,
    ) -> (Self, Pending<V>) {
        let key: Arc<str> = Arc::from(key.into());
        Self::attached(key, component, options, Weak::new())
    }

    pub fn id(&self) -> EntryId {
        self.resolver.id
    }

    pub fn key(&self) -> &str {
        &self.resolver.key
    }

    pub fn component(&self) -> &C {
        &self.component
    }

    pub fn options(&self) -> &OverlayOptions {
        &self.options
    }

    pub fn resolver(&self) -> &Resolver<C, V> {
        &self.resolver
    }
}

impl<C, V> OverlayEntry<C, V>
where
    C: Send + Sync + 'static,
    V: Send + 'static,
{
    pub fn resolve(&self, value: V) -> bool {
        self.resolver.resolve(value)
    }

    pub fn resolve_with(&self, resolution: Resolution<V>) -> bool {
        self.resolver.resolve_with(resolution)
    }
}

impl<C, V> PartialEq for OverlayEntry<C, V> {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl<C, V> Eq for OverlayEntry<C, V> {}

impl<C, V> fmt::Debug for OverlayEntry<C, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayEntry")
            .field("id", &self.id())
            .field("key", &self.key())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
