//! Convenience wrapper for opening and closing overlays.

use uuid::Uuid;

use crate::store::{OverlayOptions, OverlayStore, Pending};

/// Components that may name the key they are shown under.
pub trait Keyed {
    /// `None` means "any key"; a fresh one is generated on open.
    fn overlay_key(&self) -> Option<&str> {
        None
    }
}

/// Open/close facade over an [`OverlayStore`].
pub struct Overlays<C, V> {
    store: OverlayStore<C, V>,
}

impl<C, V> Clone for Overlays<C, V> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<C, V> Overlays<C, V>
where
    C: Send + Sync + 'static,
    V: Send + 'static,
{
    pub fn new(store: OverlayStore<C, V>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &OverlayStore<C, V> {
        &self.store
    }

    /// Open `component` under its own key, or a generated one.
    pub fn open(&self, component: C, options: OverlayOptions) -> Pending<V>
    where
        C: Keyed,
    {
        let key = component
            .overlay_key()
            .map(str::to_owned)
            .unwrap_or_else(generate_key);
        self.store.push(key, component, options)
    }

    pub fn open_as(&self, key: impl Into<String>, component: C, options: OverlayOptions) -> Pending<V> {
        self.store.push(key, component, options)
    }

    /// Close the topmost overlay.
    pub fn close(&self) -> bool {
        self.store.pop()
    }

    pub fn remove(&self, key: &str) -> bool {
        self.store.remove(key)
    }

    pub fn clear(&self) -> usize {
        self.store.clear()
    }
}

/// A key no caller can collide with by accident.
pub fn generate_key() -> String {
    format!("overlay-{}", Uuid::new_v4())
}
