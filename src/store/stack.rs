use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use super::entry::OverlayEntry;
use crate::mvi::UiState;

/// Ordered overlay entries; the last entry is the topmost.
///
/// Snapshots are immutable and shared: every transition builds a new stack,
/// so holding one never blocks the store and never observes later changes.
pub struct OverlayStack<C, V> {
    entries: Arc<[OverlayEntry<C, V>]>,
}

impl<C, V> OverlayStack<C, V> {
    /// Topmost entry, if any.
    pub fn top(&self) -> Option<&OverlayEntry<C, V>> {
        self.entries.last()
    }

    pub fn get(&self, key: &str) -> Option<&OverlayEntry<C, V>> {
        self.entries.iter().find(|entry| entry.key() == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys in stack order, bottom first.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|entry| entry.key())
    }

    /// True if both values are the very same snapshot.
    pub fn same_snapshot(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}

impl<C, V> Clone for OverlayStack<C, V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<C, V> Default for OverlayStack<C, V> {
    fn default() -> Self {
        Self {
            entries: Arc::from(Vec::new()),
        }
    }
}

impl<C, V> PartialEq for OverlayStack<C, V> {
    fn eq(&self, other: &Self) -> bool {
        self.same_snapshot(other) || self.entries[..] == other.entries[..]
    }
}

impl<C, V> Deref for OverlayStack<C, V> {
    type Target = [OverlayEntry<C, V>];

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

impl<C, V> From<Vec<OverlayEntry<C, V>>> for OverlayStack<C, V> {
    fn from(entries: Vec<OverlayEntry<C, V>>) -> Self {
        Self {
            entries: Arc::from(entries),
        }
    }
}

impl<C, V> FromIterator<OverlayEntry<C, V>> for OverlayStack<C, V> {
    fn from_iter<I: IntoIterator<Item = OverlayEntry<C, V>>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a, C, V> IntoIterator for &'a OverlayStack<C, V> {
    type Item = &'a OverlayEntry<C, V>;
    type IntoIter = std::slice::Iter<'a, OverlayEntry<C, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<C, V> fmt::Debug for OverlayStack<C, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.keys()).finish()
    }
}

impl<C, V> UiState for OverlayStack<C, V>
where
    C: Send + Sync + 'static,
    V: Send + 'static,
{
}
