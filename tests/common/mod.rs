//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use overlaystack::{OverlayOptions, OverlayStore, Pending};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Overlay component used across tests: just a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOverlay {
    pub message: &'static str,
}

pub type TestStore = OverlayStore<TestOverlay, &'static str>;

pub fn new_store() -> TestStore {
    OverlayStore::new()
}

pub fn overlay(message: &'static str) -> TestOverlay {
    TestOverlay { message }
}

/// Push with default options.
pub fn open(store: &TestStore, key: &str) -> Pending<&'static str> {
    store.push(key, overlay("Test Message"), OverlayOptions::default())
}

pub fn open_timed(store: &TestStore, key: &str, millis: u64) -> Pending<&'static str> {
    store.push(
        key,
        overlay("Timed Message"),
        OverlayOptions::new().with_duration(Duration::from_millis(millis)),
    )
}

pub fn open_dismissable(store: &TestStore, key: &str) -> Pending<&'static str> {
    store.push(
        key,
        overlay("Close me"),
        OverlayOptions::new().dismiss_on_interaction(true),
    )
}

pub fn keys(store: &TestStore) -> Vec<String> {
    store.all().keys().map(str::to_owned).collect()
}

/// Subscribe a counter that increments on every notification.
pub fn counter(store: &TestStore) -> (Arc<AtomicUsize>, overlaystack::Subscription) {
    let count = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&count);
    let subscription = store.subscribe(move || {
        seen.fetch_add(1, Ordering::SeqCst);
    });
    (count, subscription)
}

pub fn count(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}
