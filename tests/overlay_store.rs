mod common;

use common::{count, counter, keys, new_store, open, overlay};
use overlaystack::{OverlayError, OverlayOptions, Resolution};

#[test]
fn push_shows_overlay_on_top() {
    let store = new_store();
    let _a = open(&store, "a");
    let _b = open(&store, "b");

    assert_eq!(keys(&store), vec!["a", "b"]);
    assert_eq!(store.current().map(|e| e.key().to_string()), Some("b".to_string()));
    assert_eq!(store.current().unwrap().component(), &overlay("Test Message"));
}

#[test]
fn duplicate_key_is_rejected() {
    let store = new_store();
    let mut first = open(&store, "duplicate-key");
    let mut second = open(&store, "duplicate-key");

    assert!(second.is_rejected());
    assert_eq!(
        second.try_take(),
        Some(Err(OverlayError::DuplicateKey {
            key: "duplicate-key".to_string()
        }))
    );
    assert_eq!(store.len(), 1);
    // The first push is still resolvable.
    assert_eq!(first.try_take(), None);
    assert!(store.remove("duplicate-key"));
    assert_eq!(first.try_take(), Some(Ok(Resolution::Removed)));
}

#[tokio::test]
async fn duplicate_rejection_is_awaitable() {
    let store = new_store();
    let _first = open(&store, "a");
    let err = open(&store, "a").await.unwrap_err();
    assert_eq!(err.key(), "a");
    assert_eq!(err.to_string(), "Duplicate overlay key: a");
}

#[test]
fn keys_can_be_reused_after_removal() {
    let store = new_store();
    let _first = open(&store, "a");
    store.remove("a");

    let mut second = open(&store, "a");
    assert!(!second.is_rejected());
    assert_eq!(store.len(), 1);
    assert_eq!(second.try_take(), None);
}

#[test]
fn entry_resolve_settles_and_removes() {
    let store = new_store();
    let mut pending = open(&store, "test-overlay");
    let entry = store.current().unwrap();

    assert!(entry.resolve("confirmed"));
    assert!(!store.contains("test-overlay"));
    assert_eq!(pending.try_take(), Some(Ok(Resolution::Value("confirmed"))));
}

#[test]
fn resolved_key_is_gone_when_result_arrives() {
    let store = new_store();
    let mut pending = open(&store, "k");
    let resolver = store.current().unwrap().resolver().clone();

    let observer = store.clone();
    let seen = std::sync::Arc::new(parking_lot::Mutex::new(None));
    let slot = std::sync::Arc::clone(&seen);
    let _sub = store.subscribe(move || {
        *slot.lock() = Some(observer.contains("k"));
    });

    resolver.resolve("done");
    assert_eq!(*seen.lock(), Some(false));
    assert_eq!(pending.try_take(), Some(Ok(Resolution::Value("done"))));
}

#[test]
fn remove_is_idempotent() {
    let store = new_store();
    let mut pending = open(&store, "k");
    let _other = open(&store, "other");
    let (notified, _sub) = counter(&store);

    assert!(store.remove("k"));
    assert!(!store.remove("k"));
    assert_eq!(count(&notified), 1);
    assert_eq!(keys(&store), vec!["other"]);
    assert_eq!(pending.try_take(), Some(Ok(Resolution::Removed)));
}

#[test]
fn late_resolve_after_remove_is_noop() {
    let store = new_store();
    let mut pending = open(&store, "k");
    let entry = store.current().unwrap();

    assert!(store.remove_with("k", Resolution::Dismissed));
    assert!(!entry.resolve("too late"));
    assert_eq!(pending.try_take(), Some(Ok(Resolution::Dismissed)));
}

#[test]
fn stale_resolver_does_not_touch_reused_key() {
    let store = new_store();
    let _old = open(&store, "k");
    let stale = store.current().unwrap().resolver().clone();
    store.remove("k");

    let mut fresh = open(&store, "k");
    assert!(!stale.resolve("stale"));
    assert!(store.contains("k"));
    assert_eq!(fresh.try_take(), None);
}

#[test]
fn remove_unknown_key_is_noop() {
    let store = new_store();
    let _a = open(&store, "a");
    let (notified, _sub) = counter(&store);

    assert!(!store.remove("missing"));
    assert_eq!(count(&notified), 0);
    assert_eq!(store.len(), 1);
}

#[test]
fn pop_closes_topmost() {
    let store = new_store();
    let mut first = open(&store, "first");
    let mut second = open(&store, "second");

    assert!(store.pop());
    assert_eq!(keys(&store), vec!["first"]);
    assert_eq!(second.try_take(), Some(Ok(Resolution::Closed)));
    assert_eq!(first.try_take(), None);
}

#[test]
fn pop_on_empty_is_noop() {
    let store = new_store();
    assert!(!store.pop());
    assert!(store.current().is_none());
}

#[test]
fn clear_settles_every_entry_and_notifies_once() {
    let store = new_store();
    let mut pendings = vec![open(&store, "a"), open(&store, "b"), open(&store, "c")];
    let (notified, _sub) = counter(&store);

    assert_eq!(store.clear(), 3);
    assert!(store.all().is_empty());
    assert_eq!(count(&notified), 1);
    for pending in &mut pendings {
        assert_eq!(pending.try_take(), Some(Ok(Resolution::Cleared)));
    }
}

#[test]
fn clear_on_empty_is_noop() {
    let store = new_store();
    let (notified, _sub) = counter(&store);
    assert_eq!(store.clear(), 0);
    assert_eq!(count(&notified), 0);
}

#[test]
fn snapshots_are_read_only_views() {
    let store = new_store();
    let _a = open(&store, "a");
    let snapshot = store.all();

    let _b = open(&store, "b");
    assert_eq!(snapshot.keys().collect::<Vec<_>>(), vec!["a"]);
    assert_eq!(store.all().len(), 2);
}

#[test]
fn subscribers_run_after_each_change() {
    let store = new_store();
    let (notified, subscription) = counter(&store);

    let _a = open(&store, "a");
    let _b = open(&store, "b");
    store.pop();
    assert_eq!(count(&notified), 3);

    subscription.unsubscribe();
    let _c = open(&store, "c");
    assert_eq!(count(&notified), 3);
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn dropping_subscription_unregisters() {
    let store = new_store();
    {
        let (_count, _sub) = counter(&store);
        assert_eq!(store.subscriber_count(), 1);
    }
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn dropping_subscription_that_owns_another_does_not_block() {
    let store = new_store();
    let (done_tx, done_rx) = std::sync::mpsc::channel();

    let worker_store = store.clone();
    std::thread::spawn(move || {
        let inner = worker_store.subscribe(|| {});
        let outer = worker_store.subscribe(move || {
            let _keep = &inner;
        });
        drop(outer);
        let _ = done_tx.send(worker_store.subscriber_count());
    });

    let remaining = done_rx
        .recv_timeout(std::time::Duration::from_secs(3))
        .expect("unsubscribe blocked");
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn await_after_try_take_does_not_panic() {
    let store = new_store();
    let mut pending = open(&store, "k");
    store.remove("k");
    assert_eq!(pending.try_take(), Some(Ok(Resolution::Removed)));

    let awaited = tokio::spawn(async move { pending.await }).await.unwrap();
    assert_eq!(awaited, Err(OverlayError::Taken { key: "k".to_string() }));
}

#[test]
fn subscription_outliving_store_is_harmless() {
    let store = new_store();
    let (_count, sub) = counter(&store);
    drop(store);
    drop(sub);
}

#[test]
fn reset_clears_stack_and_subscribers() {
    let store = new_store();
    let mut pending = open(&store, "a");
    let (notified, _sub) = counter(&store);

    store.reset();
    assert!(store.is_empty());
    assert_eq!(store.subscriber_count(), 0);
    assert_eq!(count(&notified), 1);
    assert_eq!(pending.try_take(), Some(Ok(Resolution::Cleared)));
}

#[test]
fn dropped_store_abandons_pending_results() {
    let store = new_store();
    let mut pending = open(&store, "a");
    drop(store);

    assert_eq!(
        pending.try_take(),
        Some(Err(OverlayError::Abandoned {
            key: "a".to_string()
        }))
    );
}

#[test]
fn uniqueness_holds_across_push_sequences() {
    let store = new_store();
    let mut held = Vec::new();
    for key in ["a", "b", "a", "c", "b", "a"] {
        held.push(open(&store, key));
    }
    store.remove("a");
    held.push(open(&store, "a"));
    held.push(open(&store, "a"));

    let all = keys(&store);
    let mut unique = all.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(all.len(), unique.len());
    assert_eq!(all, vec!["b", "c", "a"]);
}

#[test]
fn options_are_kept_on_the_entry() {
    let store = new_store();
    let options = OverlayOptions::new().dismiss_on_interaction(true);
    let _p = store.push("k", overlay("x"), options);
    assert_eq!(store.current().unwrap().options(), &options);
}
