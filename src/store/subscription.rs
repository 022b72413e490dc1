use std::sync::Weak;

/// Registry side of a subscription, erased so guards are not generic.
pub(crate) trait Unsubscribe: Send + Sync {
    fn unsubscribe(&self, id: u64);
}

/// Keeps a change callback registered for as long as it is alive.
///
/// Dropping the guard (or calling [`Subscription::unsubscribe`]) is the only
/// way to deregister. Guards outliving their store are harmless.
#[must_use = "the callback is unregistered as soon as the Subscription is dropped"]
pub struct Subscription {
    id: u64,
    registry: Weak<dyn Unsubscribe>,
}

impl Subscription {
    pub(crate) fn new(id: u64, registry: Weak<dyn Unsubscribe>) -> Self {
        Self { id, registry }
    }

    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.unsubscribe(self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
