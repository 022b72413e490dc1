//! Base trait for intents (actions) in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - Caller requests (show an overlay, close one)
/// - System events (duration timers, interaction dismiss)
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}
