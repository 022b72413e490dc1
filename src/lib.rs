//! A stack of transient, asynchronously resolved overlays.
//!
//! [`store::OverlayStore`] owns the stack. Pushing an overlay returns a
//! [`store::Pending`] that settles when the overlay leaves the stack, whether
//! it was closed, removed, cleared, timed out or dismissed by interaction.

pub mod config;
pub mod interaction;
pub mod logging;
pub mod mvi;
pub mod overlays;
pub mod store;
pub mod surface;

pub use interaction::{InteractionConfig, InteractionDismiss, InteractionEvent, InteractionKind};
pub use overlays::{Keyed, Overlays};
pub use store::{
    OverlayEntry, OverlayError, OverlayOptions, OverlayStack, OverlayStore, Pending, Resolution,
    Resolver, Subscription,
};
pub use surface::{OverlayProps, OverlaySurface, OverlayView};
