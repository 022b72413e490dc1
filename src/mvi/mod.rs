//! Model-View-Intent (MVI) architecture primitives.
//!
//! This module provides the base traits for the unidirectional data flow
//! the overlay store is built on.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! - **State**: Immutable snapshot of the overlay stack
//! - **Intent**: Actions dispatched by the store (push, remove, clear)
//! - **Reducer**: Pure function that transforms state based on intents

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
