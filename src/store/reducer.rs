//! Pure state transitions for the overlay stack.

use std::marker::PhantomData;

use super::entry::OverlayEntry;
use super::stack::OverlayStack;
use crate::mvi::{Intent, Reducer};

/// Actions the store dispatches against its stack.
#[derive(Debug)]
pub enum OverlayAction<C, V> {
    /// Append an entry on top. Key uniqueness is checked by the caller.
    Push(OverlayEntry<C, V>),
    /// Drop every entry with this key. Unknown keys leave the stack as is.
    Remove { key: String },
    /// Drop everything.
    Clear,
}

impl<C, V> Intent for OverlayAction<C, V>
where
    C: Send + Sync + 'static,
    V: Send + 'static,
{
}

pub struct OverlayReducer<C, V>(PhantomData<fn() -> (C, V)>);

impl<C, V> Reducer for OverlayReducer<C, V>
where
    C: Send + Sync + 'static,
    V: Send + 'static,
{
    type State = OverlayStack<C, V>;
    type Intent = OverlayAction<C, V>;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            OverlayAction::Push(entry) => {
                let mut entries = state.to_vec();
                entries.push(entry);
                OverlayStack::from(entries)
            }
            OverlayAction::Remove { key } => {
                // Hand back the same snapshot when nothing matches so the
                // store can skip notifying.
                if !state.contains(&key) {
                    return state;
                }
                state
                    .iter()
                    .filter(|entry| entry.key() != key)
                    .cloned()
                    .collect()
            }
            OverlayAction::Clear => {
                if state.is_empty() {
                    state
                } else {
                    OverlayStack::default()
                }
            }
        }
    }
}
