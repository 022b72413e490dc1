use thiserror::Error;

/// Errors surfaced through an overlay's pending result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverlayError {
    /// `push` targeted a key that is already on the stack.
    #[error("Duplicate overlay key: {key}")]
    DuplicateKey { key: String },

    /// The store and every handle to the entry were dropped before it settled.
    #[error("Overlay '{key}' was dropped before it resolved")]
    Abandoned { key: String },

    /// The result was already handed out by [`Pending::try_take`](super::Pending::try_take).
    #[error("Result of overlay '{key}' was already taken")]
    Taken { key: String },
}

impl OverlayError {
    pub fn key(&self) -> &str {
        match self {
            OverlayError::DuplicateKey { key }
            | OverlayError::Abandoned { key }
            | OverlayError::Taken { key } => key,
        }
    }
}
