use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

use super::error::OverlayError;
use super::resolution::Resolution;

/// Outstanding result of a `push`.
///
/// Resolves once the overlay leaves the stack, or immediately with
/// [`OverlayError::DuplicateKey`] if the push was rejected. Awaiting is
/// optional; the overlay's lifecycle does not depend on it.
#[must_use = "dropping a Pending discards the overlay's result, not the overlay"]
pub struct Pending<V> {
    key: Arc<str>,
    state: PendingState<V>,
}

enum PendingState<V> {
    Rejected(OverlayError),
    Waiting(oneshot::Receiver<Resolution<V>>),
    Done,
}

impl<V> Unpin for Pending<V> {}

impl<V> Pending<V> {
    pub(crate) fn waiting(key: Arc<str>, receiver: oneshot::Receiver<Resolution<V>>) -> Self {
        Self {
            key,
            state: PendingState::Waiting(receiver),
        }
    }

    pub(crate) fn rejected(key: Arc<str>, error: OverlayError) -> Self {
        Self {
            key,
            state: PendingState::Rejected(error),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// True if the push was refused and no overlay was created.
    pub fn is_rejected(&self) -> bool {
        matches!(self.state, PendingState::Rejected(_))
    }

    /// Take the result without waiting.
    ///
    /// Returns `None` while the overlay is still on the stack, or after the
    /// result has already been taken. Awaiting a `Pending` whose result was
    /// taken here yields [`OverlayError::Taken`].
    pub fn try_take(&mut self) -> Option<Result<Resolution<V>, OverlayError>> {
        let result = match &mut self.state {
            PendingState::Rejected(error) => Err(error.clone()),
            PendingState::Waiting(receiver) => match receiver.try_recv() {
                Ok(resolution) => Ok(resolution),
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Closed) => Err(OverlayError::Abandoned {
                    key: self.key.to_string(),
                }),
            },
            PendingState::Done => return None,
        };
        self.state = PendingState::Done;
        Some(result)
    }

    fn abandoned(&self) -> OverlayError {
        OverlayError::Abandoned {
            key: self.key.to_string(),
        }
    }
}

impl<V> Future for Pending<V> {
    type Output = Result<Resolution<V>, OverlayError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match std::mem::replace(&mut this.state, PendingState::Done) {
            PendingState::Rejected(error) => Poll::Ready(Err(error)),
            PendingState::Waiting(mut receiver) => match Pin::new(&mut receiver).poll(cx) {
                Poll::Ready(Ok(resolution)) => Poll::Ready(Ok(resolution)),
                Poll::Ready(Err(_)) => Poll::Ready(Err(this.abandoned())),
                Poll::Pending => {
                    this.state = PendingState::Waiting(receiver);
                    Poll::Pending
                }
            },
            PendingState::Done => Poll::Ready(Err(OverlayError::Taken {
                key: this.key.to_string(),
            })),
        }
    }
}

impl<V> std::fmt::Debug for Pending<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.state {
            PendingState::Rejected(_) => "rejected",
            PendingState::Waiting(_) => "waiting",
            PendingState::Done => "done",
        };
        f.debug_struct("Pending")
            .field("key", &self.key)
            .field("state", &state)
            .finish()
    }
}
