//! Change notification feed.
//!
//! The hosted store's change stream carries no usable payload; the only
//! contract is "something changed, re-run your query". The feed mirrors
//! that: opaque notices over a broadcast channel, where missing a few is
//! harmless because the response to one notice and to ten is the same.

use tokio::sync::broadcast;

/// An opaque "something changed" notice. No payload on purpose: consumers
/// re-run their current query instead of patching state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreChange;

/// Receiving half of a store change subscription.
#[derive(Debug)]
pub struct ChangeFeed {
    rx: broadcast::Receiver<StoreChange>,
}

impl ChangeFeed {
    pub fn new(rx: broadcast::Receiver<StoreChange>) -> Self {
        Self { rx }
    }

    /// Wait for the next change notice.
    ///
    /// A lagged receiver collapses everything it missed into a single
    /// notice. `None` means the store side is gone and no further notices
    /// will arrive.
    pub async fn changed(&mut self) -> Option<StoreChange> {
        match self.rx.recv().await {
            Ok(change) => Some(change),
            Err(broadcast::error::RecvError::Lagged(_)) => Some(StoreChange),
            Err(broadcast::error::RecvError::Closed) => None,
        }
    }
}
