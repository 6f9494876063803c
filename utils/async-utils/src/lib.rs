//! Small async helpers shared across the workspace.

use std::future::Future;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// The reason an [`OrCancelExt::or_cancel`] future resolved without a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelErr {
    /// The cancellation token fired before the future completed.
    Cancelled,
}

/// Extension trait racing a future against a [`CancellationToken`].
#[async_trait]
pub trait OrCancelExt: Future + Sized {
    /// Await `self`, returning [`CancelErr::Cancelled`] if `token` is
    /// cancelled first.
    async fn or_cancel(self, token: &CancellationToken) -> Result<Self::Output, CancelErr>;
}

#[async_trait]
impl<F> OrCancelExt for F
where
    F: Future + Send,
    F::Output: Send,
{
    async fn or_cancel(self, token: &CancellationToken) -> Result<F::Output, CancelErr> {
        tokio::select! {
            biased;
            () = token.cancelled() => Err(CancelErr::Cancelled),
            value = self => Ok(value),
        }
    }
}

#[cfg(test)]
#[path = "lib.test.rs"]
mod tests;
