//! The command/response seam between the AT transport and command helpers.
//!
//! Command helpers (in `tetralib-sds` and `tetralib-ctrl`) only ever need to
//! submit one AT request and await its response lines. They operate on a
//! [`Requester`] rather than on the concrete AT channel, enabling both real
//! terminal control and deterministic unit testing with a scripted
//! [`RequesterFn`].

use async_trait::async_trait;
use std::future::Future;
use tokio_util::sync::CancellationToken;

use crate::error::Result;

/// Something that can submit an AT request and await the response lines.
///
/// The returned lines are the data lines accumulated before the `OK`
/// terminator, in arrival order; the terminator itself is never included.
#[async_trait]
pub trait Requester: Send + Sync {
    /// Submit `request` and await its response.
    ///
    /// Cancelling `token` aborts the wait with
    /// [`Error::Cancelled`](crate::error::Error::Cancelled).
    async fn request(&self, token: &CancellationToken, request: &str) -> Result<Vec<String>>;
}

/// Wraps an async closure into the [`Requester`] contract, so scripted
/// responders can stand in for a real AT channel in tests.
pub struct RequesterFn<F>(pub F);

#[async_trait]
impl<F, Fut> Requester for RequesterFn<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<String>>> + Send,
{
    async fn request(&self, _token: &CancellationToken, request: &str) -> Result<Vec<String>> {
        (self.0)(request.to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn closure_acts_as_requester() {
        let requester = RequesterFn(|request: String| async move {
            assert_eq!(request, "AT+CTOM?");
            Ok(vec!["+CTOM: 0".to_string()])
        });

        let token = CancellationToken::new();
        let lines = requester.request(&token, "AT+CTOM?").await.unwrap();
        assert_eq!(lines, vec!["+CTOM: 0"]);
    }
}
