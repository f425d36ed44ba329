//! The seam between the client and the network.

use async_trait::async_trait;

use crate::error::Result;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one HTTP round-trip.
///
/// Implementations return non-2xx responses as data; only failures where no
/// response arrived map to [`ApiError::Transport`](crate::ApiError::Transport).
/// There is no timeout or cancellation contract.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}
