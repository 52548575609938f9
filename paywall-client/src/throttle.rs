//! Concurrency limit for outgoing requests.

use crate::error::{ApiError, ApiResult};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Bounds the number of requests in flight. Requests past the bound wait
/// for a permit in FIFO order.
#[derive(Debug, Clone)]
pub struct Throttler {
    semaphore: Arc<Semaphore>,
    limit: usize,
}

/// Held for the lifetime of one request, including reading its body.
#[derive(Debug)]
pub struct ThrottlePermit {
    _permit: OwnedSemaphorePermit,
}

impl Throttler {
    /// A limit of zero is raised to one.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(limit)),
            limit,
        }
    }

    pub async fn acquire(&self) -> ApiResult<ThrottlePermit> {
        let permit = Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map_err(|_| ApiError::Cancelled)?;
        Ok(ThrottlePermit { _permit: permit })
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Requests currently holding a permit.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.limit - self.semaphore.available_permits()
    }
}
