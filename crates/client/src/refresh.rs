//! Single-flight coordination for token refresh
//!
//! At most one refresh call may be outstanding at a time. The first 401
//! starts a flight; every 401 that arrives while it is running joins it and
//! observes the same outcome. The check-and-attach is one synchronous
//! critical section under a mutex, so the invariant holds under real OS
//! threads, not just a cooperative event loop.

use crate::error::ClientError;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Outcome of a refresh flight, cloned to every awaiter
pub type RefreshOutcome = Result<String, RefreshFailure>;

/// Cloneable terminal failure shared by every awaiter of a flight
#[derive(Debug, Clone)]
pub struct RefreshFailure(pub Arc<ClientError>);

impl std::fmt::Display for RefreshFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

type Flight = Shared<BoxFuture<'static, RefreshOutcome>>;

/// Owns the in-flight refresh, if any.
///
/// The slot empties when its flight completes, so a later 401 (after logout
/// and a fresh login, say) starts a new flight.
#[derive(Default)]
pub struct RefreshCoordinator {
    in_flight: Arc<Mutex<Option<Flight>>>,
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Join the running flight, or start `work` as the new one.
    ///
    /// `work` is only invoked when this call wins the slot. The lock is
    /// never held across an await.
    pub fn join_or_start<F, Fut>(&self, work: F) -> impl Future<Output = RefreshOutcome>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = RefreshOutcome> + Send + 'static,
    {
        let mut slot = self
            .in_flight
            .lock()
            .expect("refresh coordinator lock poisoned");

        if let Some(flight) = slot.as_ref() {
            tracing::debug!("refresh already in flight, joining");
            return flight.clone();
        }

        let owner = Arc::clone(&self.in_flight);
        let fut = work();
        let flight = async move {
            let outcome = fut.await;
            owner
                .lock()
                .expect("refresh coordinator lock poisoned")
                .take();
            outcome
        }
        .boxed()
        .shared();

        *slot = Some(flight.clone());
        flight
    }
}
