//! Shared building blocks of the view-model protocols.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::ApiError;

/// What a view-model does after a successful remote write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteStrategy {
    /// Keep the optimistic patch, then replace local state with a fresh server read.
    ReconcileAfterWrite,
    /// The optimistic patch is final; no follow-up read.
    TrustAfterWrite,
}

impl WriteStrategy {
    /// Run `refetch` only under `ReconcileAfterWrite`.
    ///
    /// # Errors
    ///
    /// Propagates the refetch error.
    pub async fn settle<F, Fut>(self, refetch: F) -> Result<(), ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), ApiError>>,
    {
        match self {
            WriteStrategy::ReconcileAfterWrite => refetch().await,
            WriteStrategy::TrustAfterWrite => Ok(()),
        }
    }
}

/// Whether failures reach the screen or only the log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorPolicy {
    Surface,
    LogOnly,
}

impl ErrorPolicy {
    #[must_use]
    pub fn surfaces(self) -> bool {
        matches!(self, ErrorPolicy::Surface)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Sequence numbers for reads. Only the most recently issued read may apply its result.
#[derive(Clone, Debug, Default)]
pub struct LoadGeneration {
    latest: Arc<AtomicU64>,
}

impl LoadGeneration {
    #[must_use]
    pub fn issue(&self) -> LoadTicket {
        LoadTicket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    #[must_use]
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// Mark every ticket issued so far as stale.
    pub fn supersede(&self) {
        self.latest.fetch_add(1, Ordering::AcqRel);
    }
}
