//! Progress view-model: the completed-topics list and its delete protocol.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use storage::SessionStore;
use tracker_core::model::{ProgressEntry, ProgressEntryId};

use crate::error::ApiError;
use crate::gateway::ApiGateway;
use crate::notice::{NOTICE_TTL, Notice, NoticeIssuer, NoticeKind, NoticeLifetime, schedule_clear};
use crate::protocol::{ErrorPolicy, LoadGeneration, LoadPhase, WriteStrategy};
use crate::session_service::expire_on_rejection;

pub const DELETE_SUCCESS: &str = "Topic removed from progress!";
pub const DELETE_FAILED: &str = "Failed to remove topic from progress.";
pub const LOAD_FAILED: &str = "Failed to load progress.";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProgressState {
    pub phase: LoadPhase,
    pub entries: Vec<ProgressEntry>,
    /// Bumped by every explicit refresh; never reused for anything else.
    pub refresh_trigger: u64,
    pub success: Option<Notice>,
    /// Only populated under `ErrorPolicy::Surface`.
    pub error: Option<Notice>,
    /// Last failure, kept for diagnostics whatever the error policy.
    pub last_failure: Option<String>,
    pub session_expired: bool,
}

#[derive(Clone)]
pub struct ProgressTracker {
    gateway: Arc<dyn ApiGateway>,
    session: Arc<dyn SessionStore>,
    state: Arc<watch::Sender<ProgressState>>,
    loads: LoadGeneration,
    notices: NoticeIssuer,
    strategy: WriteStrategy,
    error_policy: ErrorPolicy,
}

impl ProgressTracker {
    pub const WRITE_STRATEGY: WriteStrategy = WriteStrategy::TrustAfterWrite;
    pub const ERROR_POLICY: ErrorPolicy = ErrorPolicy::LogOnly;

    #[must_use]
    pub fn new(gateway: Arc<dyn ApiGateway>, session: Arc<dyn SessionStore>) -> Self {
        let (state, _) = watch::channel(ProgressState::default());
        Self {
            gateway,
            session,
            state: Arc::new(state),
            loads: LoadGeneration::default(),
            notices: NoticeIssuer::default(),
            strategy: Self::WRITE_STRATEGY,
            error_policy: Self::ERROR_POLICY,
        }
    }

    #[must_use]
    pub fn with_write_strategy(mut self, strategy: WriteStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    #[must_use]
    pub fn write_strategy(&self) -> WriteStrategy {
        self.strategy
    }

    #[must_use]
    pub fn error_policy(&self) -> ErrorPolicy {
        self.error_policy
    }

    #[must_use]
    pub fn snapshot(&self) -> ProgressState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ProgressState> {
        self.state.subscribe()
    }

    /// Fetch the completed list. Run on mount and after each `refresh`.
    ///
    /// # Errors
    ///
    /// Returns the gateway's `ApiError`. Under `LogOnly` nothing is shown to the user.
    pub async fn load(&self) -> Result<(), ApiError> {
        self.state.send_modify(|s| s.phase = LoadPhase::Loading);
        let ticket = self.loads.issue();
        let result = self.gateway.fetch_progress().await;
        if let Err(err) = &result {
            self.note_rejection(err);
        }

        if !self.loads.is_current(ticket) {
            debug!("dropping superseded progress load");
            return result.map(|_| ());
        }

        match result {
            Ok(list) => {
                self.state.send_modify(|s| {
                    s.entries = list.into_entries();
                    s.phase = LoadPhase::Loaded;
                });
                Ok(())
            }
            Err(err) => {
                warn!("error fetching progress: {err}");
                self.state.send_modify(|s| {
                    s.phase = LoadPhase::Failed;
                    s.last_failure = Some(err.to_string());
                });
                self.report(LOAD_FAILED);
                Err(err)
            }
        }
    }

    /// Bump the refresh trigger and reload.
    ///
    /// # Errors
    ///
    /// Returns the gateway's `ApiError`.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        self.state.send_modify(|s| s.refresh_trigger += 1);
        self.load().await
    }

    /// Remove one entry remotely, then locally by id.
    ///
    /// Under `TrustAfterWrite` the local removal is final and no refetch is made.
    /// Loads still in flight when the delete succeeds are dropped on arrival.
    /// On failure the entry stays in the list.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the delete call (or of the refetch, if configured).
    pub async fn delete_entry(&self, id: &ProgressEntryId) -> Result<(), ApiError> {
        if let Err(err) = self.gateway.delete_progress(id).await {
            warn!(entry = %id, "error deleting topic from progress: {err}");
            self.note_rejection(&err);
            self.state.send_modify(|s| s.last_failure = Some(err.to_string()));
            self.report(DELETE_FAILED);
            return Err(err);
        }

        // Loads issued before the delete may still hold the removed entry.
        self.loads.supersede();
        self.state.send_modify(|s| {
            s.entries.retain(|entry| entry.id() != id);
            if s.phase == LoadPhase::Loading {
                s.phase = LoadPhase::Loaded;
            }
        });
        let notice = self.notices.issue(NoticeKind::Success, DELETE_SUCCESS);
        self.state.send_modify(|s| s.success = Some(notice.clone()));
        schedule_clear(
            &self.state,
            &notice,
            NoticeLifetime::AutoClear(NOTICE_TTL),
            |s| &mut s.success,
        );

        self.strategy.settle(|| self.load()).await
    }

    fn report(&self, message: &str) {
        if !self.error_policy.surfaces() {
            return;
        }
        let notice = self.notices.issue(NoticeKind::Error, message);
        self.state.send_modify(|s| s.error = Some(notice.clone()));
        schedule_clear(
            &self.state,
            &notice,
            NoticeLifetime::AutoClear(NOTICE_TTL),
            |s| &mut s.error,
        );
    }

    fn note_rejection(&self, err: &ApiError) {
        if expire_on_rejection(self.session.as_ref(), err) {
            self.state.send_modify(|s| s.session_expired = true);
        }
    }
}
