use std::sync::Arc;

use tokio::sync::watch;
use tracing::warn;

use storage::SessionStore;
use tracker_core::model::UserProfile;

use crate::error::ApiError;
use crate::gateway::ApiGateway;
use crate::notice::{Notice, NoticeIssuer, NoticeKind, NoticeLifetime, schedule_clear};
use crate::protocol::LoadPhase;
use crate::session_service::expire_on_rejection;

pub const LOAD_SUCCESS: &str = "Profile loaded successfully!";
pub const LOAD_FAILED: &str = "Failed to load profile. Please try again.";

#[derive(Clone, Debug, PartialEq)]
pub struct ProfileState {
    pub phase: LoadPhase,
    pub user: Option<UserProfile>,
    pub success: Option<Notice>,
    pub error: Option<Notice>,
    pub session_expired: bool,
}

impl Default for ProfileState {
    fn default() -> Self {
        Self {
            // The profile view starts fetching as soon as it exists.
            phase: LoadPhase::Loading,
            user: None,
            success: None,
            error: None,
            session_expired: false,
        }
    }
}

/// Single fetch of the signed-in user. The success notice stays for the view's lifetime.
#[derive(Clone)]
pub struct ProfileLoader {
    gateway: Arc<dyn ApiGateway>,
    session: Arc<dyn SessionStore>,
    state: Arc<watch::Sender<ProfileState>>,
    notices: NoticeIssuer,
}

impl ProfileLoader {
    pub const SUCCESS_LIFETIME: NoticeLifetime = NoticeLifetime::Persistent;

    #[must_use]
    pub fn new(gateway: Arc<dyn ApiGateway>, session: Arc<dyn SessionStore>) -> Self {
        let (state, _) = watch::channel(ProfileState::default());
        Self {
            gateway,
            session,
            state: Arc::new(state),
            notices: NoticeIssuer::default(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> ProfileState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ProfileState> {
        self.state.subscribe()
    }

    /// # Errors
    ///
    /// Returns the gateway's `ApiError`; the view shows the error message and no user.
    pub async fn load(&self) -> Result<(), ApiError> {
        self.state.send_modify(|s| s.phase = LoadPhase::Loading);

        match self.gateway.fetch_profile().await {
            Ok(user) => {
                let notice = self.notices.issue(NoticeKind::Success, LOAD_SUCCESS);
                self.state.send_modify(|s| {
                    s.user = Some(user);
                    s.success = Some(notice.clone());
                    s.error = None;
                    s.phase = LoadPhase::Loaded;
                });
                schedule_clear(&self.state, &notice, Self::SUCCESS_LIFETIME, |s| {
                    &mut s.success
                });
                Ok(())
            }
            Err(err) => {
                warn!("error fetching profile: {err}");
                let expired = expire_on_rejection(self.session.as_ref(), &err);
                let notice = self.notices.issue(NoticeKind::Error, LOAD_FAILED);
                self.state.send_modify(|s| {
                    s.user = None;
                    s.success = None;
                    s.error = Some(notice);
                    s.phase = LoadPhase::Failed;
                    s.session_expired |= expired;
                });
                Err(err)
            }
        }
    }
}
