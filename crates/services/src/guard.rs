use std::sync::Arc;

use storage::SessionStore;
use tracker_core::model::SessionToken;
use tracker_core::AppPath;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(AppPath),
}

/// Decide whether `path` may render given the current token.
///
/// Token presence is the only signal; validity is left to the server.
#[must_use]
pub fn decide(token: Option<&SessionToken>, path: AppPath) -> GuardDecision {
    if path.is_protected() && token.is_none() {
        return GuardDecision::Redirect(AppPath::ENTRY);
    }
    GuardDecision::Render
}

/// Gate for the authenticated area. Reads the session store on every check; nothing is cached.
#[derive(Clone)]
pub struct RouteGuard {
    session: Arc<dyn SessionStore>,
}

impl RouteGuard {
    #[must_use]
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn check(&self, path: AppPath) -> GuardDecision {
        decide(self.session.token().as_ref(), path)
    }
}
