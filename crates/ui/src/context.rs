use std::sync::Arc;

use services::{
    AppServices, ProfileLoader, ProgressTracker, RouteGuard, SessionService, TopicCatalogue,
};

use crate::platform::LinkOpenerRef;

pub trait UiApp: Send + Sync {
    fn services(&self) -> AppServices;
    fn link_opener(&self) -> LinkOpenerRef;
}

#[derive(Clone)]
pub struct AppContext {
    services: AppServices,
    link_opener: LinkOpenerRef,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            services: app.services(),
            link_opener: app.link_opener(),
        }
    }

    #[must_use]
    pub fn session(&self) -> SessionService {
        self.services.session()
    }

    #[must_use]
    pub fn guard(&self) -> RouteGuard {
        self.services.guard()
    }

    /// Each call builds a fresh view-model; views hold theirs for their lifetime.
    #[must_use]
    pub fn topic_catalogue(&self) -> TopicCatalogue {
        self.services.topic_catalogue()
    }

    #[must_use]
    pub fn progress_tracker(&self) -> ProgressTracker {
        self.services.progress_tracker()
    }

    #[must_use]
    pub fn profile_loader(&self) -> ProfileLoader {
        self.services.profile_loader()
    }

    #[must_use]
    pub fn link_opener(&self) -> LinkOpenerRef {
        Arc::clone(&self.link_opener)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
