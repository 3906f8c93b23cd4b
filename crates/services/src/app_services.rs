use std::sync::Arc;

use storage::Storage;

use crate::catalogue::TopicCatalogue;
use crate::gateway::{ApiGateway, ClientConfig, HttpGateway};
use crate::guard::RouteGuard;
use crate::profile::ProfileLoader;
use crate::progress::ProgressTracker;
use crate::session_service::SessionService;

/// Assembles app-facing services around one session store and one gateway.
///
/// View-models are built fresh per view mount; the session and gateway are shared.
#[derive(Clone)]
pub struct AppServices {
    gateway: Arc<dyn ApiGateway>,
    session: SessionService,
    guard: RouteGuard,
}

impl AppServices {
    /// Services talking HTTP to `config.base_url`.
    #[must_use]
    pub fn http(config: ClientConfig, storage: &Storage) -> Self {
        let gateway = Arc::new(HttpGateway::new(config, Arc::clone(&storage.session)));
        Self::with_gateway(gateway, storage)
    }

    /// Services over any gateway, e.g. a test double.
    #[must_use]
    pub fn with_gateway(gateway: Arc<dyn ApiGateway>, storage: &Storage) -> Self {
        Self {
            gateway,
            session: SessionService::new(Arc::clone(&storage.session)),
            guard: RouteGuard::new(Arc::clone(&storage.session)),
        }
    }

    #[must_use]
    pub fn session(&self) -> SessionService {
        self.session.clone()
    }

    #[must_use]
    pub fn guard(&self) -> RouteGuard {
        self.guard.clone()
    }

    #[must_use]
    pub fn gateway(&self) -> Arc<dyn ApiGateway> {
        Arc::clone(&self.gateway)
    }

    #[must_use]
    pub fn topic_catalogue(&self) -> TopicCatalogue {
        TopicCatalogue::new(self.gateway(), self.session.store())
    }

    #[must_use]
    pub fn progress_tracker(&self) -> ProgressTracker {
        ProgressTracker::new(self.gateway(), self.session.store())
    }

    #[must_use]
    pub fn profile_loader(&self) -> ProfileLoader {
        ProfileLoader::new(self.gateway(), self.session.store())
    }
}
