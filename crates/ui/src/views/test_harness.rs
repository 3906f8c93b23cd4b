use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_history::{MemoryHistory, provide_history_context};
use dioxus_router::{Routable, Router};
use services::{ApiError, ApiGateway, AppServices, ToggleCompletion};
use storage::{InMemorySessionStore, Storage};
use tracker_core::model::{
    LevelFilter, ProgressEntry, ProgressEntryId, ProgressList, SessionToken, Topic, UserProfile,
};

use crate::context::{UiApp, build_app_context};
use crate::platform::{LinkOpenerRef, UiLinkOpener};
use crate::routes::Route;
use crate::views::{ProfileView, ProgressView, TopicsView};

/// Canned server answers. `None` for the profile means the call fails with a 500.
#[derive(Clone, Default)]
pub struct CannedGateway {
    pub profile: Option<UserProfile>,
    pub topics: Vec<Topic>,
    pub progress: Vec<ProgressEntry>,
}

#[async_trait]
impl ApiGateway for CannedGateway {
    async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
        self.profile
            .clone()
            .ok_or(ApiError::HttpStatus(reqwest::StatusCode::INTERNAL_SERVER_ERROR))
    }

    async fn fetch_topics(&self, _filter: LevelFilter) -> Result<Vec<Topic>, ApiError> {
        Ok(self.topics.clone())
    }

    async fn fetch_progress(&self) -> Result<ProgressList, ApiError> {
        Ok(ProgressList {
            completed: self.progress.clone(),
        })
    }

    async fn toggle_completion(&self, _request: &ToggleCompletion) -> Result<(), ApiError> {
        Ok(())
    }

    async fn delete_progress(&self, _id: &ProgressEntryId) -> Result<(), ApiError> {
        Ok(())
    }
}

/// Counts every call and answers with empty data.
#[derive(Default)]
pub struct RecordingGateway {
    calls: AtomicUsize,
}

impl RecordingGateway {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ApiGateway for RecordingGateway {
    async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
        self.record();
        Err(ApiError::HttpStatus(reqwest::StatusCode::INTERNAL_SERVER_ERROR))
    }

    async fn fetch_topics(&self, _filter: LevelFilter) -> Result<Vec<Topic>, ApiError> {
        self.record();
        Ok(Vec::new())
    }

    async fn fetch_progress(&self) -> Result<ProgressList, ApiError> {
        self.record();
        Ok(ProgressList::default())
    }

    async fn toggle_completion(&self, _request: &ToggleCompletion) -> Result<(), ApiError> {
        self.record();
        Ok(())
    }

    async fn delete_progress(&self, _id: &ProgressEntryId) -> Result<(), ApiError> {
        self.record();
        Ok(())
    }
}

struct NoopOpener;

impl UiLinkOpener for NoopOpener {
    fn open_url(&self, _url: &str) {}
}

struct TestApp {
    services: AppServices,
    opener: Arc<NoopOpener>,
}

impl UiApp for TestApp {
    fn services(&self) -> AppServices {
        self.services.clone()
    }

    fn link_opener(&self) -> LinkOpenerRef {
        self.opener.clone()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Profile,
    Topics,
    Progress,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    match use_context::<ViewKind>() {
        ViewKind::Profile => rsx! { ProfileView {} },
        ViewKind::Topics => rsx! { TopicsView {} },
        ViewKind::Progress => rsx! { ProgressView {} },
    }
}

#[derive(Props, Clone)]
struct AppRouterProps {
    app: Arc<TestApp>,
    initial_path: &'static str,
}

impl PartialEq for AppRouterProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

/// The application's own route table, entered at `initial_path`.
#[component]
fn AppRouterHarness(props: AppRouterProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_hook(|| {
        provide_history_context(Rc::new(MemoryHistory::with_initial_path(props.initial_path)));
    });
    rsx! { Router::<Route> {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    /// Build the view, then let its mount-time loads land.
    pub async fn mount(&mut self) {
        self.dom.rebuild_in_place();
        for _ in 0..4 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn setup_view_harness(view: ViewKind, gateway: CannedGateway) -> ViewHarness {
    let storage = Storage {
        session: Arc::new(InMemorySessionStore::with_token(
            SessionToken::new("harness-token").expect("token"),
        )),
    };
    let app = Arc::new(TestApp {
        services: AppServices::with_gateway(Arc::new(gateway), &storage),
        opener: Arc::new(NoopOpener),
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness { dom }
}

/// Mount the full route table at `initial_path` with the given session and gateway.
pub fn setup_app_router(
    initial_path: &'static str,
    storage: &Storage,
    gateway: Arc<dyn ApiGateway>,
) -> ViewHarness {
    let app = Arc::new(TestApp {
        services: AppServices::with_gateway(gateway, storage),
        opener: Arc::new(NoopOpener),
    });
    let dom = VirtualDom::new_with_props(AppRouterHarness, AppRouterProps { app, initial_path });
    ViewHarness { dom }
}
