use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, navigator, use_route};
use services::GuardDecision;
use tracing::warn;
use tracker_core::AppPath;

use crate::context::AppContext;
use crate::views::{LoginView, NotFoundView, ProfileView, ProgressView, RegisterView, TopicsView};

#[derive(Clone, Routable, PartialEq, Debug)]
#[rustfmt::skip]
pub enum Route {
    #[route("/", LoginView)] Login {},
    #[route("/register", RegisterView)] Register {},
    #[nest("/start")]
        #[layout(ProtectedLayout)]
            #[route("/", ProfileView)] Profile {},
            #[route("/topics", TopicsView)] Topics {},
            #[route("/progress", ProgressView)] Progress {},
        #[end_layout]
    #[end_nest]
    #[route("/:..segments", NotFoundView)] NotFound { segments: Vec<String> },
}

impl Route {
    /// The guard's view of this route.
    #[must_use]
    pub fn app_path(&self) -> AppPath {
        match self {
            Route::Login {} => AppPath::Login,
            Route::Register {} => AppPath::Register,
            Route::Profile {} => AppPath::Profile,
            Route::Topics {} => AppPath::Topics,
            Route::Progress {} => AppPath::Progress,
            Route::NotFound { .. } => AppPath::NotFound,
        }
    }

    #[must_use]
    pub fn for_path(path: AppPath) -> Self {
        match path {
            AppPath::Login => Route::Login {},
            AppPath::Register => Route::Register {},
            AppPath::Profile => Route::Profile {},
            AppPath::Topics => Route::Topics {},
            AppPath::Progress => Route::Progress {},
            AppPath::NotFound => Route::NotFound { segments: Vec::new() },
        }
    }
}

/// Runs the route guard on every navigation into `/start`.
#[component]
fn ProtectedLayout() -> Element {
    let ctx = use_context::<AppContext>();
    let route = use_route::<Route>();

    if let GuardDecision::Redirect(target) = ctx.guard().check(route.app_path()) {
        navigator().replace(Route::for_path(target));
        return rsx! {};
    }

    rsx! {
        Navbar {}
        main { class: "content",
            Outlet::<Route> {}
        }
    }
}

#[component]
fn Navbar() -> Element {
    let ctx = use_context::<AppContext>();

    let on_logout = move |_| {
        if let Err(err) = ctx.session().sign_out() {
            warn!("failed to clear session on logout: {err}");
        }
        navigator().replace(Route::Login {});
    };

    rsx! {
        nav { class: "navbar",
            Link { class: "brand", to: Route::Profile {}, "Progress Tracker" }
            div { class: "nav-links",
                Link { to: Route::Profile {}, "Profile" }
                Link { to: Route::Topics {}, "Topics" }
                Link { to: Route::Progress {}, "Progress" }
                button { class: "logout", onclick: on_logout, "Logout" }
            }
        }
    }
}
