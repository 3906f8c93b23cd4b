use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{NoticeLine, ViewState, leave_if_expired, use_watch, view_state_from_phase};
use crate::vm::map_notice;

#[component]
pub fn ProfileView() -> Element {
    let ctx = use_context::<AppContext>();
    let loader = use_hook(|| ctx.profile_loader());

    let state = use_watch({
        let loader = loader.clone();
        move || loader.subscribe()
    });
    use_future(move || {
        let loader = loader.clone();
        async move {
            let _ = loader.load().await;
        }
    });

    let snapshot = state.read().clone();
    leave_if_expired(snapshot.session_expired);

    let success = map_notice(snapshot.success.as_ref());
    let error_notice = map_notice(snapshot.error.as_ref()).map(|notice| notice.text);

    rsx! {
        div { class: "page",
            h2 { "User Profile" }

            match view_state_from_phase(snapshot.phase, snapshot.user) {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "empty", "Loading profile..." }
                },
                ViewState::Error(err) => {
                    let text = error_notice.clone().unwrap_or_else(|| err.message().to_string());
                    rsx! {
                        p { class: "notice-error", "{text}" }
                    }
                }
                ViewState::Ready(user) => rsx! {
                    div { class: "card",
                        NoticeLine { notice: success }
                        div {
                            h3 { "Username" }
                            p { "{user.username}" }
                        }
                        div {
                            h3 { "Email" }
                            p { "{user.email}" }
                        }
                    }
                },
            }
        }
    }
}
