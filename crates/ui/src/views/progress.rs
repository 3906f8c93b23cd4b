use dioxus::prelude::*;
use tracker_core::model::ProgressEntryId;

use crate::context::AppContext;
use crate::views::{NoticeLine, leave_if_expired, use_watch};
use crate::vm::{ProgressItemVm, map_notice, map_progress_items};

#[component]
pub fn ProgressView() -> Element {
    let ctx = use_context::<AppContext>();
    let tracker = use_hook(|| ctx.progress_tracker());

    let state = use_watch({
        let tracker = tracker.clone();
        move || tracker.subscribe()
    });
    use_future({
        let tracker = tracker.clone();
        move || {
            let tracker = tracker.clone();
            async move {
                let _ = tracker.load().await;
            }
        }
    });

    let on_delete = use_callback(move |id: ProgressEntryId| {
        let tracker = tracker.clone();
        spawn(async move {
            let _ = tracker.delete_entry(&id).await;
        });
    });

    let snapshot = state.read().clone();
    leave_if_expired(snapshot.session_expired);

    let items = map_progress_items(&snapshot.entries);
    let success = map_notice(snapshot.success.as_ref());
    let error = map_notice(snapshot.error.as_ref());

    rsx! {
        div { class: "page",
            h2 { "Your Progress" }

            NoticeLine { notice: success }
            NoticeLine { notice: error }

            if items.is_empty() {
                div { class: "empty",
                    p { "No topics completed yet." }
                    p { "Keep learning to track your progress!" }
                }
            } else {
                ul { class: "progress",
                    for item in items {
                        ProgressItem { key: "{item.id}", item: item.clone(), on_delete }
                    }
                }
            }
        }
    }
}

#[component]
fn ProgressItem(item: ProgressItemVm, on_delete: EventHandler<ProgressEntryId>) -> Element {
    let id = item.id.clone();
    rsx! {
        li { class: "card progress-item",
            span { class: "card-title", "{item.title}" }
            span { class: "status-done", "Completed" }
            button { onclick: move |_| on_delete.call(id.clone()), "Delete" }
        }
    }
}
