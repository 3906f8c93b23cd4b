use dioxus::prelude::*;
use tracker_core::model::{Level, LevelFilter, TopicId};

use crate::context::AppContext;
use crate::views::{NoticeLine, leave_if_expired, use_watch};
use crate::vm::{LinkVm, SubTopicRowVm, TopicCardVm, map_notice, map_topic_cards};

#[component]
pub fn TopicsView() -> Element {
    let ctx = use_context::<AppContext>();
    let catalogue = use_hook(|| ctx.topic_catalogue());
    let links = ctx.link_opener();

    let state = use_watch({
        let catalogue = catalogue.clone();
        move || catalogue.subscribe()
    });
    use_future({
        let catalogue = catalogue.clone();
        move || {
            let catalogue = catalogue.clone();
            async move {
                let filter = catalogue.snapshot().filter;
                let _ = catalogue.load(filter).await;
            }
        }
    });

    let on_filter = use_callback({
        let catalogue = catalogue.clone();
        move |raw: String| {
            let filter = raw.parse::<LevelFilter>().unwrap_or_default();
            let catalogue = catalogue.clone();
            spawn(async move {
                let _ = catalogue.set_filter(filter).await;
            });
        }
    });
    let on_expand = use_callback({
        let catalogue = catalogue.clone();
        move |topic_id: TopicId| catalogue.toggle_expansion(&topic_id)
    });
    let on_toggle = use_callback({
        let catalogue = catalogue.clone();
        move |(topic_id, index, completed): (TopicId, usize, bool)| {
            let catalogue = catalogue.clone();
            spawn(async move {
                let _ = catalogue.toggle_completion(&topic_id, index, completed).await;
            });
        }
    });
    let on_open = use_callback(move |url: String| links.open_url(&url));

    let snapshot = state.read().clone();
    leave_if_expired(snapshot.session_expired);

    let cards = map_topic_cards(&snapshot);
    let success = map_notice(snapshot.success.as_ref());
    let error = map_notice(snapshot.error.as_ref());
    let selected = snapshot.filter.as_select_value();

    rsx! {
        div { class: "page",
            div { class: "page-header",
                h2 { "All Topics" }
                label { r#for: "levelFilter", "Filter by Level:" }
                select {
                    id: "levelFilter",
                    value: "{selected}",
                    onchange: move |evt: FormEvent| on_filter.call(evt.value()),
                    option { value: "", selected: selected.is_empty(), "All" }
                    for level in Level::ALL {
                        option {
                            key: "{level.as_str()}",
                            value: "{level.as_str()}",
                            selected: selected == level.as_str(),
                            "{level.as_str()}"
                        }
                    }
                }
            }

            NoticeLine { notice: success }
            NoticeLine { notice: error }

            if cards.is_empty() {
                p { class: "empty", "Loading topics..." }
            } else {
                ul { class: "topics",
                    for card in cards {
                        TopicCard {
                            key: "{card.id}",
                            card: card.clone(),
                            on_expand,
                            on_toggle,
                            on_open,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn TopicCard(
    card: TopicCardVm,
    on_expand: EventHandler<TopicId>,
    on_toggle: EventHandler<(TopicId, usize, bool)>,
    on_open: EventHandler<String>,
) -> Element {
    let expand_id = card.id.clone();
    let total = card.rows.len();

    rsx! {
        li { class: "card",
            div { class: "card-header",
                span { class: "card-title", "{card.title}" }
                span { class: "card-count", "{card.completed}/{total}" }
                button {
                    onclick: move |_| on_expand.call(expand_id.clone()),
                    "{card.toggle_label()}"
                }
            }
            if card.expanded {
                table { class: "subtopics",
                    thead {
                        tr {
                            th { "Title" }
                            th { "Level" }
                            th { "Links" }
                            th { "Status" }
                        }
                    }
                    tbody {
                        for row in card.rows.iter().cloned() {
                            SubTopicRow {
                                key: "{row.index}",
                                topic_id: card.id.clone(),
                                row,
                                on_toggle,
                                on_open,
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SubTopicRow(
    topic_id: TopicId,
    row: SubTopicRowVm,
    on_toggle: EventHandler<(TopicId, usize, bool)>,
    on_open: EventHandler<String>,
) -> Element {
    let index = row.index;
    let completed = row.completed;

    rsx! {
        tr {
            td { "{row.title}" }
            td { "{row.level}" }
            td { class: "links",
                for link in row.links.iter().cloned() {
                    ExternalLink { key: "{link.label}", link, on_open }
                }
            }
            td { class: "status",
                input {
                    r#type: "checkbox",
                    checked: completed,
                    onchange: move |_| on_toggle.call((topic_id.clone(), index, completed)),
                }
                span { class: row.status_class(), "{row.status_label()}" }
            }
        }
    }
}

#[component]
fn ExternalLink(link: LinkVm, on_open: EventHandler<String>) -> Element {
    let url = link.url.clone();
    rsx! {
        a {
            class: "external-link",
            href: "{link.url}",
            onclick: move |evt: MouseEvent| {
                evt.prevent_default();
                on_open.call(url.clone());
            },
            "{link.label}"
        }
    }
}
