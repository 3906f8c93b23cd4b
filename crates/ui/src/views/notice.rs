use dioxus::prelude::*;

use crate::vm::NoticeVm;

#[component]
pub fn NoticeLine(#[props(!optional)] notice: Option<NoticeVm>) -> Element {
    match notice {
        Some(notice) => rsx! {
            p { class: notice.class, "{notice.text}" }
        },
        None => rsx! {},
    }
}
