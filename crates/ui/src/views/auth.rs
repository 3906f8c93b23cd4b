use dioxus::prelude::*;
use dioxus_router::{Link, navigator};

use crate::context::AppContext;
use crate::routes::Route;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EntryMode {
    SignIn,
    Register,
}

impl EntryMode {
    fn heading(self) -> &'static str {
        match self {
            EntryMode::SignIn => "Sign in",
            EntryMode::Register => "Create your account",
        }
    }

    fn submit_label(self) -> &'static str {
        match self {
            EntryMode::SignIn => "Sign in",
            EntryMode::Register => "Register",
        }
    }
}

#[component]
pub fn LoginView() -> Element {
    rsx! {
        TokenEntry { mode: EntryMode::SignIn }
    }
}

#[component]
pub fn RegisterView() -> Element {
    rsx! {
        TokenEntry { mode: EntryMode::Register }
    }
}

/// Stores the token issued by the auth backend and enters the protected area.
#[component]
fn TokenEntry(mode: EntryMode) -> Element {
    let ctx = use_context::<AppContext>();
    let mut token = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let result = ctx.session().sign_in(&token.read());
        match result {
            Ok(()) => {
                error.set(None);
                navigator().push(Route::Profile {});
            }
            Err(err) => error.set(Some(err.to_string())),
        }
    };

    rsx! {
        div { class: "page",
            form { class: "auth-form", onsubmit: on_submit,
                h2 { "{mode.heading()}" }
                label { r#for: "token", "Access token" }
                input {
                    id: "token",
                    r#type: "password",
                    value: "{token}",
                    oninput: move |evt: FormEvent| token.set(evt.value()),
                }
                if let Some(message) = error() {
                    p { class: "notice-error", "{message}" }
                }
                button { r#type: "submit", "{mode.submit_label()}" }
                match mode {
                    EntryMode::SignIn => rsx! {
                        Link { to: Route::Register {}, "Need an account? Register" }
                    },
                    EntryMode::Register => rsx! {
                        Link { to: Route::Login {}, "Already registered? Sign in" }
                    },
                }
            }
        }
    }
}
