use dioxus::prelude::*;
use dioxus_router::navigator;
use services::LoadPhase;
use tokio::sync::watch;

use crate::routes::Route;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

/// Collapse a view-model's load phase and data into what the page shows.
#[must_use]
pub fn view_state_from_phase<T>(phase: LoadPhase, data: Option<T>) -> ViewState<T> {
    match (phase, data) {
        (LoadPhase::Idle, _) => ViewState::Idle,
        (LoadPhase::Loading, _) => ViewState::Loading,
        (LoadPhase::Loaded, Some(data)) => ViewState::Ready(data),
        (LoadPhase::Loaded, None) | (LoadPhase::Failed, _) => ViewState::Error(ViewError::Unknown),
    }
}

/// Mirror a view-model's watch channel into a signal so the component re-renders on change.
pub fn use_watch<T>(subscribe: impl FnOnce() -> watch::Receiver<T>) -> Signal<T>
where
    T: Clone + 'static,
{
    let receiver = use_hook(subscribe);
    let value = use_signal({
        let receiver = receiver.clone();
        move || receiver.borrow().clone()
    });
    use_future(move || {
        let mut receiver = receiver.clone();
        let mut value = value;
        async move {
            while receiver.changed().await.is_ok() {
                let next = receiver.borrow_and_update().clone();
                value.set(next);
            }
        }
    });
    value
}

/// A rejected token was already cleared by the view-model; send the user back to sign in.
pub fn leave_if_expired(expired: bool) {
    if expired {
        navigator().replace(Route::Login {});
    }
}
