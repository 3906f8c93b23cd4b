mod auth;
mod not_found;
mod notice;
mod profile;
mod progress;
mod state;
mod topics;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use auth::{LoginView, RegisterView};
pub use not_found::NotFoundView;
pub use notice::NoticeLine;
pub use profile::ProfileView;
pub use progress::ProgressView;
pub use state::{ViewError, ViewState, leave_if_expired, use_watch, view_state_from_phase};
pub use topics::TopicsView;
