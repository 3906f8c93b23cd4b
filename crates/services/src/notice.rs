//! Transient success/error messages shown above a view.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, sleep_until};

/// How long Topics/Progress notices stay on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// When a notice goes away on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLifetime {
    /// Cleared after the given delay.
    AutoClear(Duration),
    /// Stays for the life of the view.
    Persistent,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    id: u64,
    kind: NoticeKind,
    message: String,
}

impl Notice {
    #[must_use]
    pub fn kind(&self) -> NoticeKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Hands out notices with unique ids so a late auto-clear never removes a newer message.
#[derive(Clone, Debug, Default)]
pub struct NoticeIssuer {
    next_id: Arc<AtomicU64>,
}

impl NoticeIssuer {
    #[must_use]
    pub fn issue(&self, kind: NoticeKind, message: impl Into<String>) -> Notice {
        Notice {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            kind,
            message: message.into(),
        }
    }
}

/// Clear the notice selected by `slot` once `lifetime` elapses, if it is still `notice`.
///
/// Must be called from within a tokio runtime.
pub(crate) fn schedule_clear<S, F>(
    state: &Arc<watch::Sender<S>>,
    notice: &Notice,
    lifetime: NoticeLifetime,
    slot: F,
) where
    S: Send + Sync + 'static,
    F: Fn(&mut S) -> &mut Option<Notice> + Send + 'static,
{
    let NoticeLifetime::AutoClear(delay) = lifetime else {
        return;
    };
    let deadline = Instant::now() + delay;
    let state = Arc::clone(state);
    let id = notice.id;
    tokio::spawn(async move {
        sleep_until(deadline).await;
        state.send_if_modified(|s| {
            let current = slot(s);
            if current.as_ref().is_some_and(|n| n.id == id) {
                *current = None;
                true
            } else {
                false
            }
        });
    });
}
