//! Topic catalogue view-model.
//!
//! Holds the topic list, expansion flags and level filter, and runs the
//! completion toggle: remote write, optimistic patch, then a reconciling
//! refetch. Several toggles may overlap; the last applied read wins.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use storage::SessionStore;
use tracker_core::model::{LevelFilter, SubTopicId, Topic, TopicId};

use crate::error::ApiError;
use crate::gateway::{ApiGateway, ToggleCompletion};
use crate::notice::{NOTICE_TTL, Notice, NoticeIssuer, NoticeKind, NoticeLifetime, schedule_clear};
use crate::protocol::{LoadGeneration, LoadPhase, WriteStrategy};
use crate::session_service::expire_on_rejection;

pub const TOGGLE_SUCCESS: &str = "Subtopic status updated!";
pub const TOGGLE_FAILED: &str = "Failed to update subtopic status.";
pub const LOAD_FAILED: &str = "Failed to load topics. Please try again.";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogueState {
    pub phase: LoadPhase,
    pub filter: LevelFilter,
    pub topics: Vec<Topic>,
    pub expanded: HashMap<TopicId, bool>,
    pub success: Option<Notice>,
    pub error: Option<Notice>,
    pub session_expired: bool,
}

impl CatalogueState {
    #[must_use]
    pub fn is_expanded(&self, id: &TopicId) -> bool {
        self.expanded.get(id).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn topic(&self, id: &TopicId) -> Option<&Topic> {
        self.topics.iter().find(|topic| topic.id() == id)
    }
}

/// Where a toggled subtopic lives, captured when the toggle is issued.
#[derive(Clone, Debug, PartialEq, Eq)]
struct SubTopicTarget {
    topic_id: TopicId,
    index: usize,
    stable_id: Option<SubTopicId>,
}

impl SubTopicTarget {
    /// Current index of the target in `topic`; follows the stable id when the server sent one.
    fn resolve(&self, topic: &Topic) -> Option<usize> {
        match &self.stable_id {
            Some(id) => topic.position_of(id),
            None => (self.index < topic.sub_topics().len()).then_some(self.index),
        }
    }
}

#[derive(Clone)]
pub struct TopicCatalogue {
    gateway: Arc<dyn ApiGateway>,
    session: Arc<dyn SessionStore>,
    state: Arc<watch::Sender<CatalogueState>>,
    loads: LoadGeneration,
    notices: NoticeIssuer,
    strategy: WriteStrategy,
    notice_lifetime: NoticeLifetime,
}

impl TopicCatalogue {
    pub const WRITE_STRATEGY: WriteStrategy = WriteStrategy::ReconcileAfterWrite;

    #[must_use]
    pub fn new(gateway: Arc<dyn ApiGateway>, session: Arc<dyn SessionStore>) -> Self {
        let (state, _) = watch::channel(CatalogueState::default());
        Self {
            gateway,
            session,
            state: Arc::new(state),
            loads: LoadGeneration::default(),
            notices: NoticeIssuer::default(),
            strategy: Self::WRITE_STRATEGY,
            notice_lifetime: NoticeLifetime::AutoClear(NOTICE_TTL),
        }
    }

    #[must_use]
    pub fn with_write_strategy(mut self, strategy: WriteStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn write_strategy(&self) -> WriteStrategy {
        self.strategy
    }

    #[must_use]
    pub fn snapshot(&self) -> CatalogueState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CatalogueState> {
        self.state.subscribe()
    }

    /// Fetch the catalogue for `filter` and replace the whole list.
    ///
    /// A failure keeps the previous list and sets the load error; there is no retry.
    /// A result that arrives after a newer load was issued is dropped.
    ///
    /// # Errors
    ///
    /// Returns the gateway's `ApiError`.
    pub async fn load(&self, filter: LevelFilter) -> Result<(), ApiError> {
        self.state.send_modify(|s| {
            s.filter = filter;
            s.phase = LoadPhase::Loading;
        });
        self.fetch(filter).await
    }

    /// Change the level filter; always re-enters `Loading`.
    ///
    /// # Errors
    ///
    /// Returns the gateway's `ApiError`.
    pub async fn set_filter(&self, filter: LevelFilter) -> Result<(), ApiError> {
        self.load(filter).await
    }

    /// Flip the expand/collapse flag of one topic. Local only.
    pub fn toggle_expansion(&self, topic_id: &TopicId) {
        self.state.send_modify(|s| {
            let open = s.expanded.entry(topic_id.clone()).or_insert(false);
            *open = !*open;
        });
    }

    /// Request `!current_status` for one subtopic.
    ///
    /// On success the subtopic is patched locally to `!current_status`, a success
    /// notice is shown, and (under `ReconcileAfterWrite`) the list is refetched
    /// with the current filter. On failure nothing local changes except the
    /// error notice.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of the toggle call, or of the reconciling refetch.
    pub async fn toggle_completion(
        &self,
        topic_id: &TopicId,
        sub_topic_index: usize,
        current_status: bool,
    ) -> Result<(), ApiError> {
        let completed = !current_status;
        let target = self.capture_target(topic_id, sub_topic_index);
        let request = ToggleCompletion {
            topic_id: topic_id.clone(),
            sub_topic_index,
            completed,
        };

        if let Err(err) = self.gateway.toggle_completion(&request).await {
            warn!(
                topic = %topic_id,
                index = sub_topic_index,
                "error updating subtopic status: {err}"
            );
            self.note_rejection(&err);
            self.post_notice(NoticeKind::Error, TOGGLE_FAILED, |s| &mut s.error);
            return Err(err);
        }

        self.state.send_modify(|s| {
            apply_completion(&mut s.topics, &target, completed);
            s.error = None;
        });
        self.post_notice(NoticeKind::Success, TOGGLE_SUCCESS, |s| &mut s.success);

        let settled = self
            .strategy
            .settle(|| async {
                let filter = self.state.borrow().filter;
                self.fetch(filter).await
            })
            .await;
        if let Err(err) = &settled {
            // The write went through; only the follow-up read failed.
            warn!(topic = %topic_id, "reconciling refetch failed: {err}");
            self.post_notice(NoticeKind::Error, TOGGLE_FAILED, |s| &mut s.error);
        }
        settled
    }

    async fn fetch(&self, filter: LevelFilter) -> Result<(), ApiError> {
        let ticket = self.loads.issue();
        let result = self.gateway.fetch_topics(filter).await;
        if let Err(err) = &result {
            self.note_rejection(err);
        }

        if !self.loads.is_current(ticket) {
            debug!(level = filter.as_select_value(), "dropping superseded topic load");
            return result.map(|_| ());
        }

        match result {
            Ok(topics) => {
                self.state.send_modify(|s| {
                    s.topics = topics;
                    s.phase = LoadPhase::Loaded;
                    s.error = None;
                });
                Ok(())
            }
            Err(err) => {
                warn!("error fetching topics: {err}");
                let notice = self.notices.issue(NoticeKind::Error, LOAD_FAILED);
                self.state.send_modify(|s| {
                    s.phase = LoadPhase::Failed;
                    s.error = Some(notice);
                });
                Err(err)
            }
        }
    }

    fn capture_target(&self, topic_id: &TopicId, index: usize) -> SubTopicTarget {
        let stable_id = self
            .state
            .borrow()
            .topic(topic_id)
            .and_then(|topic| topic.sub_topic(index))
            .and_then(|sub| sub.id().cloned());
        SubTopicTarget {
            topic_id: topic_id.clone(),
            index,
            stable_id,
        }
    }

    fn note_rejection(&self, err: &ApiError) {
        if expire_on_rejection(self.session.as_ref(), err) {
            self.state.send_modify(|s| s.session_expired = true);
        }
    }

    fn post_notice<F>(&self, kind: NoticeKind, message: &str, slot: F)
    where
        F: Fn(&mut CatalogueState) -> &mut Option<Notice> + Send + 'static,
    {
        let notice = self.notices.issue(kind, message);
        self.state.send_modify(|s| *slot(s) = Some(notice.clone()));
        schedule_clear(&self.state, &notice, self.notice_lifetime, slot);
    }
}

fn apply_completion(topics: &mut [Topic], target: &SubTopicTarget, completed: bool) {
    let Some(topic) = topics.iter_mut().find(|t| t.id() == &target.topic_id) else {
        return;
    };
    if let Some(index) = target.resolve(topic) {
        topic.set_sub_topic_completed(index, completed);
    }
}
