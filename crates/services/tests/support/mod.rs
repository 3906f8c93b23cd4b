#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use services::{ApiError, ApiGateway, ToggleCompletion};
use storage::{InMemorySessionStore, SessionStore};
use tracker_core::model::{
    Level, LevelFilter, ProgressEntry, ProgressEntryId, ProgressList, SessionToken, SubTopic,
    Topic, TopicId, UserProfile,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Profile,
    Topics(LevelFilter),
    Progress,
    Toggle(ToggleCompletion),
    Delete(ProgressEntryId),
}

#[derive(Clone, Copy, Debug)]
pub enum Failure {
    Server,
    Rejected,
}

impl Failure {
    fn into_error(self) -> ApiError {
        match self {
            Failure::Server => ApiError::HttpStatus(StatusCode::INTERNAL_SERVER_ERROR),
            Failure::Rejected => ApiError::Unauthorized(StatusCode::UNAUTHORIZED),
        }
    }
}

/// In-process stand-in for the tracker backend.
///
/// Holds server-side truth, applies toggles and deletes to it, and records every call.
#[derive(Default)]
pub struct FakeGateway {
    calls: Mutex<Vec<Call>>,
    topics: Mutex<Vec<Topic>>,
    progress: Mutex<Option<Vec<ProgressEntry>>>,
    profile: Mutex<Option<UserProfile>>,
    fail_topics: Mutex<Option<Failure>>,
    fail_toggle: Mutex<Option<Failure>>,
    fail_progress: Mutex<Option<Failure>>,
    fail_delete: Mutex<Option<Failure>>,
    fail_profile: Mutex<Option<Failure>>,
    topic_delays: Mutex<VecDeque<Duration>>,
    progress_delays: Mutex<VecDeque<Duration>>,
    after_toggle: Mutex<Option<Vec<Topic>>>,
}

impl FakeGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn topic_fetches(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Topics(_)))
            .count()
    }

    pub fn progress_fetches(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Progress))
            .count()
    }

    pub fn set_topics(&self, topics: Vec<Topic>) {
        *self.topics.lock().unwrap() = topics;
    }

    pub fn server_topics(&self) -> Vec<Topic> {
        self.topics.lock().unwrap().clone()
    }

    /// `None` makes the progress payload omit the `completed` field.
    pub fn set_progress(&self, entries: Option<Vec<ProgressEntry>>) {
        *self.progress.lock().unwrap() = entries;
    }

    pub fn set_profile(&self, profile: UserProfile) {
        *self.profile.lock().unwrap() = Some(profile);
    }

    pub fn fail_topics(&self, failure: Option<Failure>) {
        *self.fail_topics.lock().unwrap() = failure;
    }

    pub fn fail_toggle(&self, failure: Option<Failure>) {
        *self.fail_toggle.lock().unwrap() = failure;
    }

    pub fn fail_progress(&self, failure: Option<Failure>) {
        *self.fail_progress.lock().unwrap() = failure;
    }

    pub fn fail_delete(&self, failure: Option<Failure>) {
        *self.fail_delete.lock().unwrap() = failure;
    }

    pub fn fail_profile(&self, failure: Option<Failure>) {
        *self.fail_profile.lock().unwrap() = failure;
    }

    /// Delay the next topic fetches, one entry per call, in order.
    pub fn delay_topic_fetches(&self, delays: impl IntoIterator<Item = Duration>) {
        self.topic_delays.lock().unwrap().extend(delays);
    }

    /// Delay the next progress fetches, one entry per call, in order.
    pub fn delay_progress_fetches(&self, delays: impl IntoIterator<Item = Duration>) {
        self.progress_delays.lock().unwrap().extend(delays);
    }

    pub fn server_progress(&self) -> Vec<ProgressEntry> {
        self.progress.lock().unwrap().clone().unwrap_or_default()
    }

    /// Replace server topics after the next successful toggle (derived server-side effects).
    pub fn after_next_toggle(&self, topics: Vec<Topic>) {
        *self.after_toggle.lock().unwrap() = Some(topics);
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ApiGateway for FakeGateway {
    async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
        self.record(Call::Profile);
        if let Some(failure) = *self.fail_profile.lock().unwrap() {
            return Err(failure.into_error());
        }
        self.profile
            .lock()
            .unwrap()
            .clone()
            .ok_or(ApiError::HttpStatus(StatusCode::NOT_FOUND))
    }

    async fn fetch_topics(&self, filter: LevelFilter) -> Result<Vec<Topic>, ApiError> {
        self.record(Call::Topics(filter));
        let delay = self.topic_delays.lock().unwrap().pop_front();
        // Snapshot server state when the request is handled, not when the response lands.
        let failure = *self.fail_topics.lock().unwrap();
        let topics = self.server_topics();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match failure {
            Some(failure) => Err(failure.into_error()),
            None => Ok(topics),
        }
    }

    async fn fetch_progress(&self) -> Result<ProgressList, ApiError> {
        self.record(Call::Progress);
        let delay = self.progress_delays.lock().unwrap().pop_front();
        let failure = *self.fail_progress.lock().unwrap();
        let completed = self.server_progress();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match failure {
            Some(failure) => Err(failure.into_error()),
            None => Ok(ProgressList { completed }),
        }
    }

    async fn toggle_completion(&self, request: &ToggleCompletion) -> Result<(), ApiError> {
        self.record(Call::Toggle(request.clone()));
        if let Some(failure) = *self.fail_toggle.lock().unwrap() {
            return Err(failure.into_error());
        }
        if let Some(replacement) = self.after_toggle.lock().unwrap().take() {
            self.set_topics(replacement);
            return Ok(());
        }
        let mut topics = self.topics.lock().unwrap();
        if let Some(topic) = topics.iter_mut().find(|t| t.id() == &request.topic_id) {
            topic.set_sub_topic_completed(request.sub_topic_index, request.completed);
        }
        Ok(())
    }

    async fn delete_progress(&self, id: &ProgressEntryId) -> Result<(), ApiError> {
        self.record(Call::Delete(id.clone()));
        if let Some(failure) = *self.fail_delete.lock().unwrap() {
            return Err(failure.into_error());
        }
        if let Some(entries) = self.progress.lock().unwrap().as_mut() {
            entries.retain(|entry| entry.id() != id);
        }
        Ok(())
    }
}

pub fn signed_in_store() -> Arc<InMemorySessionStore> {
    Arc::new(InMemorySessionStore::with_token(
        SessionToken::new("test-token").unwrap(),
    ))
}

pub fn session_of(store: &Arc<InMemorySessionStore>) -> Arc<dyn SessionStore> {
    Arc::clone(store) as Arc<dyn SessionStore>
}

pub fn topic(id: &str, subs: &[(&str, Level, bool)]) -> Topic {
    Topic::new(
        TopicId::new(id),
        format!("Topic {id}"),
        subs.iter()
            .map(|(title, level, done)| SubTopic::new(*title, *level).with_completed(*done))
            .collect(),
    )
}

pub fn completed_flags(topics: &[Topic], id: &str) -> Vec<bool> {
    topics
        .iter()
        .find(|t| t.id().as_str() == id)
        .map(|t| t.sub_topics().iter().map(SubTopic::completed).collect())
        .unwrap_or_default()
}

pub fn entry(id: &str, title: &str) -> ProgressEntry {
    ProgressEntry::new(ProgressEntryId::new(id), title)
}

/// Let spawned notice timers run after a time jump.
pub async fn settle_tasks() {
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}
