use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use tracing::debug;

use storage::SessionStore;
use tracker_core::model::{
    LevelFilter, ProgressEntryId, ProgressList, SessionToken, Topic, TopicId, UserProfile,
};

use crate::error::{ApiError, AppServicesError};

const PROFILE_PATH: &str = "/api/auth/profile";
const TOPICS_PATH: &str = "/api/topics/topics";
const COMPLETE_PATH: &str = "/api/topics/topics/complete";
const PROGRESS_PATH: &str = "/api/topics/progress";
const PROGRESS_DELETE_PATH: &str = "/api/topics/progress/delete";

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    /// Build a config, rejecting base URLs that are not absolute http(s) URLs.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::InvalidBaseUrl` for anything that is not `http://` or `https://`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppServicesError> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(AppServicesError::InvalidBaseUrl(base_url));
        }
        Ok(Self { base_url })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Body of the completion toggle call. `completed` is the requested new value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleCompletion {
    pub topic_id: TopicId,
    pub sub_topic_index: usize,
    pub completed: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteProgress<'a> {
    topic_id: &'a ProgressEntryId,
}

/// Authenticated calls the view-models issue against the tracker backend.
///
/// Every call carries the session token as a bearer credential. Implementations
/// must tolerate a rejected token on any call and report it as
/// `ApiError::Unauthorized`.
#[async_trait]
pub trait ApiGateway: Send + Sync {
    async fn fetch_profile(&self) -> Result<UserProfile, ApiError>;

    /// `LevelFilter::All` sends no `level` parameter at all.
    async fn fetch_topics(&self, filter: LevelFilter) -> Result<Vec<Topic>, ApiError>;

    async fn fetch_progress(&self) -> Result<ProgressList, ApiError>;

    /// The acknowledgement body is ignored; callers re-derive state by refetching.
    async fn toggle_completion(&self, request: &ToggleCompletion) -> Result<(), ApiError>;

    async fn delete_progress(&self, id: &ProgressEntryId) -> Result<(), ApiError>;
}

/// `reqwest`-backed gateway reading the bearer token from the shared session store.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    config: ClientConfig,
    session: Arc<dyn SessionStore>,
}

impl HttpGateway {
    #[must_use]
    pub fn new(config: ClientConfig, session: Arc<dyn SessionStore>) -> Self {
        Self {
            client: Client::new(),
            config,
            session,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn token(&self) -> Result<SessionToken, ApiError> {
        self.session.token().ok_or(ApiError::MissingToken)
    }

    fn get(&self, path: &str) -> Result<RequestBuilder, ApiError> {
        let token = self.token()?;
        Ok(self
            .client
            .get(self.config.endpoint(path))
            .bearer_auth(token.expose()))
    }

    fn post(&self, path: &str) -> Result<RequestBuilder, ApiError> {
        let token = self.token()?;
        Ok(self
            .client
            .post(self.config.endpoint(path))
            .bearer_auth(token.expose()))
    }
}

#[async_trait]
impl ApiGateway for HttpGateway {
    async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
        let response = self.get(PROFILE_PATH)?.send().await?;
        let profile = check_status(response)?.json().await?;
        Ok(profile)
    }

    async fn fetch_topics(&self, filter: LevelFilter) -> Result<Vec<Topic>, ApiError> {
        let mut request = self.get(TOPICS_PATH)?;
        if let Some(level) = filter.query_value() {
            request = request.query(&[("level", level)]);
        }
        debug!(level = filter.as_select_value(), "fetching topics");
        let response = request.send().await?;
        let topics = check_status(response)?.json().await?;
        Ok(topics)
    }

    async fn fetch_progress(&self) -> Result<ProgressList, ApiError> {
        let response = self.get(PROGRESS_PATH)?.send().await?;
        let progress = check_status(response)?.json().await?;
        Ok(progress)
    }

    async fn toggle_completion(&self, request: &ToggleCompletion) -> Result<(), ApiError> {
        let response = self.post(COMPLETE_PATH)?.json(request).send().await?;
        check_status(response)?;
        Ok(())
    }

    async fn delete_progress(&self, id: &ProgressEntryId) -> Result<(), ApiError> {
        let body = DeleteProgress { topic_id: id };
        let response = self.post(PROGRESS_DELETE_PATH)?.json(&body).send().await?;
        check_status(response)?;
        Ok(())
    }
}

fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ApiError::Unauthorized(status));
    }
    Err(ApiError::HttpStatus(status))
}
