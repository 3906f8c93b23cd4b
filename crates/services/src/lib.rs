#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalogue;
pub mod error;
pub mod gateway;
pub mod guard;
pub mod notice;
pub mod profile;
pub mod progress;
pub mod protocol;
pub mod session_service;

pub use app_services::AppServices;
pub use catalogue::{CatalogueState, TopicCatalogue};
pub use error::{ApiError, AppServicesError, SessionError};
pub use gateway::{ApiGateway, ClientConfig, HttpGateway, ToggleCompletion};
pub use guard::{GuardDecision, RouteGuard, decide};
pub use notice::{NOTICE_TTL, Notice, NoticeKind, NoticeLifetime};
pub use profile::{ProfileLoader, ProfileState};
pub use progress::{ProgressState, ProgressTracker};
pub use protocol::{ErrorPolicy, LoadPhase, WriteStrategy};
pub use session_service::SessionService;
