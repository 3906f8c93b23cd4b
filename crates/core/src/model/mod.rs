mod ids;
mod level;
mod profile;
mod progress;
mod session;
mod topic;

pub use ids::{ProgressEntryId, SubTopicId, TopicId};
pub use level::{Level, LevelError, LevelFilter};
pub use profile::UserProfile;
pub use progress::{ProgressEntry, ProgressList};
pub use session::{SessionToken, SessionTokenError};
pub use topic::{SubTopic, SubTopicLink, Topic};
