mod notice_vm;
mod progress_vm;
mod topic_vm;

pub use notice_vm::{NoticeVm, map_notice};
pub use progress_vm::{ProgressItemVm, map_progress_items};
pub use topic_vm::{LinkVm, SubTopicRowVm, TopicCardVm, map_topic_cards};
