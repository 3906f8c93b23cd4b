use services::{Notice, NoticeKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoticeVm {
    pub class: &'static str,
    pub text: String,
}

impl From<&Notice> for NoticeVm {
    fn from(notice: &Notice) -> Self {
        let class = match notice.kind() {
            NoticeKind::Success => "notice-success",
            NoticeKind::Error => "notice-error",
        };
        Self {
            class,
            text: notice.message().to_string(),
        }
    }
}

#[must_use]
pub fn map_notice(notice: Option<&Notice>) -> Option<NoticeVm> {
    notice.map(NoticeVm::from)
}
