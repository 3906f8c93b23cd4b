use tracker_core::model::{ProgressEntry, ProgressEntryId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressItemVm {
    pub id: ProgressEntryId,
    pub title: String,
}

impl From<&ProgressEntry> for ProgressItemVm {
    fn from(entry: &ProgressEntry) -> Self {
        Self {
            id: entry.id().clone(),
            title: entry.title().to_string(),
        }
    }
}

#[must_use]
pub fn map_progress_items(entries: &[ProgressEntry]) -> Vec<ProgressItemVm> {
    entries.iter().map(ProgressItemVm::from).collect()
}
