use serde::{Deserialize, Serialize};

use crate::model::ids::ProgressEntryId;

/// A topic-level completion record as reported by the progress endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEntry {
    #[serde(rename = "_id")]
    id: ProgressEntryId,
    title: String,
}

impl ProgressEntry {
    #[must_use]
    pub fn new(id: ProgressEntryId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &ProgressEntryId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Payload of the progress endpoint. A missing `completed` field is an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressList {
    #[serde(default)]
    pub completed: Vec<ProgressEntry>,
}

impl ProgressList {
    #[must_use]
    pub fn into_entries(self) -> Vec<ProgressEntry> {
        self.completed
    }
}
