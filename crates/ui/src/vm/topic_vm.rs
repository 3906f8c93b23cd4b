use services::CatalogueState;
use tracker_core::model::{SubTopic, Topic, TopicId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkVm {
    pub label: &'static str,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubTopicRowVm {
    /// Position in the topic's list as received; this is what the toggle call sends.
    pub index: usize,
    pub title: String,
    pub level: &'static str,
    pub completed: bool,
    pub links: Vec<LinkVm>,
}

impl SubTopicRowVm {
    #[must_use]
    pub fn status_label(&self) -> &'static str {
        if self.completed { "Done" } else { "Pending" }
    }

    #[must_use]
    pub fn status_class(&self) -> &'static str {
        if self.completed {
            "status-done"
        } else {
            "status-pending"
        }
    }

    fn from_sub_topic(index: usize, sub: &SubTopic) -> Self {
        Self {
            index,
            title: sub.title().to_string(),
            level: sub.level().as_str(),
            completed: sub.completed(),
            links: sub
                .links()
                .map(|(kind, url)| LinkVm {
                    label: kind.label(),
                    url: url.to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicCardVm {
    pub id: TopicId,
    pub title: String,
    pub expanded: bool,
    pub completed: usize,
    pub rows: Vec<SubTopicRowVm>,
}

impl TopicCardVm {
    #[must_use]
    pub fn toggle_label(&self) -> &'static str {
        if self.expanded {
            "Hide Subtopics"
        } else {
            "View Subtopics"
        }
    }

    fn from_topic(topic: &Topic, expanded: bool) -> Self {
        Self {
            id: topic.id().clone(),
            title: topic.title().to_string(),
            expanded,
            completed: topic.completed_count(),
            rows: topic
                .sub_topics()
                .iter()
                .enumerate()
                .map(|(index, sub)| SubTopicRowVm::from_sub_topic(index, sub))
                .collect(),
        }
    }
}

#[must_use]
pub fn map_topic_cards(state: &CatalogueState) -> Vec<TopicCardVm> {
    state
        .topics
        .iter()
        .map(|topic| TopicCardVm::from_topic(topic, state.is_expanded(topic.id())))
        .collect()
}
