use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::model::ids::{SubTopicId, TopicId};
use crate::model::level::Level;

//
// ─── SUBTOPIC ─────────────────────────────────────────────────────────────────
//

/// Kind of external reference attached to a subtopic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubTopicLink {
    YouTube,
    LeetCode,
    Article,
}

impl SubTopicLink {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SubTopicLink::YouTube => "YouTube",
            SubTopicLink::LeetCode => "LeetCode",
            SubTopicLink::Article => "Article",
        }
    }
}

/// One entry of a topic's ordered subtopic list.
///
/// `completed` is the only field the client ever changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTopic {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    id: Option<SubTopicId>,
    title: String,
    level: Level,
    #[serde(default, deserialize_with = "lenient_url", skip_serializing_if = "Option::is_none")]
    youtube_link: Option<Url>,
    #[serde(default, deserialize_with = "lenient_url", skip_serializing_if = "Option::is_none")]
    leetcode_link: Option<Url>,
    #[serde(default, deserialize_with = "lenient_url", skip_serializing_if = "Option::is_none")]
    article_link: Option<Url>,
    #[serde(default)]
    completed: bool,
}

impl SubTopic {
    #[must_use]
    pub fn new(title: impl Into<String>, level: Level) -> Self {
        Self {
            id: None,
            title: title.into(),
            level,
            youtube_link: None,
            leetcode_link: None,
            article_link: None,
            completed: false,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: SubTopicId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn with_link(mut self, kind: SubTopicLink, url: Url) -> Self {
        match kind {
            SubTopicLink::YouTube => self.youtube_link = Some(url),
            SubTopicLink::LeetCode => self.leetcode_link = Some(url),
            SubTopicLink::Article => self.article_link = Some(url),
        }
        self
    }

    #[must_use]
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    #[must_use]
    pub fn id(&self) -> Option<&SubTopicId> {
        self.id.as_ref()
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    /// Present links in display order: YouTube, LeetCode, Article.
    pub fn links(&self) -> impl Iterator<Item = (SubTopicLink, &Url)> {
        [
            (SubTopicLink::YouTube, self.youtube_link.as_ref()),
            (SubTopicLink::LeetCode, self.leetcode_link.as_ref()),
            (SubTopicLink::Article, self.article_link.as_ref()),
        ]
        .into_iter()
        .filter_map(|(kind, url)| url.map(|url| (kind, url)))
    }
}

/// A malformed or empty link drops to `None` instead of failing the whole catalogue.
fn lenient_url<'de, D>(deserializer: D) -> Result<Option<Url>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| Url::parse(s).ok()))
}

//
// ─── TOPIC ────────────────────────────────────────────────────────────────────
//

/// A catalogue topic with its server-ordered subtopics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    #[serde(rename = "_id")]
    id: TopicId,
    title: String,
    #[serde(default)]
    sub_topics: Vec<SubTopic>,
}

impl Topic {
    #[must_use]
    pub fn new(id: TopicId, title: impl Into<String>, sub_topics: Vec<SubTopic>) -> Self {
        Self {
            id,
            title: title.into(),
            sub_topics,
        }
    }

    #[must_use]
    pub fn id(&self) -> &TopicId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn sub_topics(&self) -> &[SubTopic] {
        &self.sub_topics
    }

    #[must_use]
    pub fn sub_topic(&self, index: usize) -> Option<&SubTopic> {
        self.sub_topics.get(index)
    }

    /// Current position of the subtopic carrying `id`.
    #[must_use]
    pub fn position_of(&self, id: &SubTopicId) -> Option<usize> {
        self.sub_topics
            .iter()
            .position(|sub| sub.id.as_ref() == Some(id))
    }

    /// Set `completed` on the subtopic at `index` in place.
    ///
    /// Ordering is never touched. Returns `false` when `index` is out of range.
    pub fn set_sub_topic_completed(&mut self, index: usize, completed: bool) -> bool {
        match self.sub_topics.get_mut(index) {
            Some(sub) => {
                sub.set_completed(completed);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.sub_topics.iter().filter(|sub| sub.completed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wire_topic() {
        let json = r#"{
            "_id": "t1",
            "title": "Arrays",
            "subTopics": [
                {
                    "_id": "s1",
                    "title": "Two Sum",
                    "level": "Easy",
                    "youtubeLink": "https://youtube.com/watch?v=1",
                    "leetcodeLink": "https://leetcode.com/problems/two-sum",
                    "completed": true
                },
                { "title": "3Sum", "level": "Medium", "articleLink": "not a url" }
            ]
        }"#;

        let topic: Topic = serde_json::from_str(json).unwrap();
        assert_eq!(topic.id().as_str(), "t1");
        assert_eq!(topic.sub_topics().len(), 2);

        let first = topic.sub_topic(0).unwrap();
        assert_eq!(first.id().map(SubTopicId::as_str), Some("s1"));
        assert!(first.completed());
        let labels: Vec<_> = first.links().map(|(kind, _)| kind.label()).collect();
        assert_eq!(labels, ["YouTube", "LeetCode"]);

        let second = topic.sub_topic(1).unwrap();
        assert!(second.id().is_none());
        assert!(!second.completed());
        assert_eq!(second.links().count(), 0);
    }

    #[test]
    fn set_completed_keeps_order_and_other_entries() {
        let mut topic = Topic::new(
            TopicId::new("t1"),
            "Graphs",
            vec![
                SubTopic::new("BFS", Level::Easy),
                SubTopic::new("DFS", Level::Easy),
                SubTopic::new("Dijkstra", Level::Hard),
            ],
        );

        assert!(topic.set_sub_topic_completed(1, true));
        let titles: Vec<_> = topic.sub_topics().iter().map(SubTopic::title).collect();
        assert_eq!(titles, ["BFS", "DFS", "Dijkstra"]);
        assert!(!topic.sub_topic(0).unwrap().completed());
        assert!(topic.sub_topic(1).unwrap().completed());
        assert!(!topic.sub_topic(2).unwrap().completed());
        assert_eq!(topic.completed_count(), 1);

        assert!(!topic.set_sub_topic_completed(3, true));
    }

    #[test]
    fn position_of_finds_by_stable_id() {
        let topic = Topic::new(
            TopicId::new("t1"),
            "Trees",
            vec![
                SubTopic::new("Inorder", Level::Easy).with_id(SubTopicId::new("a")),
                SubTopic::new("Preorder", Level::Easy).with_id(SubTopicId::new("b")),
            ],
        );
        assert_eq!(topic.position_of(&SubTopicId::new("b")), Some(1));
        assert_eq!(topic.position_of(&SubTopicId::new("zz")), None);
    }
}
