//! Keyword-based topic suggestions

use super::TopicSuggester;
use crate::dialogue::Annotation;
use crate::event_bus::RequestSuggestions;
use std::collections::HashSet;

const DEFAULT_LIMIT: usize = 3;

/// Suggests keywords of recommended articles the user has not seen yet
#[derive(Debug, Clone)]
pub struct KeywordTopicSuggester {
    limit: usize,
}

impl Default for KeywordTopicSuggester {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
        }
    }
}

impl KeywordTopicSuggester {
    pub fn with_limit(limit: usize) -> Self {
        Self { limit }
    }
}

impl TopicSuggester for KeywordTopicSuggester {
    fn suggest(&self, request: &RequestSuggestions) -> Vec<Annotation> {
        let mut seen: HashSet<String> = request
            .included_topics
            .iter()
            .chain(&request.excluded_topics)
            .chain(&request.previously_suggested_topics)
            .map(|topic| topic.to_lowercase())
            .collect();

        request
            .recommended_items
            .iter()
            .flat_map(|item| &item.keywords)
            .filter(|keyword| seen.insert(keyword.to_lowercase()))
            .take(self.limit)
            .map(|keyword| Annotation::topic(keyword.clone()))
            .collect()
    }
}
