//! Recording providers for tests
//!
//! Each mock answers with a fixed response and keeps every request it saw.
//! Clones share the same recording, so a test can keep a handle after
//! registering a clone on the bus.

use super::{Recommender, TopicSuggester};
use crate::dialogue::Annotation;
use crate::event_bus::{RequestRecommendations, RequestSuggestions};
use crate::state::Ranking;
use std::sync::{Arc, Mutex};

// ============================================================================
// Recording Recommender
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct RecordingRecommender {
    ranking: Arc<Mutex<Ranking>>,
    requests: Arc<Mutex<Vec<RequestRecommendations>>>,
}

impl RecordingRecommender {
    pub fn new(ranking: Ranking) -> Self {
        Self {
            ranking: Arc::new(Mutex::new(ranking)),
            requests: Arc::default(),
        }
    }

    /// Replace the ranking returned from now on
    pub fn set_ranking(&self, ranking: Ranking) {
        *self.ranking.lock().unwrap() = ranking;
    }

    pub fn requests(&self) -> Vec<RequestRecommendations> {
        self.requests.lock().unwrap().clone()
    }
}

impl Recommender for RecordingRecommender {
    fn recommend(&self, request: &RequestRecommendations) -> Ranking {
        self.requests.lock().unwrap().push(request.clone());
        self.ranking.lock().unwrap().clone()
    }
}

// ============================================================================
// Recording Suggester
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct RecordingSuggester {
    suggestions: Vec<Annotation>,
    requests: Arc<Mutex<Vec<RequestSuggestions>>>,
}

impl RecordingSuggester {
    pub fn new(suggestions: Vec<Annotation>) -> Self {
        Self {
            suggestions,
            requests: Arc::default(),
        }
    }

    pub fn requests(&self) -> Vec<RequestSuggestions> {
        self.requests.lock().unwrap().clone()
    }
}

impl TopicSuggester for RecordingSuggester {
    fn suggest(&self, request: &RequestSuggestions) -> Vec<Annotation> {
        self.requests.lock().unwrap().push(request.clone());
        self.suggestions.clone()
    }
}
