//! Events and resource requests exchanged over the bus

use super::{Event, ResourceRequest};
use crate::dialogue::Annotation;
use crate::state::{Ranking, ScoredItem, StateSnapshot, Style};

/// Ask the recommender for a ranking matching the current preferences
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestRecommendations {
    pub included_topics: Vec<String>,
    pub excluded_topics: Vec<String>,
}

impl Event for RequestRecommendations {
    const NAME: &'static str = "request_recommendations";
}

impl ResourceRequest for RequestRecommendations {
    type Response = Ranking;
}

/// Ask the topic suggester for new candidate topics
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestSuggestions {
    pub included_topics: Vec<String>,
    pub excluded_topics: Vec<String>,
    pub recommended_items: Vec<ScoredItem>,
    /// Topics offered earlier in the conversation, never to be repeated
    pub previously_suggested_topics: Vec<String>,
}

impl Event for RequestSuggestions {
    const NAME: &'static str = "request_suggestions";
}

impl ResourceRequest for RequestSuggestions {
    type Response = Vec<Annotation>;
}

/// The active conversational style changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleChanged {
    pub style: Style,
}

impl Event for StyleChanged {
    const NAME: &'static str = "style_changed";
}

/// A turn finished; carries the exported per-turn snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct TurnCompleted {
    pub conversation_id: String,
    pub snapshot: StateSnapshot,
}

impl Event for TurnCompleted {
    const NAME: &'static str = "turn_completed";
}
