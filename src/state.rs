//! Dialogue state
//!
//! The record of one conversation: history, preferences, recommendations,
//! topic bookkeeping, open options and the flag bundle. Only the tracker
//! writes it; everything else receives `&DialogueState`.

mod flags;
mod preferences;
mod recommendation;
mod style;

#[cfg(test)]
mod proptests;

pub use flags::UpdateFlags;
pub use preferences::{Toggle, TopicPreferences};
pub use recommendation::{Ranking, Recommendation, ScoredItem};
pub use style::{Style, UnsupportedStyle};

use crate::dialogue::{Action, Annotation, DialogueAct, Utterance};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DialogueState {
    pub(crate) history: Vec<Utterance>,
    pub(crate) user_actions: Vec<Action>,
    pub(crate) system_actions: Vec<Action>,

    pub(crate) preferences: TopicPreferences,
    /// Suggestions fetched but not yet offered
    pub(crate) topic_suggestions: Vec<Annotation>,
    /// Every topic offered so far
    pub(crate) suggested_topics: Vec<Annotation>,
    pub(crate) discussion_topics: Vec<Annotation>,
    pub(crate) explained_topics: Vec<Annotation>,

    pub(crate) recommendation: Recommendation,
    pub(crate) item_in_focus: Option<ScoredItem>,
    pub(crate) bookmarks: Vec<ScoredItem>,

    /// Options presented last turn, addressed by position
    pub(crate) options: Vec<DialogueAct>,

    pub(crate) style: Style,
    pub(crate) turn: u64,
    pub(crate) flags: UpdateFlags,
}

impl DialogueState {
    pub fn new(style: Style) -> Self {
        let mut state = Self {
            style,
            ..Self::default()
        };
        state.flags.confirmation_required = style.requires_confirmation();
        state
    }

    pub fn history(&self) -> &[Utterance] {
        &self.history
    }

    pub fn user_actions(&self) -> &[Action] {
        &self.user_actions
    }

    /// Structured acts of this turn's user actions, in order, including
    /// acts attached to utterances
    pub fn user_acts(&self) -> impl Iterator<Item = &DialogueAct> + '_ {
        self.user_actions.iter().filter_map(Action::dialogue_act)
    }

    pub fn system_actions(&self) -> &[Action] {
        &self.system_actions
    }

    pub fn preferences(&self) -> &TopicPreferences {
        &self.preferences
    }

    pub fn topic_suggestions(&self) -> &[Annotation] {
        &self.topic_suggestions
    }

    pub fn suggested_topics(&self) -> &[Annotation] {
        &self.suggested_topics
    }

    pub fn discussion_topics(&self) -> &[Annotation] {
        &self.discussion_topics
    }

    pub fn explained_topics(&self) -> &[Annotation] {
        &self.explained_topics
    }

    /// Discussion topics that no explain act has covered yet
    pub fn unexplained_discussion_topics(&self) -> Vec<&Annotation> {
        self.discussion_topics
            .iter()
            .filter(|topic| !self.explained_topics.iter().any(|e| e.value == topic.value))
            .collect()
    }

    pub fn recommendation(&self) -> &Recommendation {
        &self.recommendation
    }

    pub fn item_in_focus(&self) -> Option<&ScoredItem> {
        self.item_in_focus.as_ref()
    }

    pub fn bookmarks(&self) -> &[ScoredItem] {
        &self.bookmarks
    }

    pub fn options(&self) -> &[DialogueAct] {
        &self.options
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn flags(&self) -> &UpdateFlags {
        &self.flags
    }

    /// Recompute the derived flag group from current content
    pub(crate) fn update_flags(&mut self) {
        self.flags.has_preferences = !self.preferences.included().is_empty();
        self.flags.new_discussion_topics = !self.discussion_topics.is_empty();
        self.flags.new_topic_suggestions = !self.topic_suggestions.is_empty();
    }

    /// Export the auditable part of the state
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            turn: self.turn,
            recommendation_ids: self
                .recommendation
                .current()
                .item_ids()
                .map(str::to_string)
                .collect(),
            included_topics: self.preferences.included_values(),
            excluded_topics: self.preferences.excluded_values(),
            bookmarks: self.bookmarks.iter().map(|b| b.item_id.clone()).collect(),
        }
    }
}

/// Per-turn backup record
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub turn: u64,
    pub recommendation_ids: Vec<String>,
    pub included_topics: Vec<String>,
    pub excluded_topics: Vec<String>,
    pub bookmarks: Vec<String>,
}
