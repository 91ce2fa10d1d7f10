//! Per-turn update flags
//!
//! Three groups live in one bundle:
//!
//! - turn-scoped flags, cleared by [`UpdateFlags::reset`] before every user turn
//! - sticky flags (`confirmation_required`, `new_recommendations`) that only
//!   change when the tracker handles the action that owns them
//! - derived flags, recomputed from state content after the resource fetch
//!
//! Policies only ever read the bundle.

use serde::Serialize;

#[allow(clippy::struct_excessive_bools)] // a flag bundle is the point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct UpdateFlags {
    // Turn-scoped
    pub updated_preferences: bool,
    pub confirmation_received: bool,
    pub agent_should_respond: bool,
    pub style_changed: bool,
    pub should_reset_options: bool,
    /// A selected option id did not resolve against the open options
    pub unresolved_option: bool,

    // Sticky
    pub confirmation_required: bool,
    pub new_recommendations: bool,

    // Derived
    pub has_preferences: bool,
    pub new_discussion_topics: bool,
    pub new_topic_suggestions: bool,
}

impl UpdateFlags {
    /// Clear the turn-scoped group
    pub fn reset(&mut self) {
        self.updated_preferences = false;
        self.confirmation_received = false;
        self.agent_should_respond = false;
        self.style_changed = false;
        self.should_reset_options = false;
        self.unresolved_option = false;
    }

    /// Whether the confirmation gate blocks preference changes this turn
    pub fn awaiting_confirmation(&self) -> bool {
        self.confirmation_required && !self.confirmation_received
    }

    /// Whether the policy should append a recommendation this turn
    pub fn should_recommend(&self) -> bool {
        self.agent_should_respond && self.has_preferences && self.updated_preferences
    }
}
