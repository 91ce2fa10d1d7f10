//! Dialogue policies
//!
//! A policy reads the tracker's state and decides the next batch of system
//! acts. The three styles share one driver, [`Policy::generate`]:
//!
//! 1. react to each user act through the style's reaction table, falling back
//!    to the baseline table
//! 2. recommend when preferences changed and the user expects an answer,
//!    followed by topic suggestions or an offer to drop a preference
//! 3. fall back to `cant_help` if the user expects an answer and nothing was
//!    produced
//! 4. merge all option menus into one
//!
//! Policies never mutate state; they only see `&DialogueState`.

mod considerate;
mod involved;
mod merge;
mod reactions;

#[cfg(test)]
mod proptests;

pub use merge::merge_options;

use crate::dialogue::{DialogueAct, UserIntent};
use crate::state::{DialogueState, Style};

/// Reaction to one user intent
type Reaction = fn(&DialogueState) -> Vec<DialogueAct>;

/// Dialogue policy per interaction style
///
/// Styles differ only in how they react to user intents and in how topic
/// suggestions are offered. None of them adds acts of its own after the
/// reactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
    #[default]
    Default,
    Involved,
    Considerate,
}

impl Policy {
    pub fn for_style(style: Style) -> Self {
        match style {
            Style::Default => Policy::Default,
            Style::Involved => Policy::Involved,
            Style::Considerate => Policy::Considerate,
        }
    }

    pub fn style(self) -> Style {
        match self {
            Policy::Default => Style::Default,
            Policy::Involved => Style::Involved,
            Policy::Considerate => Style::Considerate,
        }
    }

    /// Next system acts for the current turn, in generation order
    pub fn generate(self, state: &DialogueState) -> Vec<DialogueAct> {
        let flags = state.flags();

        let mut acts: Vec<DialogueAct> = state
            .user_acts()
            .filter_map(DialogueAct::user_intent)
            .filter_map(|intent| self.reaction(intent))
            .flat_map(|react| react(state))
            .collect();

        if flags.should_recommend() {
            acts.extend(reactions::recommend(state));
            if flags.new_recommendations {
                acts.extend(self.topic_suggestions(state));
            } else {
                acts.extend(reactions::suggest_remove_preferences(state));
            }
        }

        if flags.agent_should_respond && acts.is_empty() {
            acts.extend(reactions::fallback());
        }

        tracing::debug!(
            policy = %self.style(),
            acts = ?acts.iter().map(|a| a.intent.as_str()).collect::<Vec<_>>(),
            "Policy generated"
        );
        merge_options(acts, flags.should_reset_options)
    }

    fn reaction(self, intent: UserIntent) -> Option<Reaction> {
        let overridden = match self {
            Policy::Default => None,
            Policy::Involved => involved::reaction(intent),
            Policy::Considerate => considerate::reaction(intent),
        };
        overridden.or_else(|| reactions::reaction(intent))
    }

    fn topic_suggestions(self, state: &DialogueState) -> Vec<DialogueAct> {
        match self {
            Policy::Default => reactions::topic_suggestions(state),
            Policy::Involved => involved::topic_suggestions(state),
            Policy::Considerate => considerate::topic_suggestions(state),
        }
    }
}
