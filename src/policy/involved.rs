//! Involved style: offers suggested topics as pickable options and keeps
//! eliciting after listing preferences

use super::reactions;
use super::Reaction;
use crate::dialogue::{DialogueAct, SystemIntent, UserIntent};
use crate::state::DialogueState;

pub(super) fn reaction(intent: UserIntent) -> Option<Reaction> {
    match intent {
        UserIntent::GetTopicSuggestions => Some(topic_suggestions),
        UserIntent::GetPreferences => Some(get_preferences),
        _ => None,
    }
}

pub(super) fn topic_suggestions(state: &DialogueState) -> Vec<DialogueAct> {
    let mut acts = reactions::topic_suggestions(state);
    let suggestions = state.topic_suggestions();
    if suggestions.is_empty() {
        return acts;
    }

    let mut options = reactions::topic_options(suggestions);
    if suggestions.len() > 1 {
        options.push(reactions::all_topics_option(suggestions));
    }
    acts.push(reactions::provide_options(options));
    acts
}

fn get_preferences(state: &DialogueState) -> Vec<DialogueAct> {
    let mut acts = reactions::inform_preferences(state);
    acts.push(DialogueAct::new(SystemIntent::Elicit));
    acts
}
