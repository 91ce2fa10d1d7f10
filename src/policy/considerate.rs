//! Considerate style
//!
//! Revealing an unexplained topic and resetting preferences both go through
//! a yes/no confirmation first. Once the user confirms, the tracker applies
//! the change and the baseline behavior takes over.

use super::reactions;
use super::Reaction;
use crate::dialogue::{slots, DialogueAct, SystemIntent, UserIntent, CONFIRM_MARKER, YES_NO};
use crate::state::DialogueState;

pub(super) fn reaction(intent: UserIntent) -> Option<Reaction> {
    match intent {
        UserIntent::Reject => Some(reactions::help),
        UserIntent::RevealPreference => Some(reveal_preference),
        UserIntent::ResetPreferences => Some(reset_preferences),
        UserIntent::GetTopicSuggestions => Some(topic_suggestions),
        _ => None,
    }
}

/// Suggestions come with an explanation of every suggested topic
pub(super) fn topic_suggestions(state: &DialogueState) -> Vec<DialogueAct> {
    let mut acts = reactions::topic_suggestions(state);
    if !state.flags().new_topic_suggestions {
        return acts;
    }

    let suggestions = state.topic_suggestions();
    acts.push(
        DialogueAct::with_annotations(SystemIntent::ExplainKeyphrase, suggestions.iter().cloned())
            .with(slots::CONDITION, slots::COUNT)
            .with(slots::COUNT, suggestions.len()),
    );
    acts
}

fn reveal_preference(state: &DialogueState) -> Vec<DialogueAct> {
    if state.flags().confirmation_received {
        return Vec::new();
    }

    let unexplained = state.unexplained_discussion_topics();
    if unexplained.is_empty() {
        return vec![DialogueAct::with_annotations(
            SystemIntent::AcknowledgePreferenceUpdate,
            state.discussion_topics().iter().cloned(),
        )];
    }

    let [changed_mind, wrong_keyword] = reactions::rejections();
    let options = [
        reactions::confirm_topics_option(state.discussion_topics()),
        changed_mind,
        wrong_keyword,
    ];

    let mut acts = reactions::explanation(unexplained);
    acts.push(reactions::provide_options(options));
    acts
}

fn reset_preferences(state: &DialogueState) -> Vec<DialogueAct> {
    if state.flags().confirmation_received {
        return reactions::acknowledge_reset(state);
    }

    let confirm = DialogueAct::new(UserIntent::ResetPreferences)
        .with(slots::INTENT, CONFIRM_MARKER)
        .with(slots::TYPE, YES_NO);

    vec![
        DialogueAct::new(SystemIntent::PromptToResetPreferences),
        reactions::provide_options([confirm, reactions::changed_mind()]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::{Annotation, REASON_CHANGED_MIND, REASON_WRONG_KEYWORD};

    /// Topics a prompt is asking the user to confirm
    fn prompted_topics(act: &DialogueAct) -> Vec<&Annotation> {
        act.options()
            .filter(|o| o.is_confirm_option())
            .flat_map(|o| o.annotations_for(slots::TOPIC))
            .collect()
    }

    fn state_with_discussion(topics: &[&str]) -> DialogueState {
        let mut state = DialogueState::new(crate::state::Style::Considerate);
        state.discussion_topics = topics.iter().map(|t| Annotation::topic(*t)).collect();
        state
    }

    #[test]
    fn test_unexplained_reveal_prompts_for_confirmation() {
        let state = state_with_discussion(&["bandits"]);
        let acts = reveal_preference(&state);

        assert!(acts[0].is(SystemIntent::ExplainKeyphrase));
        assert!(acts[1].is(SystemIntent::PromptAddToPreferences));

        let menu = &acts[2];
        let options: Vec<_> = menu.options().collect();
        assert_eq!(options.len(), 3);
        assert_eq!(prompted_topics(menu), vec![&Annotation::topic("bandits")]);
        assert_eq!(options[1].text(slots::REASON), Some(REASON_CHANGED_MIND));
        assert_eq!(options[2].text(slots::REASON), Some(REASON_WRONG_KEYWORD));
    }

    #[test]
    fn test_only_unexplained_topics_are_explained() {
        let mut state = state_with_discussion(&["bandits", "ranking"]);
        state.explained_topics = vec![Annotation::topic("ranking")];

        let acts = reveal_preference(&state);
        let explained: Vec<_> = acts[0].annotations_for(slots::TOPIC).collect();
        assert_eq!(explained, vec![&Annotation::topic("bandits")]);
        // confirmation still covers every discussed topic
        assert_eq!(prompted_topics(&acts[2]).len(), 2);
    }

    #[test]
    fn test_explained_reveal_is_acknowledged() {
        let mut state = state_with_discussion(&["bandits"]);
        state.explained_topics = vec![Annotation::topic("bandits")];

        let acts = reveal_preference(&state);
        assert_eq!(acts.len(), 1);
        assert!(acts[0].is(SystemIntent::AcknowledgePreferenceUpdate));
    }

    #[test]
    fn test_confirmed_reveal_defers_to_baseline() {
        let mut state = state_with_discussion(&["bandits"]);
        state.flags.confirmation_received = true;
        assert!(reveal_preference(&state).is_empty());
    }

    #[test]
    fn test_reset_is_gated() {
        let mut state = DialogueState::new(crate::state::Style::Considerate);
        let acts = reset_preferences(&state);
        assert!(acts[0].is(SystemIntent::PromptToResetPreferences));
        let options: Vec<_> = acts[1].options().collect();
        assert_eq!(options.len(), 2);
        assert!(options[0].is(UserIntent::ResetPreferences));
        assert!(options[0].is_confirm_option());

        state.flags.confirmation_received = true;
        let acts = reset_preferences(&state);
        assert!(acts[0].is(SystemIntent::AcknowledgePreferenceReset));
    }

    #[test]
    fn test_suggestions_are_explained() {
        let mut state = DialogueState::new(crate::state::Style::Considerate);
        state.topic_suggestions = vec![Annotation::topic("ranking")];
        state.flags.new_topic_suggestions = true;

        let acts = topic_suggestions(&state);
        assert_eq!(acts.len(), 2);
        assert!(acts[1].is(SystemIntent::ExplainKeyphrase));

        state.flags.new_topic_suggestions = false;
        assert_eq!(topic_suggestions(&state), reactions::fallback());
    }
}
