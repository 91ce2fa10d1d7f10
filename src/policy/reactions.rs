//! Baseline reactions shared by every style

use super::Reaction;
use crate::dialogue::{
    slots, Annotation, DialogueAct, SystemIntent, UserIntent, CONFIRM_MARKER, REASON_CHANGED_MIND,
    REASON_WRONG_KEYWORD, YES_NO,
};
use crate::state::DialogueState;

/// Baseline reaction table; intents without a reaction yield no acts
pub(super) fn reaction(intent: UserIntent) -> Option<Reaction> {
    match intent {
        UserIntent::StartConversation => Some(start_conversation),
        UserIntent::Help => Some(help),
        UserIntent::Closing => Some(closing),
        UserIntent::Other => Some(other),
        UserIntent::GetPreferences => Some(inform_preferences),
        UserIntent::ResetPreferences => Some(acknowledge_reset),
        UserIntent::Reject => Some(elicit),
        UserIntent::GetKeyphraseExplanation => Some(keyphrase_explanation),
        UserIntent::GetTopicSuggestions => Some(topic_suggestions),
        UserIntent::GetBookmarks => Some(provide_bookmarks),
        UserIntent::GetRecommendationExplanation => Some(explain_recommendation),
        UserIntent::SelectOption => Some(unresolved_option),
        UserIntent::Ignore
        | UserIntent::RevealPreference
        | UserIntent::RemovePreference
        | UserIntent::Confirm
        | UserIntent::AddBookmark
        | UserIntent::RemoveBookmark
        | UserIntent::SetStyle => None,
    }
}

// ============================================================================
// Act builders
// ============================================================================

pub(super) fn provide_options(options: impl IntoIterator<Item = DialogueAct>) -> DialogueAct {
    DialogueAct::with_annotations(
        SystemIntent::ProvideOptions,
        options.into_iter().map(Annotation::option),
    )
}

/// Normalize topic annotations to the `topic` slot
fn topics(annotations: &[Annotation]) -> impl Iterator<Item = Annotation> + '_ {
    annotations
        .iter()
        .map(|a| Annotation::new(slots::TOPIC, a.value.clone()))
}

fn reject_option(reason: &str) -> DialogueAct {
    DialogueAct::new(UserIntent::Reject)
        .with(slots::REASON, reason)
        .with(slots::TYPE, YES_NO)
}

/// "Changed my mind" and "wrong topic" answers to a yes/no prompt
pub(super) fn rejections() -> [DialogueAct; 2] {
    [
        reject_option(REASON_CHANGED_MIND),
        reject_option(REASON_WRONG_KEYWORD),
    ]
}

pub(super) fn changed_mind() -> DialogueAct {
    reject_option(REASON_CHANGED_MIND)
}

/// One reveal option per topic; the first is the confirm target
pub(super) fn topic_options(annotations: &[Annotation]) -> Vec<DialogueAct> {
    let mut options: Vec<_> = topics(annotations)
        .map(|topic| DialogueAct::with_annotations(UserIntent::RevealPreference, [topic]))
        .collect();
    if let Some(first) = options.first_mut() {
        first.push(slots::INTENT, CONFIRM_MARKER);
    }
    options
}

/// Reveal option covering every topic at once
pub(super) fn all_topics_option(annotations: &[Annotation]) -> DialogueAct {
    DialogueAct::with_annotations(UserIntent::RevealPreference, topics(annotations))
}

/// Yes/no confirmation for revealing `annotations`
pub(super) fn confirm_topics_option(annotations: &[Annotation]) -> DialogueAct {
    all_topics_option(annotations)
        .with(slots::INTENT, CONFIRM_MARKER)
        .with(slots::TYPE, YES_NO)
}

/// Keyphrase explanation followed by a prompt to add the topics
pub(super) fn explanation<'a>(
    annotations: impl IntoIterator<Item = &'a Annotation>,
) -> Vec<DialogueAct> {
    let topics: Vec<Annotation> = annotations
        .into_iter()
        .map(|a| Annotation::new(slots::TOPIC, a.value.clone()))
        .collect();
    let count = topics.len();

    vec![
        DialogueAct::with_annotations(SystemIntent::ExplainKeyphrase, topics)
            .with(slots::CONDITION, slots::COUNT)
            .with(slots::COUNT, count),
        DialogueAct::new(SystemIntent::PromptAddToPreferences)
            .with(slots::CONDITION, slots::COUNT)
            .with(slots::COUNT, count),
    ]
}

pub(super) fn fallback() -> Vec<DialogueAct> {
    vec![DialogueAct::new(SystemIntent::CantHelp)]
}

/// Ask the user to rephrase
pub(super) fn rephrase() -> Vec<DialogueAct> {
    vec![DialogueAct::new(SystemIntent::CantHelp)
        .with(slots::CONDITION, slots::REPHRASE)
        .with(slots::REPHRASE, 1i64)]
}

// ============================================================================
// Reactions
// ============================================================================

fn start_conversation(_state: &DialogueState) -> Vec<DialogueAct> {
    vec![
        DialogueAct::new(SystemIntent::Initial),
        DialogueAct::new(SystemIntent::Elicit)
            .with(slots::CONDITION, slots::INITIAL)
            .with(slots::INITIAL, 1i64),
    ]
}

pub(super) fn help(_state: &DialogueState) -> Vec<DialogueAct> {
    vec![DialogueAct::new(SystemIntent::InformHelp)]
}

fn closing(_state: &DialogueState) -> Vec<DialogueAct> {
    vec![DialogueAct::new(SystemIntent::Closing)]
}

fn other(state: &DialogueState) -> Vec<DialogueAct> {
    let mut acts = fallback();
    if !state.flags().has_preferences {
        acts.push(DialogueAct::new(SystemIntent::Elicit));
    }
    acts
}

fn elicit(_state: &DialogueState) -> Vec<DialogueAct> {
    vec![DialogueAct::new(SystemIntent::Elicit)]
}

pub(super) fn inform_preferences(state: &DialogueState) -> Vec<DialogueAct> {
    vec![DialogueAct::with_annotations(
        SystemIntent::InformPreferences,
        state.preferences().all().cloned(),
    )]
}

pub(super) fn acknowledge_reset(_state: &DialogueState) -> Vec<DialogueAct> {
    vec![
        DialogueAct::new(SystemIntent::AcknowledgePreferenceReset),
        DialogueAct::new(SystemIntent::Elicit),
    ]
}

fn keyphrase_explanation(state: &DialogueState) -> Vec<DialogueAct> {
    let discussion = state.discussion_topics();
    if discussion.is_empty() {
        return rephrase();
    }

    let mut options = topic_options(discussion);
    if options.len() == 1 {
        options[0].push(slots::TYPE, YES_NO);
        options.extend(rejections());
    } else {
        options.push(all_topics_option(discussion));
    }

    let mut acts = explanation(discussion);
    acts.push(provide_options(options));
    acts
}

pub(super) fn topic_suggestions(state: &DialogueState) -> Vec<DialogueAct> {
    if state.flags().new_topic_suggestions {
        vec![DialogueAct::with_annotations(
            SystemIntent::SuggestTopics,
            state.topic_suggestions().iter().cloned(),
        )]
    } else {
        fallback()
    }
}

fn provide_bookmarks(state: &DialogueState) -> Vec<DialogueAct> {
    vec![DialogueAct::with_annotations(
        SystemIntent::ProvideBookmarks,
        state
            .bookmarks()
            .iter()
            .map(|item| Annotation::new(slots::ARTICLE, item.clone())),
    )]
}

fn explain_recommendation(state: &DialogueState) -> Vec<DialogueAct> {
    let Some(item) = state.item_in_focus() else {
        return rephrase();
    };

    let mut act = DialogueAct::new(SystemIntent::ExplainRecommendation).with(slots::ARTICLE, item.clone());
    if let Some(explanation) = &item.explanation {
        act.push(slots::EXPLANATION, explanation.as_str());
    }
    if let Some(title) = &item.title {
        act.push(slots::TITLE, title.as_str());
    }
    if let Some(abstract_text) = &item.abstract_text {
        act.push(slots::ABSTRACT, abstract_text.as_str());
    }
    vec![act]
}

fn unresolved_option(state: &DialogueState) -> Vec<DialogueAct> {
    if state.flags().unresolved_option {
        rephrase()
    } else {
        Vec::new()
    }
}

// ============================================================================
// Recommendation follow-ups
// ============================================================================

/// Recommend act carrying the overlap, plus the items when they are new
pub(super) fn recommend(state: &DialogueState) -> Vec<DialogueAct> {
    let recommendation = state.recommendation();
    let mut acts = vec![DialogueAct::new(SystemIntent::Recommend)
        .with(slots::CONDITION, slots::OVERLAP)
        .with(slots::OVERLAP, recommendation.overlap())];

    if state.flags().new_recommendations {
        acts.push(DialogueAct::with_annotations(
            SystemIntent::ProvideRecommendations,
            recommendation
                .current()
                .items()
                .iter()
                .map(|item| Annotation::new(slots::ARTICLE, item.clone())),
        ));
    }
    acts
}

/// Offer to drop a preference when the recommendation did not move
pub(super) fn suggest_remove_preferences(state: &DialogueState) -> Vec<DialogueAct> {
    let options = state
        .preferences()
        .all()
        .map(|topic| {
            DialogueAct::new(UserIntent::RemovePreference)
                .with(slots::EXCLUDE_TOPIC, topic.value.clone())
        })
        .chain(std::iter::once(DialogueAct::new(UserIntent::ResetPreferences)));

    vec![
        DialogueAct::new(SystemIntent::SuggestRemovePreferences),
        provide_options(options),
    ]
}
