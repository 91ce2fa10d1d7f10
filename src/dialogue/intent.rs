//! Intent vocabularies
//!
//! User and system intents are disjoint enumerations. The names serialize in
//! `snake_case`, which is also the form used by NLU/NLG collaborators.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Communicative purpose of a user action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserIntent {
    // Generic
    Help,
    /// No response needed
    Ignore,
    /// Not understood
    Other,
    Closing,

    // Preferences
    GetPreferences,
    RevealPreference,
    RemovePreference,
    ResetPreferences,

    // Prompts
    Confirm,
    Reject,

    GetKeyphraseExplanation,
    GetTopicSuggestions,

    // Client-side actions (buttons, side panels)
    StartConversation,
    SelectOption,
    GetBookmarks,
    AddBookmark,
    RemoveBookmark,
    GetRecommendationExplanation,
    SetStyle,
}

impl UserIntent {
    pub fn as_str(self) -> &'static str {
        match self {
            UserIntent::Help => "help",
            UserIntent::Ignore => "ignore",
            UserIntent::Other => "other",
            UserIntent::Closing => "closing",
            UserIntent::GetPreferences => "get_preferences",
            UserIntent::RevealPreference => "reveal_preference",
            UserIntent::RemovePreference => "remove_preference",
            UserIntent::ResetPreferences => "reset_preferences",
            UserIntent::Confirm => "confirm",
            UserIntent::Reject => "reject",
            UserIntent::GetKeyphraseExplanation => "get_keyphrase_explanation",
            UserIntent::GetTopicSuggestions => "get_topic_suggestions",
            UserIntent::StartConversation => "start_conversation",
            UserIntent::SelectOption => "select_option",
            UserIntent::GetBookmarks => "get_bookmarks",
            UserIntent::AddBookmark => "add_bookmark",
            UserIntent::RemoveBookmark => "remove_bookmark",
            UserIntent::GetRecommendationExplanation => "get_recommendation_explanation",
            UserIntent::SetStyle => "set_style",
        }
    }
}

/// Communicative purpose of a system action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemIntent {
    // Rendered as utterances
    Initial,
    Elicit,
    InformPreferences,
    SuggestRemovePreferences,
    PromptAddToPreferences,
    PromptToResetPreferences,
    AcknowledgePreferenceUpdate,
    AcknowledgePreferenceReset,
    SuggestTopics,
    ExplainKeyphrase,
    ExplainRecommendation,
    Recommend,
    InformHelp,
    CantHelp,
    Closing,

    // Passed through to the client as structured acts
    ProvideRecommendations,
    ProvideBookmarks,
    ProvideOptions,
}

impl SystemIntent {
    pub fn as_str(self) -> &'static str {
        match self {
            SystemIntent::Initial => "initial",
            SystemIntent::Elicit => "elicit",
            SystemIntent::InformPreferences => "inform_preferences",
            SystemIntent::SuggestRemovePreferences => "suggest_remove_preferences",
            SystemIntent::PromptAddToPreferences => "prompt_add_to_preferences",
            SystemIntent::PromptToResetPreferences => "prompt_to_reset_preferences",
            SystemIntent::AcknowledgePreferenceUpdate => "acknowledge_preference_update",
            SystemIntent::AcknowledgePreferenceReset => "acknowledge_preference_reset",
            SystemIntent::SuggestTopics => "suggest_topics",
            SystemIntent::ExplainKeyphrase => "explain_keyphrase",
            SystemIntent::ExplainRecommendation => "explain_recommendation",
            SystemIntent::Recommend => "recommend",
            SystemIntent::InformHelp => "inform_help",
            SystemIntent::CantHelp => "cant_help",
            SystemIntent::Closing => "closing",
            SystemIntent::ProvideRecommendations => "provide_recommendations",
            SystemIntent::ProvideBookmarks => "provide_bookmarks",
            SystemIntent::ProvideOptions => "provide_options",
        }
    }

    /// Structured acts are not rendered into text by the generation step
    pub fn is_structured(self) -> bool {
        matches!(
            self,
            SystemIntent::ProvideRecommendations
                | SystemIntent::ProvideBookmarks
                | SystemIntent::ProvideOptions
        )
    }
}

/// Intent tag of a dialogue act, drawn from one of the two vocabularies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    User(UserIntent),
    System(SystemIntent),
}

impl Intent {
    pub fn as_str(self) -> &'static str {
        match self {
            Intent::User(intent) => intent.as_str(),
            Intent::System(intent) => intent.as_str(),
        }
    }

    pub fn user(self) -> Option<UserIntent> {
        match self {
            Intent::User(intent) => Some(intent),
            Intent::System(_) => None,
        }
    }

    pub fn system(self) -> Option<SystemIntent> {
        match self {
            Intent::System(intent) => Some(intent),
            Intent::User(_) => None,
        }
    }
}

impl From<UserIntent> for Intent {
    fn from(intent: UserIntent) -> Self {
        Intent::User(intent)
    }
}

impl From<SystemIntent> for Intent {
    fn from(intent: SystemIntent) -> Self {
        Intent::System(intent)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_names_match_as_str() {
        let json = serde_json::to_value(UserIntent::GetRecommendationExplanation).unwrap();
        assert_eq!(json, "get_recommendation_explanation");
        assert_eq!(
            UserIntent::GetRecommendationExplanation.as_str(),
            "get_recommendation_explanation"
        );

        let json = serde_json::to_value(SystemIntent::ProvideOptions).unwrap();
        assert_eq!(json, SystemIntent::ProvideOptions.as_str());
    }

    #[test]
    fn test_closing_is_distinct_per_vocabulary() {
        let user: Intent = UserIntent::Closing.into();
        let system: Intent = SystemIntent::Closing.into();
        assert_ne!(user, system);
        assert_eq!(user.as_str(), system.as_str());

        let user_json = serde_json::to_string(&user).unwrap();
        let back: Intent = serde_json::from_str(&user_json).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn test_structured_intents() {
        assert!(SystemIntent::ProvideOptions.is_structured());
        assert!(!SystemIntent::Recommend.is_structured());
    }
}
