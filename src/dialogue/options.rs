//! Option labels
//!
//! Options are acts offered to the user as buttons. Selecting one replays it
//! as if the user had typed its `text`, so every option needs a label even
//! when no generation step has run.

use super::act::{
    slots, AnnotationValue, DialogueAct, CONFIRM_MARKER, REASON_CHANGED_MIND, REASON_WRONG_KEYWORD,
    YES_NO,
};
use super::intent::UserIntent;

/// Long and short label for an option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionLabel {
    pub text: String,
    pub short: String,
}

impl OptionLabel {
    fn same(text: &str) -> Self {
        Self {
            text: text.to_string(),
            short: text.to_string(),
        }
    }

    fn new(text: &str, short: &str) -> Self {
        Self {
            text: text.to_string(),
            short: short.to_string(),
        }
    }
}

/// Derive the label for an option act
pub fn label_option(option: &DialogueAct) -> OptionLabel {
    if option.text(slots::TYPE) == Some(YES_NO) {
        if option.text(slots::INTENT) == Some(CONFIRM_MARKER) {
            return OptionLabel::same("Yes");
        }
        match option.text(slots::REASON) {
            Some(REASON_WRONG_KEYWORD) => {
                return OptionLabel::new(
                    "No, that's not the topic I am interested in.",
                    "No, wrong topic",
                );
            }
            Some(REASON_CHANGED_MIND) => {
                return OptionLabel::new("Actually, I changed my mind.", "No, changed mind");
            }
            _ => {}
        }
    }

    match option.user_intent() {
        Some(UserIntent::RevealPreference) => {
            let topics: Vec<_> = option
                .annotations_for(slots::TOPIC)
                .filter_map(|a| a.value.as_text())
                .collect();
            match topics.as_slice() {
                [single] => OptionLabel::same(single),
                _ => OptionLabel::same("Add all"),
            }
        }
        Some(UserIntent::RemovePreference) => {
            let topic = option
                .text(slots::TOPIC)
                .or_else(|| option.text(slots::EXCLUDE_TOPIC))
                .unwrap_or("Remove");
            OptionLabel::same(topic)
        }
        Some(UserIntent::ResetPreferences) => OptionLabel::same("Reset"),
        Some(UserIntent::Reject) => OptionLabel::same("No"),
        Some(intent) => OptionLabel::same(intent.as_str()),
        None => OptionLabel::same(option.intent.as_str()),
    }
}

/// Attach `text`/`short` slots unless the option already carries a text
pub fn ensure_label(option: &mut DialogueAct) {
    if option.text(slots::TEXT).is_some() {
        return;
    }
    let label = label_option(option);
    option.set(slots::TEXT, label.text);
    option.set(slots::SHORT, label.short);
}

/// Text a selected option is replayed as
pub fn option_text(option: &DialogueAct) -> String {
    match option.value(slots::TEXT) {
        Some(AnnotationValue::Text(text)) => text.clone(),
        _ => label_option(option).text,
    }
}
