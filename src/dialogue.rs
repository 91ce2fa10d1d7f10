//! Dialogue vocabulary
//!
//! Intents, annotated dialogue acts and the actions exchanged each turn.

mod act;
mod intent;
mod options;

pub use act::{
    slots, Action, Annotation, AnnotationValue, DialogueAct, Participant, Utterance,
    CONFIRM_MARKER, REASON_CHANGED_MIND, REASON_WRONG_KEYWORD, YES_NO,
};
pub use intent::{Intent, SystemIntent, UserIntent};
pub use options::{ensure_label, label_option, option_text, OptionLabel};
