//! Dialogue acts, annotations and actions
//!
//! A dialogue act is an intent plus an ordered list of slot annotations. Slot
//! names are not unique, and a value may itself be a dialogue act, which is
//! how option menus are encoded.

use super::intent::{Intent, SystemIntent, UserIntent};
use crate::state::ScoredItem;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

// ============================================================================
// Annotations
// ============================================================================

/// Value carried by a slot annotation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationValue {
    /// Nested act (an option in a menu)
    Act(Box<DialogueAct>),
    Item(ScoredItem),
    Bool(bool),
    Integer(i64),
    Number(OrderedFloat<f64>),
    Text(String),
}

impl AnnotationValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnnotationValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_act(&self) -> Option<&DialogueAct> {
        match self {
            AnnotationValue::Act(act) => Some(act),
            _ => None,
        }
    }

    pub fn as_item(&self) -> Option<&ScoredItem> {
        match self {
            AnnotationValue::Item(item) => Some(item),
            _ => None,
        }
    }

    /// Integer view; option ids sometimes arrive from clients as strings
    pub fn as_index(&self) -> Option<usize> {
        match self {
            AnnotationValue::Integer(value) => usize::try_from(*value).ok(),
            AnnotationValue::Text(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AnnotationValue::Number(value) => Some(value.into_inner()),
            #[allow(clippy::cast_precision_loss)] // counts and ids are small
            AnnotationValue::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }
}

impl From<&str> for AnnotationValue {
    fn from(value: &str) -> Self {
        AnnotationValue::Text(value.to_string())
    }
}

impl From<String> for AnnotationValue {
    fn from(value: String) -> Self {
        AnnotationValue::Text(value)
    }
}

impl From<bool> for AnnotationValue {
    fn from(value: bool) -> Self {
        AnnotationValue::Bool(value)
    }
}

impl From<i64> for AnnotationValue {
    fn from(value: i64) -> Self {
        AnnotationValue::Integer(value)
    }
}

impl From<usize> for AnnotationValue {
    fn from(value: usize) -> Self {
        AnnotationValue::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for AnnotationValue {
    fn from(value: f64) -> Self {
        AnnotationValue::Number(OrderedFloat(value))
    }
}

impl From<DialogueAct> for AnnotationValue {
    fn from(act: DialogueAct) -> Self {
        AnnotationValue::Act(Box::new(act))
    }
}

impl From<ScoredItem> for AnnotationValue {
    fn from(item: ScoredItem) -> Self {
        AnnotationValue::Item(item)
    }
}

/// A named value attached to a dialogue act
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Annotation {
    pub slot: String,
    pub value: AnnotationValue,
}

impl Annotation {
    pub fn new(slot: impl Into<String>, value: impl Into<AnnotationValue>) -> Self {
        Self {
            slot: slot.into(),
            value: value.into(),
        }
    }

    /// Topic annotation as produced by NLU
    pub fn topic(value: impl Into<String>) -> Self {
        Self::new(slots::TOPIC, value.into())
    }

    pub fn exclude_topic(value: impl Into<String>) -> Self {
        Self::new(slots::EXCLUDE_TOPIC, value.into())
    }

    /// An option entry wrapping the act it stands for
    pub fn option(act: DialogueAct) -> Self {
        Self::new(slots::OPTION, act)
    }
}

/// Slot names shared by the tracker, the policies and the collaborators
pub mod slots {
    pub const TOPIC: &str = "topic";
    pub const EXCLUDE_TOPIC: &str = "exclude_topic";
    pub const OPTION: &str = "option";
    pub const ID: &str = "id";
    pub const INTENT: &str = "intent";
    pub const TYPE: &str = "type";
    pub const REASON: &str = "reason";
    pub const TEXT: &str = "text";
    pub const SHORT: &str = "short";
    pub const STYLE: &str = "style";
    pub const ITEM_ID: &str = "item_id";
    pub const ARTICLE: &str = "article";
    pub const EXPLANATION: &str = "explanation";
    pub const TITLE: &str = "title";
    pub const ABSTRACT: &str = "abstract";
    pub const CONDITION: &str = "condition";
    pub const COUNT: &str = "count";
    pub const OVERLAP: &str = "overlap";
    pub const INITIAL: &str = "initial";
    pub const REPHRASE: &str = "rephrase";
}

/// `intent` slot value marking the option that a bare "yes" confirms
pub const CONFIRM_MARKER: &str = "confirm";
/// `type` slot value for yes/no option sets
pub const YES_NO: &str = "yes_no";
pub const REASON_CHANGED_MIND: &str = "changed_mind";
pub const REASON_WRONG_KEYWORD: &str = "wrong_keyword";

// ============================================================================
// Dialogue Act
// ============================================================================

/// Intent plus ordered annotations
///
/// Equality and hashing cover the intent and the full annotation content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DialogueAct {
    pub intent: Intent,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl DialogueAct {
    pub fn new(intent: impl Into<Intent>) -> Self {
        Self {
            intent: intent.into(),
            annotations: Vec::new(),
        }
    }

    pub fn with_annotations(
        intent: impl Into<Intent>,
        annotations: impl IntoIterator<Item = Annotation>,
    ) -> Self {
        Self {
            intent: intent.into(),
            annotations: annotations.into_iter().collect(),
        }
    }

    /// Builder-style append
    #[must_use]
    pub fn with(mut self, slot: impl Into<String>, value: impl Into<AnnotationValue>) -> Self {
        self.push(slot, value);
        self
    }

    pub fn push(&mut self, slot: impl Into<String>, value: impl Into<AnnotationValue>) {
        self.annotations.push(Annotation::new(slot, value));
    }

    /// Replace the first annotation for `slot`, or append one
    pub fn set(&mut self, slot: &str, value: impl Into<AnnotationValue>) {
        let value = value.into();
        match self.annotations.iter_mut().find(|a| a.slot == slot) {
            Some(existing) => existing.value = value,
            None => self.annotations.push(Annotation::new(slot, value)),
        }
    }

    pub fn user_intent(&self) -> Option<UserIntent> {
        self.intent.user()
    }

    pub fn system_intent(&self) -> Option<SystemIntent> {
        self.intent.system()
    }

    pub fn is(&self, intent: impl Into<Intent>) -> bool {
        self.intent == intent.into()
    }

    pub fn annotation(&self, slot: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.slot == slot)
    }

    pub fn value(&self, slot: &str) -> Option<&AnnotationValue> {
        self.annotation(slot).map(|a| &a.value)
    }

    pub fn text(&self, slot: &str) -> Option<&str> {
        self.value(slot).and_then(AnnotationValue::as_text)
    }

    /// All annotations for `slot`, in insertion order
    pub fn annotations_for<'a>(&'a self, slot: &'a str) -> impl Iterator<Item = &'a Annotation> + 'a {
        self.annotations.iter().filter(move |a| a.slot == slot)
    }

    /// Nested option acts, in insertion order
    pub fn options(&self) -> impl Iterator<Item = &DialogueAct> + '_ {
        self.annotations_for(slots::OPTION)
            .filter_map(|a| a.value.as_act())
    }

    /// Whether this option is the one a bare confirmation resolves to
    pub fn is_confirm_option(&self) -> bool {
        self.text(slots::INTENT) == Some(CONFIRM_MARKER)
    }
}

// ============================================================================
// Actions
// ============================================================================

/// Who authored an utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Participant {
    User,
    Agent,
}

/// Plain text turn contribution, optionally with the act it realises
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Utterance {
    pub participant: Participant,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub act: Option<DialogueAct>,
}

impl Utterance {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            participant: Participant::User,
            text: text.into(),
            act: None,
        }
    }

    /// Rendered system utterance that keeps the act it was generated from
    pub fn agent(text: impl Into<String>, act: DialogueAct) -> Self {
        Self {
            participant: Participant::Agent,
            text: text.into(),
            act: Some(act),
        }
    }
}

/// One element of a turn: either text or a structured act
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Utterance(Utterance),
    Act(DialogueAct),
}

impl Action {
    /// The act carried by this action, if any
    pub fn dialogue_act(&self) -> Option<&DialogueAct> {
        match self {
            Action::Utterance(utterance) => utterance.act.as_ref(),
            Action::Act(act) => Some(act),
        }
    }
}

impl From<DialogueAct> for Action {
    fn from(act: DialogueAct) -> Self {
        Action::Act(act)
    }
}

impl From<Utterance> for Action {
    fn from(utterance: Utterance) -> Self {
        Action::Utterance(utterance)
    }
}
