//! Understanding and generation seams
//!
//! Both collaborators are external to the engine. Understanding turns raw
//! user text into dialogue acts; generation turns the policy's acts into the
//! actions sent back to the client.

use crate::dialogue::{ensure_label, slots, Action, AnnotationValue, DialogueAct, SystemIntent};
use crate::state::DialogueState;

/// Derives dialogue acts from one user utterance
pub trait Understanding: Send {
    fn understand(&self, text: &str, state: &DialogueState) -> Vec<DialogueAct>;
}

impl<F> Understanding for F
where
    F: Fn(&str, &DialogueState) -> Vec<DialogueAct> + Send,
{
    fn understand(&self, text: &str, state: &DialogueState) -> Vec<DialogueAct> {
        self(text, state)
    }
}

/// Understanding for clients that always send structured acts
#[derive(Debug, Clone, Copy, Default)]
pub struct ActsOnly;

impl Understanding for ActsOnly {
    fn understand(&self, _text: &str, _state: &DialogueState) -> Vec<DialogueAct> {
        Vec::new()
    }
}

/// Renders system acts into outbound actions
pub trait Generation: Send {
    fn generate(&self, acts: Vec<DialogueAct>, state: &DialogueState) -> Vec<Action>;
}

/// Pass-through generation for clients that render acts themselves
///
/// Options get `text`/`short` labels so that buttons can be drawn and a
/// selected option can be replayed as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionsGenerator;

impl Generation for OptionsGenerator {
    fn generate(&self, acts: Vec<DialogueAct>, _state: &DialogueState) -> Vec<Action> {
        acts.into_iter()
            .map(|mut act| {
                if act.is(SystemIntent::ProvideOptions) {
                    label_options(&mut act);
                }
                Action::Act(act)
            })
            .collect()
    }
}

fn label_options(menu: &mut DialogueAct) {
    for annotation in &mut menu.annotations {
        if annotation.slot != slots::OPTION {
            continue;
        }
        if let AnnotationValue::Act(option) = &mut annotation.value {
            ensure_label(option);
        }
    }
}
