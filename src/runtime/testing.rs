//! Scripted collaborators for tests

use super::generation::Understanding;
use crate::dialogue::DialogueAct;
use crate::state::DialogueState;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Understanding that maps exact texts to canned acts
///
/// Unknown texts understand as nothing. Clones share the record of seen
/// texts.
#[derive(Debug, Clone, Default)]
pub struct ScriptedUnderstanding {
    script: HashMap<String, Vec<DialogueAct>>,
    seen: Arc<Mutex<Vec<String>>>,
}

impl ScriptedUnderstanding {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on(mut self, text: &str, acts: impl IntoIterator<Item = DialogueAct>) -> Self {
        self.script.insert(text.to_string(), acts.into_iter().collect());
        self
    }

    /// Texts passed to `understand`, in order
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl Understanding for ScriptedUnderstanding {
    fn understand(&self, text: &str, _state: &DialogueState) -> Vec<DialogueAct> {
        self.seen.lock().unwrap().push(text.to_string());
        self.script.get(text).cloned().unwrap_or_default()
    }
}
