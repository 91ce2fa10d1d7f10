//! One conversation, driven turn by turn
//!
//! A turn is: inbound actions -> resource fetch -> policy -> generation ->
//! outbound recording -> state snapshot. Any error degrades the turn to a
//! single `cant_help` act; nothing is retried.

use super::generation::{ActsOnly, Generation, OptionsGenerator, Understanding};
use crate::dialogue::{Action, DialogueAct, SystemIntent, Utterance};
use crate::error::DialogueError;
use crate::event_bus::{EventBus, TurnCompleted};
use crate::manager::DialogueManager;
use crate::state::{DialogueState, StateSnapshot};
use serde::{Deserialize, Serialize};

/// Client input for one turn
///
/// Explicit acts win; understanding only runs on `text` when no acts are
/// given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub acts: Vec<DialogueAct>,
}

impl TurnInput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            acts: Vec::new(),
        }
    }

    /// Utterance plus the acts it stands for
    pub fn acts(text: impl Into<String>, acts: impl IntoIterator<Item = DialogueAct>) -> Self {
        Self {
            text: Some(text.into()),
            acts: acts.into_iter().collect(),
        }
    }
}

pub struct Conversation {
    id: String,
    manager: DialogueManager,
    understanding: Box<dyn Understanding>,
    generation: Box<dyn Generation>,
    snapshots: Vec<StateSnapshot>,
}

impl std::fmt::Debug for Conversation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Conversation")
            .field("id", &self.id)
            .field("manager", &self.manager)
            .field("snapshots", &self.snapshots.len())
            .finish_non_exhaustive()
    }
}

impl Conversation {
    /// Conversation with a fresh id, acts-only understanding and
    /// pass-through generation
    pub fn new(manager: DialogueManager) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            manager,
            understanding: Box::new(ActsOnly),
            generation: Box::new(OptionsGenerator),
            snapshots: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    #[must_use]
    pub fn with_understanding(mut self, understanding: impl Understanding + 'static) -> Self {
        self.understanding = Box::new(understanding);
        self
    }

    #[must_use]
    pub fn with_generation(mut self, generation: impl Generation + 'static) -> Self {
        self.generation = Box::new(generation);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &DialogueState {
        self.manager.state()
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        self.manager.bus_mut()
    }

    /// Per-turn backups, oldest first
    pub fn snapshots(&self) -> &[StateSnapshot] {
        &self.snapshots
    }

    /// Run one full turn and return the outbound actions
    ///
    /// A failed turn is rolled back before the fallback is recorded, so the
    /// fallback is all it leaves in the state.
    pub fn turn(&mut self, input: TurnInput) -> Vec<Action> {
        let checkpoint = self.manager.checkpoint();
        let snapshots = self.snapshots.len();

        match self.run_turn(input) {
            Ok(actions) => actions,
            Err(err) => {
                tracing::error!(
                    conversation_id = %self.id,
                    error = %err,
                    code = err.code(),
                    "Turn failed, answering with fallback"
                );
                self.manager.rollback(checkpoint);
                self.snapshots.truncate(snapshots);
                let fallback = vec![Action::Act(DialogueAct::new(SystemIntent::CantHelp))];
                if let Err(err) = self.manager.process_outbound_actions(fallback.clone()) {
                    tracing::warn!(conversation_id = %self.id, error = %err, "Fallback not recorded");
                }
                fallback
            }
        }
    }

    fn run_turn(&mut self, input: TurnInput) -> Result<Vec<Action>, DialogueError> {
        let inbound = self.inbound_actions(input);
        tracing::info!(
            conversation_id = %self.id,
            turn = self.manager.state().turn() + 1,
            actions = inbound.len(),
            "Turn started"
        );

        self.manager.process_inbound_actions(inbound)?;
        self.manager.request_external_resources()?;
        let acts = self.manager.next_actions();
        let outbound = self.generation.generate(acts, self.manager.state());
        self.manager.process_outbound_actions(outbound.clone())?;
        self.backup_state()?;

        tracing::info!(
            conversation_id = %self.id,
            turn = self.manager.state().turn(),
            actions = outbound.len(),
            "Turn completed"
        );
        Ok(outbound)
    }

    fn inbound_actions(&self, input: TurnInput) -> Vec<Action> {
        let TurnInput { text, acts } = input;
        let acts = match &text {
            Some(text) if acts.is_empty() => self.understanding.understand(text, self.manager.state()),
            _ => acts,
        };

        text.map(|text| Action::Utterance(Utterance::user(text)))
            .into_iter()
            .chain(acts.into_iter().map(Action::Act))
            .collect()
    }

    fn backup_state(&mut self) -> Result<(), DialogueError> {
        let snapshot = self.manager.state().snapshot();
        self.snapshots.push(snapshot.clone());
        self.manager.bus().dispatch(&TurnCompleted {
            conversation_id: self.id.clone(),
            snapshot,
        })?;
        Ok(())
    }
}
