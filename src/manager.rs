//! Dialogue manager
//!
//! Composes the tracker and the active policy into the four steps of a turn:
//!
//! 1. [`DialogueManager::process_inbound_actions`]
//! 2. [`DialogueManager::request_external_resources`]
//! 3. [`DialogueManager::next_actions`]
//! 4. [`DialogueManager::process_outbound_actions`]
//!
//! The order is load-bearing: the policy must see flags computed after the
//! resource fetch.

use crate::dialogue::{Action, DialogueAct};
use crate::error::DialogueError;
use crate::event_bus::EventBus;
use crate::policy::Policy;
use crate::state::{DialogueState, Style};
use crate::tracker::DialogueStateTracker;

/// State and policy as they were before a turn started
#[derive(Debug, Clone)]
pub struct Checkpoint {
    state: DialogueState,
    policy: Policy,
}

#[derive(Debug)]
pub struct DialogueManager {
    bus: EventBus,
    tracker: DialogueStateTracker,
    policy: Policy,
}

impl DialogueManager {
    pub fn new(style: Style, top_k: usize) -> Self {
        Self::with_bus(EventBus::new(), style, top_k)
    }

    /// Manager over a bus that already has its providers wired
    pub fn with_bus(bus: EventBus, style: Style, top_k: usize) -> Self {
        Self {
            bus,
            tracker: DialogueStateTracker::new(style, top_k),
            policy: Policy::for_style(style),
        }
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Mutable bus access for wiring providers and listeners
    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    pub fn state(&self) -> &DialogueState {
        self.tracker.state()
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            state: self.tracker.state().clone(),
            policy: self.policy,
        }
    }

    /// Undo everything applied since `checkpoint` was taken
    ///
    /// Events already published on the bus are not recalled.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        let Checkpoint { state, policy } = checkpoint;
        tracing::debug!(turn = state.turn(), policy = %policy.style(), "Rolling back turn");
        self.tracker.restore(state);
        self.policy = policy;
    }

    pub fn process_inbound_actions(&mut self, actions: Vec<Action>) -> Result<(), DialogueError> {
        self.tracker.process_user_actions(actions, &self.bus)
    }

    pub fn request_external_resources(&mut self) -> Result<(), DialogueError> {
        self.tracker.request_external_resources(&self.bus)
    }

    /// Policy output for the current turn, before rendering
    ///
    /// Swaps the active policy first when the turn changed the style.
    pub fn next_actions(&mut self) -> Vec<DialogueAct> {
        let state = self.tracker.state();
        if state.flags().style_changed {
            let policy = Policy::for_style(state.style());
            if policy != self.policy {
                tracing::info!(from = %self.policy.style(), to = %policy.style(), "Switching policy");
                self.policy = policy;
            }
        }
        self.policy.generate(state)
    }

    /// Record the rendered or structured output of the turn
    pub fn process_outbound_actions(&mut self, actions: Vec<Action>) -> Result<(), DialogueError> {
        self.tracker.process_agent_actions(actions, &self.bus)
    }
}
