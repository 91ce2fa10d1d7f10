//! Runtime for hosting conversations
//!
//! Each conversation runs in its own tokio task and owns its bus, state and
//! providers. Turns are submitted over an mpsc channel and answered over a
//! oneshot, so turns of one conversation never interleave while different
//! conversations proceed concurrently.

mod conversation;
mod generation;

#[cfg(test)]
pub mod testing;

pub use conversation::{Conversation, TurnInput};
pub use generation::{ActsOnly, Generation, OptionsGenerator, Understanding};

use crate::dialogue::Action;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, RwLock};

/// Builds a fresh conversation with its providers wired
pub type ConversationFactory = Arc<dyn Fn() -> Conversation + Send + Sync>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("conversation {0} is not running")]
    Stopped(String),
}

impl RuntimeError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Stopped(_) => "CONVERSATION_STOPPED",
        }
    }
}

/// Outbound actions of one completed turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnOutput {
    pub conversation_id: String,
    pub turn: u64,
    pub actions: Vec<Action>,
}

/// A turn waiting for its conversation task
#[derive(Debug)]
pub struct TurnRequest {
    pub input: TurnInput,
    pub reply: oneshot::Sender<TurnOutput>,
}

/// Handle to interact with a running conversation
#[derive(Debug, Clone)]
pub struct ConversationHandle {
    pub turn_tx: mpsc::Sender<TurnRequest>,
}

/// Manager for all conversation runtimes
pub struct RuntimeManager {
    factory: ConversationFactory,
    runtimes: RwLock<HashMap<String, ConversationHandle>>,
}

impl std::fmt::Debug for RuntimeManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeManager").finish_non_exhaustive()
    }
}

impl RuntimeManager {
    pub fn new(factory: impl Fn() -> Conversation + Send + Sync + 'static) -> Self {
        Self {
            factory: Arc::new(factory),
            runtimes: RwLock::new(HashMap::new()),
        }
    }

    /// Start a conversation under a fresh id
    pub async fn create(&self) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.get_or_create(&id).await;
        id
    }

    /// Get or start the runtime for a conversation
    pub async fn get_or_create(&self, conversation_id: &str) -> ConversationHandle {
        // Check if already running
        {
            let runtimes = self.runtimes.read().await;
            if let Some(handle) = runtimes.get(conversation_id) {
                if !handle.turn_tx.is_closed() {
                    return handle.clone();
                }
            }
        }

        let mut runtimes = self.runtimes.write().await;
        if let Some(handle) = runtimes.get(conversation_id) {
            if !handle.turn_tx.is_closed() {
                return handle.clone();
            }
        }

        let conversation = (self.factory)().with_id(conversation_id);
        let (turn_tx, turn_rx) = mpsc::channel(32);
        tokio::spawn(run_conversation(conversation, turn_rx));
        tracing::info!(conversation_id = %conversation_id, "Conversation runtime started");

        let handle = ConversationHandle { turn_tx };
        runtimes.insert(conversation_id.to_string(), handle.clone());
        handle
    }

    /// Run one turn of a conversation, starting it if needed
    pub async fn submit(&self, conversation_id: &str, input: TurnInput) -> Result<TurnOutput, RuntimeError> {
        let handle = self.get_or_create(conversation_id).await;
        let stopped = || RuntimeError::Stopped(conversation_id.to_string());

        let (reply, response) = oneshot::channel();
        handle
            .turn_tx
            .send(TurnRequest { input, reply })
            .await
            .map_err(|_| stopped())?;
        response.await.map_err(|_| stopped())
    }

    /// Stop a conversation; its task ends once queued turns are answered
    pub async fn close(&self, conversation_id: &str) -> bool {
        let removed = self.runtimes.write().await.remove(conversation_id).is_some();
        if removed {
            tracing::info!(conversation_id = %conversation_id, "Conversation closed");
        }
        removed
    }

    pub async fn conversation_ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.runtimes.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }
}

async fn run_conversation(mut conversation: Conversation, mut turn_rx: mpsc::Receiver<TurnRequest>) {
    while let Some(TurnRequest { input, reply }) = turn_rx.recv().await {
        let actions = conversation.turn(input);
        let output = TurnOutput {
            conversation_id: conversation.id().to_string(),
            turn: conversation.state().turn(),
            actions,
        };
        if reply.send(output).is_err() {
            tracing::debug!(conversation_id = %conversation.id(), "Turn caller went away");
        }
    }
    tracing::info!(conversation_id = %conversation.id(), "Conversation runtime finished");
}
