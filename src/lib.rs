//! Dialogue engine - turn-based conversational recommendation
//!
//! A per-conversation event bus, a state tracker that is the only writer of
//! dialogue state, style-specific policies that decide the next system acts,
//! and a manager composing them into turns. Understanding, generation and
//! content providers plug in from the outside.

pub mod config;
pub mod dialogue;
pub mod error;
pub mod event_bus;
pub mod manager;
pub mod policy;
pub mod providers;
pub mod runtime;
pub mod state;
pub mod tracker;

pub use config::{ConfigError, EngineConfig, LogFormat};
pub use dialogue::{Action, Annotation, AnnotationValue, DialogueAct, Intent, SystemIntent, UserIntent, Utterance};
pub use error::DialogueError;
pub use event_bus::{BusError, EventBus};
pub use manager::DialogueManager;
pub use policy::Policy;
pub use runtime::{Conversation, RuntimeManager, TurnInput, TurnOutput};
pub use state::{DialogueState, StateSnapshot, Style};
pub use tracker::DialogueStateTracker;
