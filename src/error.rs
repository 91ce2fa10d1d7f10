//! Turn-level error type

use crate::event_bus::BusError;
use crate::state::UnsupportedStyle;
use thiserror::Error;

/// Errors that abort a turn
///
/// The conversation driver degrades every one of these to a `cant_help` act.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialogueError {
    #[error(transparent)]
    UnsupportedStyle(#[from] UnsupportedStyle),

    #[error("event bus: {0}")]
    Bus(#[from] BusError),
}

impl DialogueError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedStyle(_) => "UNSUPPORTED_STYLE",
            Self::Bus(err) => err.code(),
        }
    }
}
