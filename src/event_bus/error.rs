//! Event bus error types

use thiserror::Error;

/// Errors raised while delivering events or resolving resource requests
///
/// Every variant describes broken provider wiring rather than a runtime
/// condition, so none of them is worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BusError {
    #[error("no responder answered request `{event}`")]
    NoResponder { event: &'static str },

    #[error("more than one responder answered request `{event}`")]
    AmbiguousResponder { event: &'static str },

    #[error("responder for `{event}` returned a value that is not `{expected}`")]
    TypeMismatch {
        event: &'static str,
        expected: &'static str,
    },

    #[error("handler for `{event}` failed: {message}")]
    Handler { event: &'static str, message: String },
}

impl BusError {
    /// Machine-readable code for logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoResponder { .. } => "BUS_NO_RESPONDER",
            Self::AmbiguousResponder { .. } => "BUS_AMBIGUOUS_RESPONDER",
            Self::TypeMismatch { .. } => "BUS_TYPE_MISMATCH",
            Self::Handler { .. } => "BUS_HANDLER_FAILED",
        }
    }

    #[allow(clippy::unused_self)] // kept as a method for parity with other error types
    pub fn is_recoverable(&self) -> bool {
        false
    }

    pub fn event(&self) -> &'static str {
        match self {
            Self::NoResponder { event }
            | Self::AmbiguousResponder { event }
            | Self::TypeMismatch { event, .. }
            | Self::Handler { event, .. } => event,
        }
    }
}
