//! Domain errors.

use thiserror::Error;

use super::entity::ConnectionPhase;

/// Illegal connection lifecycle transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot move connection from {from:?} to {to:?}")]
pub struct TransitionError {
    pub from: ConnectionPhase,
    pub to: ConnectionPhase,
}

/// Fan-out errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PushError {
    #[error("connection '{0}' is not registered")]
    ConnectionNotFound(String),

    #[error("push failed: {0}")]
    PushFailed(String),
}
