//! Error types for the action execution pipeline.

use crate::action::{ActionError, ActionKind};
use crate::error::{ErrorSeverity, GameError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

impl std::fmt::Display for TransitionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Error surfaced by [`apply`](crate::engine::apply).
///
/// A failure in `pre_validate` means the caller applied an action that
/// `validate` would have rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{kind} action failed: {failure}")]
pub struct ExecuteError {
    pub kind: ActionKind,
    pub failure: TransitionPhaseError<ActionError>,
}

impl ExecuteError {
    pub fn new(kind: ActionKind, failure: TransitionPhaseError<ActionError>) -> Self {
        Self { kind, failure }
    }

    pub fn phase(&self) -> TransitionPhase {
        self.failure.phase
    }

    pub fn action_error(&self) -> &ActionError {
        &self.failure.error
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self.failure.phase {
            TransitionPhase::PreValidate => ErrorSeverity::Fatal,
            TransitionPhase::Apply | TransitionPhase::PostValidate => {
                match self.failure.error.severity() {
                    ErrorSeverity::Recoverable | ErrorSeverity::Validation => {
                        ErrorSeverity::Internal
                    }
                    severity => severity,
                }
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self.failure.phase {
            TransitionPhase::PreValidate => "EXECUTE_REJECTED_ACTION",
            TransitionPhase::Apply => "EXECUTE_APPLY_FAILED",
            TransitionPhase::PostValidate => "EXECUTE_POST_VALIDATE_FAILED",
        }
    }
}
