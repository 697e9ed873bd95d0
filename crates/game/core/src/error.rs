//! Common error infrastructure for quest-core.
//!
//! Domain errors (`ActionError`, `ExecuteError`) live next to the code that
//! raises them; this module holds the classification they share.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same actor can pick a different action this turn
/// - **Validation**: the action is malformed or names something that does not exist
/// - **Internal**: a transition broke a state invariant
/// - **Fatal**: the caller skipped validation; a programming error
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: destination occupied, not enough movement, target out of range.
    Recoverable,

    /// Examples: actor not found, dice count mismatch, unknown ability.
    Validation,

    /// Examples: health above maximum after a transition.
    Internal,

    /// Examples: `apply` called with an action `validate` would reject.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug rather than a bad move.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all quest-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Keep error codes stable; tests and logs match on them
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_covers_fatal() {
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(ErrorSeverity::Internal.is_internal());
        assert!(!ErrorSeverity::Validation.is_internal());
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert_eq!(ErrorSeverity::Fatal.as_str(), "fatal");
    }
}
