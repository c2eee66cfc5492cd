//! Common error infrastructure for battle-core.
//!
//! Domain-specific errors (`ActionError`, `SessionError`, `DefinitionError`)
//! live next to the operations they validate. This module provides the shared
//! severity classification and the trait every error enum implements.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each failure surface has its own error type
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **No Partial Mutation**: Every error is raised before state is touched

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: The caller can pick another action or target and retry
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: The session cannot be constructed or continued
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - retry with a different action or target.
    ///
    /// Examples: action on cooldown, nothing selected yet
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: invalid target, unknown action id
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - misconfiguration that prevents a session from existing.
    ///
    /// Examples: empty roster
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug or a broken setup.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all battle-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable identifiers for logs and tests
pub trait BattleError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(ErrorSeverity::Internal.is_internal());
        assert_eq!(ErrorSeverity::Fatal.as_str(), "fatal");
    }
}
