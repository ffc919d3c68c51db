//! Common error infrastructure for arena-core.
//!
//! Domain-specific errors (e.g. [`CombatError`](crate::combat::CombatError))
//! are defined next to the operations they validate. This module only
//! provides the shared classification every error implements.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: the encounter continues, the caller may pick another action
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
/// - **Fatal**: the current operation cannot proceed at all
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with an alternative action.
    ///
    /// Examples: target already defeated, item worn out
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: attacking oneself, using an ability the actor lacks
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: storage row whose tag disagrees with its columns
    Internal,

    /// Fatal error - the operation cannot continue.
    ///
    /// Examples: a participant missing from the repository
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

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all arena errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Keep `error_code` stable; presentation layers match on it
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
