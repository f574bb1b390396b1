//! Common error infrastructure for tactics-core.
//!
//! Domain-specific errors (`MapError`, `PathError`, `TransitionError`, ...)
//! live next to the component that produces them. They all implement
//! [`GameError`] so the caller can decide how to react without matching on
//! every variant.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the caller can pick another cell, target or command
/// - **Validation**: the request was malformed for the current state
/// - **Internal**: a caller bug or a broken invariant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - retry with a different choice.
    ///
    /// Examples: destination occupied, destination unreachable
    Recoverable,

    /// Validation error - reject the input without retrying it unchanged.
    ///
    /// Examples: actor not found, actor belongs to the other side
    Validation,

    /// Internal error - the caller passed data it should never produce.
    ///
    /// Examples: coordinate outside the map extents
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all tactics-core errors.
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
