//! Common error infrastructure for legends-core.
//!
//! Domain-specific errors (`SkillError`, `BattleError`, `ListenerError`) are
//! defined next to the operations that produce them. This module provides the
//! classification shared by all of them.
//!
//! Only a small part of battle resolution can fail at all. Malformed player
//! input is re-prompted where it is read and never becomes an error value.
//! Health, mana and durations are clamped instead of validated.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same turn can continue with another choice
/// - **Validation**: the request itself was invalid
/// - **Internal**: unexpected state inconsistency
/// - **Fatal**: the battle cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Recoverable error - re-select an action and continue.
    ///
    /// Examples: not enough mana, no potions left
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    Validation,

    /// Internal error - a bug in a collaborator or the engine.
    ///
    /// Examples: an event listener failed
    Internal,

    /// Fatal error - resolution cannot proceed.
    ///
    /// Examples: the input collaborator closed mid-battle
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

/// Common trait for all legends-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
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
