//! Common error infrastructure for plane-core.
//!
//! This module provides the shared severity classification and the trait every
//! error enum in the crate implements. Domain errors live next to the code that
//! raises them:
//!
//! - [`CatalogError`](crate::catalog::CatalogError) for archetype tables a part
//!   cannot be built from
//! - [`PartError`](crate::parts::PartError) for setters handed an index outside
//!   a table
//! - [`PersistError`](crate::persist::PersistError) for saves that cannot be
//!   decoded into a valid part
//!
//! Only host-contract violations become errors. User edits that would break an
//! invariant are sanitised or refused silently by the parts themselves.

/// Severity level of an error, used for categorization and logging priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorSeverity {
    /// Invalid input from the host, should not retry without changes.
    ///
    /// Examples: mount index past the end of the mount table, save data with
    /// a deck the live catalog does not know.
    Validation,

    /// Unexpected state inconsistency inside the engine.
    ///
    /// These indicate bugs and should be investigated.
    Internal,

    /// The host wired the part up with data it can never work with.
    ///
    /// Examples: an empty engine table, a mount whose push-pull linkage is
    /// missing.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error indicates a bug or unusable wiring.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all plane-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity by who has to fix it, not by impact
/// - Error codes are stable strings suitable for logs and tests
pub trait PlaneError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
