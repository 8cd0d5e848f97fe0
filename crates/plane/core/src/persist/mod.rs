//! Save formats shared by every part.
//!
//! Each part persists itself two independent ways:
//!
//! - **Structured form**: a `serde_json::Value` tree of named fields. Each part
//!   owns a record struct mirroring its in-memory state.
//! - **Binary primitive stream**: an ordered run of numbers, booleans and
//!   strings with no field names. Field order is the contract; see
//!   [`StreamWriter`] / [`StreamReader`].
//!
//! Both encodings are stamped with a [`FormatVersion`]. Parts never branch on
//! the version inside their live model: older shapes are decoded into
//! dedicated legacy types and lifted through [`Migrate`] before use.

mod migrate;
mod stream;

pub use migrate::Migrate;
pub use stream::{Primitive, STREAM_MAGIC, StreamReader, StreamWriter};

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorSeverity, PlaneError};

/// Save format revision.
///
/// Revisions are decimal (`11.15`, `12.0`) and compare numerically.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatVersion(f64);

impl FormatVersion {
    /// Revision written by this build.
    pub const CURRENT: Self = Self(12.0);

    /// Last revision whose wing segments carried no `gull` flag.
    pub const LEGACY_WINGS: Self = Self(11.15);

    pub const fn new(version: f64) -> Self {
        Self(version)
    }

    pub const fn get(self) -> f64 {
        self.0
    }

    /// Wing segments record `gull` only in saves newer than
    /// [`FormatVersion::LEGACY_WINGS`].
    pub fn has_gull_wings(self) -> bool {
        self > Self::LEGACY_WINGS
    }
}

impl Default for FormatVersion {
    fn default() -> Self {
        Self::CURRENT
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised while decoding a save into a part.
///
/// A failed load leaves the part exactly as it was before the call.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum PersistError {
    #[error("JSON error: {0}")]
    Json(String),

    #[error("binary frame error: {0}")]
    Encoding(String),

    #[error("not a part stream (magic 0x{0:08X})")]
    InvalidMagic(u32),

    #[error("stream ended after {position} values")]
    UnexpectedEnd { position: usize },

    #[error("expected {expected} at position {position}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
        position: usize,
    },

    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },

    #[error("{remaining} unread values left in stream")]
    TrailingData { remaining: usize },
}

impl PersistError {
    pub(crate) fn invalid(field: &'static str, value: impl fmt::Display) -> Self {
        Self::InvalidValue {
            field,
            value: value.to_string(),
        }
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl PlaneError for PersistError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            PersistError::Encoding(_) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use PersistError::*;
        match self {
            Json(_) => "PERSIST_JSON",
            Encoding(_) => "PERSIST_ENCODING",
            InvalidMagic(_) => "PERSIST_INVALID_MAGIC",
            UnexpectedEnd { .. } => "PERSIST_UNEXPECTED_END",
            TypeMismatch { .. } => "PERSIST_TYPE_MISMATCH",
            InvalidValue { .. } => "PERSIST_INVALID_VALUE",
            TrailingData { .. } => "PERSIST_TRAILING_DATA",
        }
    }
}

/// Converts a decoded number into a table index.
pub(crate) fn as_index(field: &'static str, value: f64) -> Result<usize, PersistError> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Ok(value as usize)
    } else {
        Err(PersistError::invalid(field, value))
    }
}

/// Converts a decoded number into a counter.
pub(crate) fn as_count(field: &'static str, value: f64) -> Result<u32, PersistError> {
    as_index(field, value).map(|v| v as u32)
}

/// Checks a decoded index against the length of the table it refers to.
pub(crate) fn check_index(
    field: &'static str,
    index: usize,
    len: usize,
) -> Result<usize, PersistError> {
    if index < len {
        Ok(index)
    } else {
        Err(PersistError::invalid(field, format!("{index} (table has {len})")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_gates_gull_field() {
        assert!(!FormatVersion::new(11.0).has_gull_wings());
        assert!(!FormatVersion::LEGACY_WINGS.has_gull_wings());
        assert!(FormatVersion::new(11.2).has_gull_wings());
        assert!(FormatVersion::CURRENT.has_gull_wings());
    }

    #[test]
    fn index_conversion_rejects_fractions_and_negatives() {
        assert_eq!(as_index("mount", 3.0), Ok(3));
        assert!(as_index("mount", -1.0).is_err());
        assert!(as_index("mount", 1.5).is_err());
        assert!(as_index("mount", f64::NAN).is_err());
        assert!(check_index("mount", 4, 4).is_err());
        assert_eq!(
            PersistError::invalid("deck", 9).error_code(),
            "PERSIST_INVALID_VALUE"
        );
    }
}
