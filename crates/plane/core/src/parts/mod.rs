//! Part models.
//!
//! Every part owns its state, keeps it valid after each call and derives its
//! own [`Stats`]. The host reads the result through the [`Part`] trait and
//! watches [`Part::revision`] to know when a re-read is due.

pub mod engine;
pub mod rotor;
pub mod wings;

pub use engine::{Engine, EngineRecord, EngineSelection, PropellerMount, Spinner};
pub use rotor::{Rotor, RotorRecord};
pub use wings::{
    LegacyWingSegment, LegacyWingsRecord, Sesquiplane, WingSegment, Wings, WingsRecord,
};

use serde_json::Value;
use tracing::trace;

use crate::error::{ErrorSeverity, PlaneError};
use crate::persist::{FormatVersion, PersistError, StreamReader, StreamWriter};
use crate::stats::Stats;

/// Capability set shared by every part model.
pub trait Part {
    fn kind(&self) -> PartKind;

    /// Derives the part's stat contribution from its current state.
    fn part_stats(&self) -> Stats;

    /// Change counter; moves whenever [`Part::part_stats`] may have changed.
    fn revision(&self) -> Revision;

    /// Structured save form.
    fn to_json(&self) -> Result<Value, PersistError>;

    /// Restores state from the structured form written at `version`.
    ///
    /// On error the part is left untouched.
    fn from_json(&mut self, value: &Value, version: FormatVersion) -> Result<(), PersistError>;

    /// Appends the part to a binary primitive stream.
    fn serialize(&self, out: &mut StreamWriter);

    /// Reads the part back from a binary primitive stream, gating fields on
    /// the stream's version. On error the part is left untouched.
    fn deserialize(&mut self, input: &mut StreamReader) -> Result<(), PersistError>;
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PartKind {
    Engine,
    Rotor,
    Wings,
}

/// Monotonic per-part change counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Revision(u64);

impl Revision {
    pub const fn get(self) -> u64 {
        self.0
    }

    pub(crate) fn bump(&mut self, kind: PartKind) {
        self.0 += 1;
        trace!(part = %kind, revision = self.0, "part revision bumped");
    }
}

/// Aircraft category, shared by the rotor and wing rules.
///
/// Saves store the category as its discriminant.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::FromRepr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum AircraftType {
    #[default]
    Airplane = 0,
    Helicopter = 1,
    Autogyro = 2,
    OrnithopterBasic = 3,
    OrnithopterFlutter = 4,
    OrnithopterBuzzer = 5,
}

impl AircraftType {
    /// Helicopters and autogyros carry a rotor; everything else is
    /// fixed-wing as far as the rotor is concerned.
    pub const fn is_rotorcraft(self) -> bool {
        matches!(self, Self::Helicopter | Self::Autogyro)
    }

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub(crate) fn from_code(code: f64) -> Result<Self, PersistError> {
        if code.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(&code) {
            if let Some(kind) = Self::from_repr(code as u8) {
                return Ok(kind);
            }
        }
        Err(PersistError::invalid("type", code))
    }
}

/// A setter was handed an index outside the table it selects from.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PartError {
    #[error("{table} index {index} is out of range (table has {len})")]
    IndexOutOfRange {
        table: &'static str,
        index: usize,
        len: usize,
    },
}

impl PartError {
    pub(crate) fn check(table: &'static str, index: usize, len: usize) -> Result<(), Self> {
        if index < len {
            Ok(())
        } else {
            Err(Self::IndexOutOfRange { table, index, len })
        }
    }
}

impl PlaneError for PartError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::IndexOutOfRange { .. } => "PART_INDEX_OUT_OF_RANGE",
        }
    }
}
