//! The additive stat vector every part contributes to.

use core::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

use crate::persist::{PersistError, StreamReader, StreamWriter};
use crate::rounding::floor_eps;

/// A period note attached to a stat contribution ("Gull Wing" → "Coming Storm").
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EraNote {
    pub name: String,
    pub era: String,
}

impl EraNote {
    pub fn new(name: impl Into<String>, era: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            era: era.into(),
        }
    }
}

/// Additive performance aggregate.
///
/// Every numeric axis combines by plain addition, so the total of an aircraft
/// is the sum of its parts in any order. `era` notes concatenate in order.
///
/// Combining never mutates an operand: [`Stats::add`] and [`Stats::multiply`]
/// (and the `+` / `*` operators) return a new vector.
///
/// JSON field names follow the established save format (`liftbleed`,
/// `maxstrain`, …); every axis defaults to zero when absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub power: f64,
    pub mass: f64,
    pub drag: f64,
    pub control: f64,
    pub cost: f64,
    #[serde(rename = "liftbleed")]
    pub lift_bleed: f64,
    #[serde(rename = "pitchstab")]
    pub pitch_stab: f64,
    #[serde(rename = "latstab")]
    pub lat_stab: f64,
    pub cooling: f64,
    pub reliability: f64,
    #[serde(rename = "fuelconsumption")]
    pub fuel_consumption: f64,
    #[serde(rename = "maxstrain")]
    pub max_strain: f64,
    pub structure: f64,
    pub toughness: f64,
    #[serde(rename = "wingarea")]
    pub wing_area: f64,
    pub visibility: f64,
    #[serde(rename = "crashsafety")]
    pub crash_safety: f64,
    pub charge: f64,
    pub era: Vec<EraNote>,
}

/// Number of numeric axes in a [`Stats`] vector.
pub const AXIS_COUNT: usize = 18;

impl Stats {
    /// Empty vector; identical to `Stats::default()`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Numeric axes in canonical order (the binary stream order).
    fn axes(&self) -> [f64; AXIS_COUNT] {
        [
            self.power,
            self.mass,
            self.drag,
            self.control,
            self.cost,
            self.lift_bleed,
            self.pitch_stab,
            self.lat_stab,
            self.cooling,
            self.reliability,
            self.fuel_consumption,
            self.max_strain,
            self.structure,
            self.toughness,
            self.wing_area,
            self.visibility,
            self.crash_safety,
            self.charge,
        ]
    }

    fn axes_mut(&mut self) -> [&mut f64; AXIS_COUNT] {
        [
            &mut self.power,
            &mut self.mass,
            &mut self.drag,
            &mut self.control,
            &mut self.cost,
            &mut self.lift_bleed,
            &mut self.pitch_stab,
            &mut self.lat_stab,
            &mut self.cooling,
            &mut self.reliability,
            &mut self.fuel_consumption,
            &mut self.max_strain,
            &mut self.structure,
            &mut self.toughness,
            &mut self.wing_area,
            &mut self.visibility,
            &mut self.crash_safety,
            &mut self.charge,
        ]
    }

    /// Field-wise sum. Era notes of `other` follow those of `self`.
    #[must_use]
    pub fn add(&self, other: &Stats) -> Stats {
        let mut out = self.clone();
        for (dst, src) in out.axes_mut().into_iter().zip(other.axes()) {
            *dst += src;
        }
        out.era.extend(other.era.iter().cloned());
        out
    }

    /// Scales every numeric axis by `factor`. Era notes are kept as-is.
    #[must_use]
    pub fn multiply(&self, factor: f64) -> Stats {
        let mut out = self.clone();
        for axis in out.axes_mut() {
            *axis *= factor;
        }
        out
    }

    /// Floors every numeric axis with the shared epsilon convention.
    pub fn round(&mut self) {
        for axis in self.axes_mut() {
            *axis = floor_eps(*axis);
        }
    }

    /// True when every numeric axis is zero and there are no era notes.
    pub fn is_empty(&self) -> bool {
        self.era.is_empty() && self.axes().iter().all(|v| *v == 0.0)
    }

    /// Appends the vector to a primitive stream in canonical axis order,
    /// followed by the era notes.
    pub fn serialize(&self, out: &mut StreamWriter) {
        for value in self.axes() {
            out.push_num(value);
        }
        out.push_num(self.era.len() as f64);
        for note in &self.era {
            out.push_str(&note.name);
            out.push_str(&note.era);
        }
    }

    /// Reads a vector written by [`Stats::serialize`].
    pub fn deserialize(input: &mut StreamReader) -> Result<Stats, PersistError> {
        let mut stats = Stats::default();
        for axis in stats.axes_mut() {
            *axis = input.read_num()?;
        }
        let notes = input.read_count("era")?;
        for _ in 0..notes {
            let name = input.read_str()?;
            let era = input.read_str()?;
            stats.era.push(EraNote { name, era });
        }
        Ok(stats)
    }
}

impl<'a> Add<&'a Stats> for &'a Stats {
    type Output = Stats;

    fn add(self, rhs: &'a Stats) -> Stats {
        Stats::add(self, rhs)
    }
}

impl Mul<f64> for &Stats {
    type Output = Stats;

    fn mul(self, rhs: f64) -> Stats {
        self.multiply(rhs)
    }
}

impl core::iter::Sum for Stats {
    fn sum<I: Iterator<Item = Stats>>(iter: I) -> Self {
        iter.fold(Stats::default(), |acc, s| acc.add(&s))
    }
}
