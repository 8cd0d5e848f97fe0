//! Rotor part: aircraft category and rotor geometry.
//!
//! Only helicopters and autogyros carry a rotor. For an autogyro the sizing
//! span is a hard minimum driven by wing area. For a helicopter it is the
//! largest span the airframe's dry mass supports without a reliability
//! penalty; an unset pitch leaves the span effectively unconstrained.

use std::f64::consts::PI;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{AircraftType, Part, PartError, PartKind, Revision};
use crate::catalog::RotorCatalog;
use crate::config::DesignConfig;
use crate::persist::{FormatVersion, PersistError, StreamReader, StreamWriter, check_index};
use crate::rounding::{ceil_eps, floor_eps, sanitize_count};
use crate::stats::Stats;

/// Disc area of a rotor of span `span`.
fn disc_area(span: f64) -> f64 {
    (PI / 8.0) * span * span
}

/// Span multiplier for each pitch setting, 1 (fine) to 5 (coarse).
fn pitch_factor(pitch: Option<u8>) -> f64 {
    match pitch {
        Some(1) => 1.10,
        Some(2) => 1.05,
        Some(3) => 1.00,
        Some(4) => 0.95,
        Some(5) => 0.90,
        _ => 1000.0,
    }
}

#[derive(Clone, Debug)]
pub struct Rotor {
    catalog: Arc<RotorCatalog>,
    max_increments: u32,
    aircraft_type: AircraftType,
    rotor_count: u32,
    rotor_span: f64,
    wing_area: f64,
    is_tandem: bool,
    pitch: Option<u8>,
    dry_mass: f64,
    sizing_span: f64,
    cantilever: usize,
    accessory: bool,
    revision: Revision,
}

impl Rotor {
    pub fn new(catalog: Arc<RotorCatalog>, config: &DesignConfig) -> Self {
        Self {
            catalog,
            max_increments: config.max_cantilever_increments,
            aircraft_type: AircraftType::Airplane,
            rotor_count: 0,
            rotor_span: 0.0,
            wing_area: 0.0,
            is_tandem: false,
            pitch: None,
            dry_mass: 0.0,
            sizing_span: 0.0,
            cantilever: 0,
            accessory: false,
            revision: Revision::default(),
        }
    }

    pub fn catalog(&self) -> &Arc<RotorCatalog> {
        &self.catalog
    }

    fn touch(&mut self) {
        self.revision.bump(PartKind::Rotor);
    }

    /// Re-derives the sizing span and forces count, span and tandem into the
    /// shape the category allows.
    fn verify_sizes(&mut self) {
        match self.aircraft_type {
            AircraftType::Helicopter => {
                self.rotor_count = self.rotor_count.max(1);
                if self.rotor_count > 1 && self.rotor_count % 2 == 1 {
                    self.rotor_count -= 1;
                }
                let base = if self.rotor_count == 1 { 5.0 } else { 4.0 };
                let mass_factor = self.dry_mass.max(0.0).powf(1.0 / 2.5);
                self.sizing_span = ceil_eps(mass_factor * base * pitch_factor(self.pitch));
            }
            AircraftType::Autogyro => {
                self.rotor_count = 1;
                self.sizing_span = ceil_eps((0.6 * self.wing_area.max(0.0) / (PI / 8.0)).sqrt());
                self.rotor_span = self.rotor_span.max(self.sizing_span);
                self.pitch = None;
            }
            _ => {
                self.rotor_count = 0;
                self.rotor_span = 0.0;
                self.sizing_span = 0.0;
            }
        }
        if !self.can_tandem() {
            self.is_tandem = false;
        }
    }

    // ===== category =====

    /// Switches category. A real change resets count, tandem, cantilever and
    /// accessory before re-sizing.
    pub fn set_type(&mut self, aircraft_type: AircraftType) {
        if aircraft_type != self.aircraft_type {
            self.accessory = false;
            self.cantilever = 0;
            self.is_tandem = false;
            self.rotor_count = 1;
        }
        self.aircraft_type = aircraft_type;
        self.verify_sizes();
        self.touch();
    }

    pub fn aircraft_type(&self) -> AircraftType {
        self.aircraft_type
    }

    // ===== geometry =====

    pub fn can_rotor_count(&self) -> bool {
        self.aircraft_type == AircraftType::Helicopter
    }

    /// Sets the rotor count. At least one; above one it must be even, so an
    /// odd request steps further in the direction the user was moving.
    pub fn set_rotor_count(&mut self, count: f64) {
        let mut count = sanitize_count(count).max(1);
        if count >= 2 && count % 2 == 1 {
            count = if count == self.rotor_count.saturating_add(1) {
                count.saturating_add(1)
            } else {
                count - 1
            };
        }
        self.rotor_count = count;
        self.verify_sizes();
        self.touch();
    }

    pub fn rotor_count(&self) -> u32 {
        self.rotor_count
    }

    pub fn can_rotor_span(&self) -> bool {
        self.aircraft_type == AircraftType::Helicopter
    }

    pub fn set_rotor_span(&mut self, span: f64) {
        self.rotor_span = f64::from(sanitize_count(span));
        self.verify_sizes();
        self.touch();
    }

    pub fn rotor_span(&self) -> f64 {
        self.rotor_span
    }

    pub fn sizing_span(&self) -> f64 {
        self.sizing_span
    }

    pub fn can_tandem(&self) -> bool {
        self.aircraft_type == AircraftType::Helicopter && self.rotor_count > 1
    }

    pub fn set_tandem(&mut self, tandem: bool) {
        self.is_tandem = tandem && self.can_tandem();
        self.touch();
    }

    pub fn tandem(&self) -> bool {
        self.is_tandem
    }

    /// Blade pitch, 1 to 5. Anything else counts as unset.
    pub fn set_pitch(&mut self, pitch: Option<u8>) {
        self.pitch = pitch.filter(|p| (1..=5).contains(p));
        self.verify_sizes();
        self.touch();
    }

    pub fn pitch(&self) -> Option<u8> {
        self.pitch
    }

    // ===== host context =====

    /// Total wing area of the airframe; sizes autogyro rotors.
    pub fn set_wing_area(&mut self, area: f64) {
        if area != self.wing_area {
            self.wing_area = area;
            self.verify_sizes();
            self.touch();
        }
    }

    /// Dry mass of the airframe; sizes helicopter rotors.
    pub fn set_dry_mass(&mut self, mass: f64) {
        if mass != self.dry_mass {
            self.dry_mass = mass;
            self.verify_sizes();
            self.touch();
        }
    }

    // ===== material =====

    pub fn set_cantilever(&mut self, index: usize) -> Result<(), PartError> {
        PartError::check("cantilever", index, self.catalog.cantilevers().len())?;
        self.cantilever = index;
        self.touch();
        Ok(())
    }

    pub fn cantilever(&self) -> usize {
        self.cantilever
    }

    pub fn set_accessory(&mut self, accessory: bool) {
        self.accessory = accessory;
        self.touch();
    }

    pub fn accessory(&self) -> bool {
        self.accessory
    }

    // ===== derived =====

    fn rotor_strain(&self) -> f64 {
        let area = disc_area(self.rotor_span);
        f64::from(self.rotor_count) * (2.0 * self.rotor_span + area - 10.0).max(1.0)
    }

    pub fn rotor_drag(&self) -> f64 {
        if !self.aircraft_type.is_rotorcraft() || self.rotor_span <= 0.0 {
            return 0.0;
        }
        let area = disc_area(self.rotor_span);
        let single = floor_eps(6.0 * area * area / (self.rotor_span * self.rotor_span));
        if self.rotor_count == 1 {
            single
        } else {
            floor_eps(DesignConfig::MULTI_ROTOR_DRAG_FACTOR * f64::from(self.rotor_count) * single)
        }
    }

    pub fn part_stats(&self) -> Stats {
        let mut stats = Stats {
            wing_area: disc_area(self.rotor_span),
            drag: self.rotor_drag(),
            ..Stats::default()
        };

        let material = &self.catalog.cantilevers()[self.cantilever];
        let mut increment = material.stats.clone();
        increment.max_strain = 0.0;
        increment.toughness = 0.0;

        let mut strain = self.rotor_strain();
        let mut used = 0;
        while strain > 0.0 && used < self.max_increments {
            strain -= material.stats.max_strain;
            stats = stats.add(&increment);
            used += 1;
        }

        if self.is_tandem {
            stats.pitch_stab = DesignConfig::TANDEM_PITCH_STABILITY;
        }
        if self.aircraft_type == AircraftType::Helicopter {
            stats.reliability = (self.sizing_span - self.rotor_span).min(0.0);
        }
        stats
    }
}

/// Structured rotor save.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RotorRecord {
    #[serde(rename = "type")]
    pub aircraft_type: u8,
    pub rotor_count: u32,
    pub rotor_span: f64,
    pub rotor_mat: usize,
    pub is_tandem: bool,
    pub accessory: bool,
}

impl Rotor {
    pub fn record(&self) -> RotorRecord {
        RotorRecord {
            aircraft_type: self.aircraft_type.code(),
            rotor_count: self.rotor_count,
            rotor_span: self.rotor_span,
            rotor_mat: self.cantilever,
            is_tandem: self.is_tandem,
            accessory: self.accessory,
        }
    }

    /// Replaces the rotor state with a decoded record, then re-sizes.
    ///
    /// The category is taken as saved, without the reset [`Rotor::set_type`]
    /// applies.
    pub fn apply_record(&mut self, record: RotorRecord) -> Result<(), PersistError> {
        let aircraft_type = AircraftType::from_code(f64::from(record.aircraft_type))?;
        let cantilever = check_index(
            "rotor_mat",
            record.rotor_mat,
            self.catalog.cantilevers().len(),
        )?;
        if !record.rotor_span.is_finite() || record.rotor_span < 0.0 {
            return Err(PersistError::invalid("rotor_span", record.rotor_span));
        }

        let mut next = self.clone();
        next.aircraft_type = aircraft_type;
        next.rotor_count = record.rotor_count;
        next.rotor_span = record.rotor_span;
        next.cantilever = cantilever;
        next.is_tandem = record.is_tandem;
        next.accessory = record.accessory;
        next.verify_sizes();
        next.touch();

        *self = next;
        Ok(())
    }
}

impl Part for Rotor {
    fn kind(&self) -> PartKind {
        PartKind::Rotor
    }

    fn part_stats(&self) -> Stats {
        Rotor::part_stats(self)
    }

    fn revision(&self) -> Revision {
        self.revision
    }

    fn to_json(&self) -> Result<Value, PersistError> {
        Ok(serde_json::to_value(self.record())?)
    }

    fn from_json(&mut self, value: &Value, _version: FormatVersion) -> Result<(), PersistError> {
        let record = RotorRecord::deserialize(value)?;
        self.apply_record(record)
    }

    fn serialize(&self, out: &mut StreamWriter) {
        out.push_num(f64::from(self.aircraft_type.code()));
        out.push_num(f64::from(self.rotor_count));
        out.push_num(self.rotor_span);
        out.push_num(self.cantilever as f64);
        out.push_bool(self.is_tandem);
        out.push_bool(self.accessory);
    }

    fn deserialize(&mut self, input: &mut StreamReader) -> Result<(), PersistError> {
        let aircraft_type = AircraftType::from_code(input.read_num()?)?;
        let record = RotorRecord {
            aircraft_type: aircraft_type.code(),
            rotor_count: input.read_count("rotor_count")?,
            rotor_span: input.read_num()?,
            rotor_mat: input.read_index("rotor_mat")?,
            is_tandem: input.read_bool()?,
            accessory: input.read_bool()?,
        };
        self.apply_record(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CantileverMaterial;

    fn rotor() -> Rotor {
        let catalog = RotorCatalog::new(vec![
            CantileverMaterial {
                name: "Wood".into(),
                limited: false,
                stats: Stats {
                    mass: 1.0,
                    cost: 1.0,
                    max_strain: 10.0,
                    toughness: 5.0,
                    ..Stats::default()
                },
            },
            CantileverMaterial {
                name: "Steel".into(),
                limited: false,
                stats: Stats {
                    mass: 2.0,
                    cost: 3.0,
                    max_strain: 30.0,
                    ..Stats::default()
                },
            },
        ])
        .unwrap();
        Rotor::new(Arc::new(catalog), &DesignConfig::default())
    }

    #[test]
    fn fixed_wing_has_no_rotor() {
        let mut rotor = rotor();
        rotor.set_rotor_span(12.0);
        rotor.set_rotor_count(4.0);
        assert_eq!(rotor.rotor_count(), 0);
        assert_eq!(rotor.rotor_span(), 0.0);
        assert!(rotor.part_stats().is_empty());
    }

    #[test]
    fn odd_counts_snap_in_the_direction_of_travel() {
        let mut rotor = rotor();
        rotor.set_type(AircraftType::Helicopter);
        assert_eq!(rotor.rotor_count(), 1);

        rotor.set_rotor_count(2.0);
        assert_eq!(rotor.rotor_count(), 2);
        rotor.set_rotor_count(3.0);
        assert_eq!(rotor.rotor_count(), 4);
        rotor.set_rotor_count(3.0);
        assert_eq!(rotor.rotor_count(), 2);
        rotor.set_rotor_count(7.0);
        assert_eq!(rotor.rotor_count(), 6);
        rotor.set_rotor_count(-3.0);
        assert_eq!(rotor.rotor_count(), 1);
    }

    #[test]
    fn tandem_needs_several_helicopter_rotors() {
        let mut rotor = rotor();
        rotor.set_type(AircraftType::Helicopter);
        rotor.set_tandem(true);
        assert!(!rotor.tandem());

        rotor.set_rotor_count(2.0);
        rotor.set_tandem(true);
        assert!(rotor.tandem());
        assert_eq!(rotor.part_stats().pitch_stab, 4.0);

        rotor.set_rotor_count(1.0);
        assert!(!rotor.tandem());
    }

    #[test]
    fn category_change_resets_dependents() {
        let mut rotor = rotor();
        rotor.set_type(AircraftType::Helicopter);
        rotor.set_rotor_count(4.0);
        rotor.set_cantilever(1).unwrap();
        rotor.set_accessory(true);

        rotor.set_type(AircraftType::Autogyro);
        assert_eq!(rotor.rotor_count(), 1);
        assert_eq!(rotor.cantilever(), 0);
        assert!(!rotor.accessory());
        assert!(!rotor.tandem());
        assert_eq!(rotor.pitch(), None);
    }

    #[test]
    fn autogyro_span_follows_wing_area() {
        let mut rotor = rotor();
        rotor.set_type(AircraftType::Autogyro);
        rotor.set_wing_area(30.0);
        // sqrt(0.6 * 30 / (pi / 8)) = 6.77
        assert_eq!(rotor.sizing_span(), 7.0);
        assert_eq!(rotor.rotor_span(), 7.0);

        rotor.set_rotor_span(3.0);
        assert_eq!(rotor.rotor_span(), 7.0);
        rotor.set_rotor_span(9.0);
        assert_eq!(rotor.rotor_span(), 9.0);
    }

    #[test]
    fn helicopter_sizing_uses_mass_and_pitch() {
        let mut rotor = rotor();
        rotor.set_type(AircraftType::Helicopter);
        rotor.set_dry_mass(32.0);
        rotor.set_pitch(Some(3));
        // 32^(1/2.5) = 4, times 5 for a single rotor
        assert_eq!(rotor.sizing_span(), 20.0);

        rotor.set_rotor_count(2.0);
        assert_eq!(rotor.sizing_span(), 16.0);

        rotor.set_pitch(Some(9));
        assert_eq!(rotor.pitch(), None);
        assert!(rotor.sizing_span() > 1000.0);
    }

    #[test]
    fn oversized_helicopter_rotor_costs_reliability() {
        let mut rotor = rotor();
        rotor.set_type(AircraftType::Helicopter);
        rotor.set_dry_mass(32.0);
        rotor.set_pitch(Some(3));

        rotor.set_rotor_span(18.0);
        assert_eq!(rotor.part_stats().reliability, 0.0);
        rotor.set_rotor_span(23.0);
        assert_eq!(rotor.part_stats().reliability, -3.0);
    }

    #[test]
    fn strain_is_covered_by_whole_increments() {
        let mut rotor = rotor();
        rotor.set_type(AircraftType::Helicopter);
        rotor.set_rotor_span(4.0);
        // area = 2pi = 6.28; strain = max(1, 8 + 6.28 - 10) = 4.28 -> one increment
        let stats = rotor.part_stats();
        assert_eq!(stats.mass, 1.0);
        assert_eq!(stats.cost, 1.0);
        assert_eq!(stats.max_strain, 0.0);
        assert_eq!(stats.toughness, 0.0);
        assert_eq!(stats.drag, floor_eps(6.0 * disc_area(4.0).powi(2) / 16.0));

        rotor.set_rotor_span(10.0);
        // area = 39.27; strain = 49.27 -> five wood increments
        assert_eq!(rotor.part_stats().mass, 5.0);
    }

    #[test]
    fn cantilever_loop_is_bounded() {
        let catalog = RotorCatalog::new(vec![CantileverMaterial {
            name: "Paper".into(),
            limited: false,
            stats: Stats {
                mass: 1.0,
                max_strain: 0.001,
                ..Stats::default()
            },
        }])
        .unwrap();
        let config = DesignConfig {
            max_cantilever_increments: 16,
            ..DesignConfig::default()
        };
        let mut rotor = Rotor::new(Arc::new(catalog), &config);
        rotor.set_type(AircraftType::Helicopter);
        rotor.set_rotor_span(40.0);
        assert_eq!(rotor.part_stats().mass, 16.0);
    }

    #[test]
    fn out_of_range_cantilever_is_an_error() {
        let mut rotor = rotor();
        assert_eq!(
            rotor.set_cantilever(2),
            Err(PartError::IndexOutOfRange {
                table: "cantilever",
                index: 2,
                len: 2
            })
        );
    }

    #[test]
    fn context_setters_only_bump_on_change() {
        let mut rotor = rotor();
        rotor.set_dry_mass(10.0);
        let before = Part::revision(&rotor);
        rotor.set_dry_mass(10.0);
        rotor.set_wing_area(0.0);
        assert_eq!(Part::revision(&rotor), before);
        rotor.set_wing_area(12.0);
        assert!(Part::revision(&rotor) > before);
    }

    #[test]
    fn round_trips_through_both_encodings() {
        let mut rotor = rotor();
        rotor.set_type(AircraftType::Helicopter);
        rotor.set_rotor_count(2.0);
        rotor.set_rotor_span(9.0);
        rotor.set_tandem(true);
        rotor.set_cantilever(1).unwrap();

        let json = rotor.to_json().unwrap();
        assert_eq!(json["type"], 1);
        assert_eq!(json["rotor_mat"], 1);

        let mut from_json = self::rotor();
        from_json.from_json(&json, FormatVersion::CURRENT).unwrap();
        assert_eq!(from_json.record(), rotor.record());
        assert_eq!(from_json.part_stats(), rotor.part_stats());

        let mut out = StreamWriter::new(FormatVersion::CURRENT);
        rotor.serialize(&mut out);
        let mut input = out.into_reader();
        let mut from_stream = self::rotor();
        from_stream.deserialize(&mut input).unwrap();
        input.finish().unwrap();
        assert_eq!(from_stream.record(), rotor.record());
    }

    #[test]
    fn bad_saves_leave_rotor_untouched() {
        let mut rotor = rotor();
        rotor.set_type(AircraftType::Helicopter);
        let before = rotor.record();

        let bad = serde_json::json!({
            "type": 1, "rotor_count": 1, "rotor_span": 5.0,
            "rotor_mat": 9, "is_tandem": false, "accessory": false
        });
        assert!(matches!(
            rotor.from_json(&bad, FormatVersion::CURRENT),
            Err(PersistError::InvalidValue { field: "rotor_mat", .. })
        ));
        assert_eq!(rotor.record(), before);
    }
}
