//! Engine save formats.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Engine, EngineSelection, working_snapshot};
use crate::catalog::EngineArchetype;
use crate::parts::{Part, PartKind, Revision};
use crate::persist::{FormatVersion, PersistError, StreamReader, StreamWriter, check_index};
use crate::stats::Stats;

/// Structured engine save.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineRecord {
    pub selected_stats: EngineArchetype,
    pub cooling_count: u32,
    /// `-1` when no radiator is selected.
    pub radiator_index: i64,
    pub selected_mount: usize,
    pub use_pushpull: bool,
    pub pp_torque_to_struct: bool,
    pub use_driveshafts: bool,
    pub geared_propeller_ratio: u32,
    pub geared_propeller_reliability: u32,
    pub cowl_sel: usize,
    pub is_generator: bool,
    pub has_alternator: bool,
}

impl Engine {
    pub fn record(&self) -> EngineRecord {
        EngineRecord {
            selected_stats: self.archetype().clone(),
            cooling_count: self.cooling_count,
            radiator_index: self.radiator.map_or(-1, |index| index as i64),
            selected_mount: self.mount,
            use_pushpull: self.use_pushpull,
            pp_torque_to_struct: self.torque_to_struct,
            use_driveshafts: self.use_driveshafts,
            geared_propeller_ratio: self.gear_count,
            geared_propeller_reliability: self.gear_reliability,
            cowl_sel: self.cowl,
            is_generator: self.is_generator,
            has_alternator: self.has_alternator,
        }
    }

    /// Replaces the engine state with a decoded record.
    ///
    /// The table index is recovered by matching the saved archetype against
    /// the normalised catalog entries; no match yields a custom engine.
    /// Indices are checked against the live catalog and every invariant is
    /// re-established afterwards.
    pub fn apply_record(&mut self, record: EngineRecord) -> Result<(), PersistError> {
        let mount = check_index(
            "selected_mount",
            record.selected_mount,
            self.catalog.mounts().len(),
        )?;
        let cowl = check_index("cowl_sel", record.cowl_sel, self.catalog.cowls().len())?;
        let radiator = match record.radiator_index {
            -1 => None,
            index if index >= 0 => Some(index as usize),
            index => return Err(PersistError::invalid("radiator_index", index)),
        };

        let saved = record.selected_stats;
        let selection = self
            .catalog
            .engines()
            .iter()
            .position(|entry| working_snapshot(entry) == saved)
            .map_or_else(
                || EngineSelection::Custom(working_snapshot(&saved)),
                |index| EngineSelection::Catalog {
                    index,
                    archetype: working_snapshot(&saved),
                },
            );

        let mut next = self.clone();
        next.selection = selection;
        next.mount = mount;
        next.radiator = radiator;
        next.use_pushpull = record.use_pushpull;
        next.torque_to_struct = record.pp_torque_to_struct && record.use_pushpull;
        next.use_driveshafts = record.use_driveshafts;
        next.gear_count = record.geared_propeller_ratio;
        next.gear_reliability = record.geared_propeller_reliability.min(next.gear_count);
        next.is_generator = record.is_generator;
        next.has_alternator = record.has_alternator && !record.is_generator;
        next.canonicalize();
        next.cooling_count = record.cooling_count.min(next.max_cooling());
        next.cowl = cowl;
        next.verify_cowl(cowl);
        next.revision = self.revision;
        next.touch();

        *self = next;
        Ok(())
    }
}

impl Part for Engine {
    fn kind(&self) -> PartKind {
        PartKind::Engine
    }

    fn part_stats(&self) -> Stats {
        Engine::part_stats(self)
    }

    fn revision(&self) -> Revision {
        self.revision
    }

    fn to_json(&self) -> Result<Value, PersistError> {
        Ok(serde_json::to_value(self.record())?)
    }

    fn from_json(&mut self, value: &Value, _version: FormatVersion) -> Result<(), PersistError> {
        let record = EngineRecord::deserialize(value)?;
        self.apply_record(record)
    }

    fn serialize(&self, out: &mut StreamWriter) {
        self.archetype().serialize(out);
        out.push_num(f64::from(self.cooling_count));
        out.push_num(self.radiator.map_or(-1.0, |index| index as f64));
        out.push_num(self.mount as f64);
        out.push_bool(self.use_pushpull);
        out.push_bool(self.torque_to_struct);
        out.push_bool(self.use_driveshafts);
        out.push_num(f64::from(self.gear_count));
        out.push_num(f64::from(self.gear_reliability));
        out.push_num(self.cowl as f64);
        out.push_bool(self.is_generator);
        out.push_bool(self.has_alternator);
    }

    fn deserialize(&mut self, input: &mut StreamReader) -> Result<(), PersistError> {
        let selected_stats = EngineArchetype::deserialize(input)?;
        let cooling_count = input.read_count("cooling_count")?;
        let radiator_index = input
            .read_optional_index("radiator_index")?
            .map_or(-1, |index| index as i64);
        let record = EngineRecord {
            selected_stats,
            cooling_count,
            radiator_index,
            selected_mount: input.read_index("selected_mount")?,
            use_pushpull: input.read_bool()?,
            pp_torque_to_struct: input.read_bool()?,
            use_driveshafts: input.read_bool()?,
            geared_propeller_ratio: input.read_count("geared_propeller_ratio")?,
            geared_propeller_reliability: input.read_count("geared_propeller_reliability")?,
            cowl_sel: input.read_index("cowl_sel")?,
            is_generator: input.read_bool()?,
            has_alternator: input.read_bool()?,
        };
        self.apply_record(record)
    }
}
