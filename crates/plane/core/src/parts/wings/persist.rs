//! Wing save formats, including the pre-gull segment shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{WingSegment, Wings};
use crate::parts::{Part, PartKind, Revision};
use crate::persist::{FormatVersion, Migrate, PersistError, StreamReader, StreamWriter, check_index};
use crate::stats::Stats;

/// Structured wing save.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WingsRecord {
    pub wing_list: Vec<WingSegment>,
    pub mini_wing_list: Vec<WingSegment>,
    pub wing_stagger: usize,
    pub is_swept: bool,
    pub is_closed: bool,
}

/// Wing segment as written by saves that predate gull wings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegacyWingSegment {
    pub surface: usize,
    pub area: f64,
    pub span: f64,
    pub dihedral: f64,
    pub anhedral: f64,
    pub deck: usize,
}

impl Migrate for LegacyWingSegment {
    type Next = WingSegment;

    fn migrate(self) -> WingSegment {
        WingSegment {
            surface: self.surface,
            area: self.area,
            span: self.span,
            dihedral: self.dihedral,
            anhedral: self.anhedral,
            gull: false,
            deck: self.deck,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegacyWingsRecord {
    pub wing_list: Vec<LegacyWingSegment>,
    pub mini_wing_list: Vec<LegacyWingSegment>,
    pub wing_stagger: usize,
    pub is_swept: bool,
    pub is_closed: bool,
}

impl Migrate for LegacyWingsRecord {
    type Next = WingsRecord;

    fn migrate(self) -> WingsRecord {
        WingsRecord {
            wing_list: self.wing_list.into_iter().map(Migrate::migrate).collect(),
            mini_wing_list: self.mini_wing_list.into_iter().map(Migrate::migrate).collect(),
            wing_stagger: self.wing_stagger,
            is_swept: self.is_swept,
            is_closed: self.is_closed,
        }
    }
}

fn write_segments(out: &mut StreamWriter, segments: &[WingSegment]) {
    let gull = out.version().has_gull_wings();
    out.push_num(segments.len() as f64);
    for segment in segments {
        out.push_num(segment.surface as f64);
        out.push_num(segment.area);
        out.push_num(segment.span);
        out.push_num(segment.dihedral);
        out.push_num(segment.anhedral);
        if gull {
            out.push_bool(segment.gull);
        }
        out.push_num(segment.deck as f64);
    }
}

fn read_segments(
    input: &mut StreamReader,
    field: &'static str,
) -> Result<Vec<WingSegment>, PersistError> {
    let gull = input.version().has_gull_wings();
    let count = input.read_index(field)?;
    let mut segments = Vec::new();
    for _ in 0..count {
        segments.push(WingSegment {
            surface: input.read_index("surface")?,
            area: input.read_num()?,
            span: input.read_num()?,
            dihedral: input.read_num()?,
            anhedral: input.read_num()?,
            gull: if gull { input.read_bool()? } else { false },
            deck: input.read_index("deck")?,
        });
    }
    Ok(segments)
}

impl Wings {
    pub fn record(&self) -> WingsRecord {
        WingsRecord {
            wing_list: self.wing_list.clone(),
            mini_wing_list: self.mini_wing_list.clone(),
            wing_stagger: self.stagger,
            is_swept: self.is_swept,
            is_closed: self.is_closed,
        }
    }

    fn check_segment(&self, segment: &WingSegment) -> Result<(), PersistError> {
        check_index("surface", segment.surface, self.catalog.skins().len())?;
        check_index("deck", segment.deck, self.catalog.decks().len())?;
        Ok(())
    }

    /// Replaces the wing state with a decoded record.
    ///
    /// Indices are checked against the live catalog. The lists are then
    /// brought back in line with the deck and layout rules: dimensions are
    /// sanitised, the saved layout is applied (dropping wings it cannot hold
    /// or that crowd a limited deck) and miniature wings on occupied decks
    /// are dropped.
    pub fn apply_record(&mut self, record: WingsRecord) -> Result<(), PersistError> {
        for segment in record.wing_list.iter().chain(&record.mini_wing_list) {
            self.check_segment(segment)?;
        }
        let stagger = check_index(
            "wing_stagger",
            record.wing_stagger,
            self.catalog.staggers().len(),
        )?;

        let mut next = self.clone();
        next.wing_list = record
            .wing_list
            .into_iter()
            .map(WingSegment::sanitized_full)
            .collect();
        next.mini_wing_list = Vec::new();
        next.is_swept = record.is_swept;
        next.is_closed = record.is_closed;
        next.stagger = stagger;
        next.apply_stagger(next.stagger_for(next.wing_list.len()));
        next.prune_shared_decks(true);

        let wing_list = next.wing_list.clone();
        for segment in record.mini_wing_list {
            let segment = segment.sanitized_mini();
            if next.mini_wing_fits(&wing_list, &next.mini_wing_list, segment.deck) {
                next.mini_wing_list.push(segment);
            }
        }

        next.normalize_stagger();
        next.revalidate_flags();
        next.revision = self.revision;
        next.touch();

        *self = next;
        Ok(())
    }
}

impl Part for Wings {
    fn kind(&self) -> PartKind {
        PartKind::Wings
    }

    fn part_stats(&self) -> Stats {
        Wings::part_stats(self)
    }

    fn revision(&self) -> Revision {
        self.revision
    }

    fn to_json(&self) -> Result<Value, PersistError> {
        Ok(serde_json::to_value(self.record())?)
    }

    fn from_json(&mut self, value: &Value, version: FormatVersion) -> Result<(), PersistError> {
        let record = if version.has_gull_wings() {
            WingsRecord::deserialize(value)?
        } else {
            LegacyWingsRecord::deserialize(value)?.migrate()
        };
        self.apply_record(record)
    }

    fn serialize(&self, out: &mut StreamWriter) {
        write_segments(out, &self.wing_list);
        write_segments(out, &self.mini_wing_list);
        out.push_num(self.stagger as f64);
        out.push_bool(self.is_swept);
        out.push_bool(self.is_closed);
    }

    fn deserialize(&mut self, input: &mut StreamReader) -> Result<(), PersistError> {
        let record = WingsRecord {
            wing_list: read_segments(input, "wing_list")?,
            mini_wing_list: read_segments(input, "mini_wing_list")?,
            wing_stagger: input.read_index("wing_stagger")?,
            is_swept: input.read_bool()?,
            is_closed: input.read_bool()?,
        };
        self.apply_record(record)
    }
}
