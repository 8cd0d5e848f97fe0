//! Part assembly: the three part models wired together the way an aircraft
//! host wires them.
//!
//! Parts never talk to each other. The assembly pushes the cross-part context
//! (wing area into the rotor, rotor span and aircraft category into the wings,
//! summed mass into both) and sums the part stats into a design total. The
//! total is cached against the part revisions, so reading it after an edit
//! recomputes once and reading it again is free.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::catalog::{CatalogError, Catalogs};
use crate::config::DesignConfig;
use crate::parts::{Engine, Part, Revision, Rotor, Wings};
use crate::persist::{FormatVersion, PersistError, StreamReader, StreamWriter};
use crate::stats::Stats;

/// Structured save of a whole design.
///
/// Part entries stay untyped until the version is known, because older
/// versions use different part shapes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DesignSave {
    pub version: FormatVersion,
    pub engine: Value,
    pub rotor: Value,
    pub wings: Value,
}

#[derive(Clone, Debug)]
struct CachedTotal {
    revisions: [Revision; 3],
    stats: Stats,
}

#[derive(Clone, Debug)]
pub struct PartAssembly {
    config: DesignConfig,
    engine: Engine,
    rotor: Rotor,
    wings: Wings,
    cached: Option<CachedTotal>,
}

impl PartAssembly {
    /// Builds a design with every part at its default selection.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the engine table is empty.
    pub fn new(catalogs: &Catalogs, config: DesignConfig) -> Result<Self, CatalogError> {
        Ok(Self {
            engine: Engine::new(catalogs.engine.clone())?,
            rotor: Rotor::new(catalogs.rotor.clone(), &config),
            wings: Wings::new(catalogs.wings.clone()),
            config,
            cached: None,
        })
    }

    pub fn config(&self) -> &DesignConfig {
        &self.config
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn rotor(&self) -> &Rotor {
        &self.rotor
    }

    pub fn rotor_mut(&mut self) -> &mut Rotor {
        &mut self.rotor
    }

    pub fn wings(&self) -> &Wings {
        &self.wings
    }

    pub fn wings_mut(&mut self) -> &mut Wings {
        &mut self.wings
    }

    /// The parts in save order.
    pub fn parts(&self) -> [&dyn Part; 3] {
        [&self.engine, &self.rotor, &self.wings]
    }

    fn revisions(&self) -> [Revision; 3] {
        self.parts().map(|part| part.revision())
    }

    /// True when the cached total reflects every part's latest revision.
    pub fn is_current(&self) -> bool {
        self.cached
            .as_ref()
            .is_some_and(|cached| cached.revisions == self.revisions())
    }

    fn recompute(&mut self) -> CachedTotal {
        self.rotor.set_wing_area(self.wings.area());
        self.wings.set_rotor_span(self.rotor.rotor_span());
        self.wings.set_aircraft_type(self.rotor.aircraft_type());

        let engine = self.engine.part_stats();
        let wings = self.wings.part_stats();
        let dry_mass = engine.mass + wings.mass;
        self.rotor.set_dry_mass(dry_mass);
        let rotor = self.rotor.part_stats();
        self.wings.set_aircraft_mass(dry_mass + rotor.mass);
        self.engine.update_reliability(0.0);

        let stats = [engine, rotor, wings].into_iter().sum::<Stats>();
        debug!(
            power = stats.power,
            mass = stats.mass,
            drag = stats.drag,
            "design total recomputed"
        );
        CachedTotal {
            revisions: self.revisions(),
            stats,
        }
    }

    /// Pushes cross-part context and recomputes the design total.
    pub fn refresh(&mut self) -> &Stats {
        let cached = self.recompute();
        &self.cached.insert(cached).stats
    }

    /// Design total, recomputed only when a part changed since the last read.
    pub fn stats(&mut self) -> &Stats {
        let cached = match self.cached.take() {
            Some(cached) if cached.revisions == self.revisions() => cached,
            _ => self.recompute(),
        };
        &self.cached.insert(cached).stats
    }

    // ===== persistence =====

    pub fn to_save(&self) -> Result<DesignSave, PersistError> {
        Ok(DesignSave {
            version: self.config.save_version,
            engine: self.engine.to_json()?,
            rotor: self.rotor.to_json()?,
            wings: self.wings.to_json()?,
        })
    }

    pub fn to_json(&self) -> Result<Value, PersistError> {
        Ok(serde_json::to_value(self.to_save()?)?)
    }

    /// Loads a structured design. Either every part loads or none changes.
    pub fn from_json(&mut self, value: &Value) -> Result<(), PersistError> {
        let save = DesignSave::deserialize(value)?;
        self.load_save(&save)
    }

    pub fn load_save(&mut self, save: &DesignSave) -> Result<(), PersistError> {
        let mut engine = self.engine.clone();
        let mut rotor = self.rotor.clone();
        let mut wings = self.wings.clone();
        engine.from_json(&save.engine, save.version)?;
        rotor.from_json(&save.rotor, save.version)?;
        wings.from_json(&save.wings, save.version)?;
        self.commit(engine, rotor, wings);
        Ok(())
    }

    /// Writes the three part streams, engine first, into one framed buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PersistError> {
        let mut out = StreamWriter::new(self.config.save_version);
        for part in self.parts() {
            part.serialize(&mut out);
        }
        out.into_bytes()
    }

    /// Loads a binary design. Either every part loads or none changes.
    pub fn from_bytes(&mut self, bytes: &[u8]) -> Result<(), PersistError> {
        let mut input = StreamReader::from_bytes(bytes)?;
        let mut engine = self.engine.clone();
        let mut rotor = self.rotor.clone();
        let mut wings = self.wings.clone();
        engine.deserialize(&mut input)?;
        rotor.deserialize(&mut input)?;
        wings.deserialize(&mut input)?;
        input.finish()?;
        self.commit(engine, rotor, wings);
        Ok(())
    }

    fn commit(&mut self, engine: Engine, rotor: Rotor, wings: Wings) {
        self.engine = engine;
        self.rotor = rotor;
        self.wings = wings;
        self.cached = None;
    }
}
