//! Engine part: archetype selection plus mounting and upgrade state.
//!
//! Setters keep the following true at all times:
//!
//! - `gear_reliability <= gear_count`
//! - `cooling <= max_cooling()`
//! - the cowl fits the engine's cooling class
//! - torque-to-structure implies push-pull, a generator excludes an alternator
//! - a pulsejet has no cooling, push-pull, driveshafts, gearing or electrics,
//!   and never sits on a fuselage push-pull mount
//! - a mount that requires extended driveshafts has them (pulsejets excepted)

mod derive;
mod persist;

pub use persist::EngineRecord;

use std::sync::Arc;

use tracing::debug;

use super::{PartError, PartKind, Revision};
use crate::catalog::{
    CatalogError, EngineArchetype, EngineCatalog, MountRole, MountType, PushPullKind,
};
use crate::rounding::{floor_eps, sanitize_count};

/// Which engine the part is built around.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineSelection {
    /// Entry `index` of the engine table. `archetype` is the working copy
    /// after pulsejet/rumble normalisation.
    Catalog {
        index: usize,
        archetype: EngineArchetype,
    },
    /// An archetype supplied directly by the host.
    Custom(EngineArchetype),
}

impl EngineSelection {
    pub fn archetype(&self) -> &EngineArchetype {
        match self {
            Self::Catalog { archetype, .. } | Self::Custom(archetype) => archetype,
        }
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Catalog { index, .. } => Some(*index),
            Self::Custom(_) => None,
        }
    }
}

/// Normalises an archetype into the snapshot the engine works with.
///
/// Pulsejets get fixed overspeed and altitude and lose cooling and torque;
/// every other engine has no rumble.
pub(crate) fn working_snapshot(archetype: &EngineArchetype) -> EngineArchetype {
    let mut snapshot = archetype.clone();
    if snapshot.pulsejet {
        snapshot.stats.cooling = 0.0;
        snapshot.overspeed = 100.0;
        snapshot.altitude = 3.0;
        snapshot.torque = 0.0;
    } else {
        snapshot.rumble = 0.0;
    }
    snapshot
}

/// Weapon room in the propeller spinner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Spinner {
    pub gun: bool,
    pub artillery: bool,
}

/// Propeller position readout for one side of the airframe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PropellerMount {
    pub has: bool,
    pub spinner: Spinner,
}

#[derive(Clone, Debug)]
pub struct Engine {
    catalog: Arc<EngineCatalog>,
    selection: EngineSelection,
    cooling_count: u32,
    radiator: Option<usize>,
    num_radiators: u32,
    mount: usize,
    use_pushpull: bool,
    torque_to_struct: bool,
    use_driveshafts: bool,
    gear_count: u32,
    gear_reliability: u32,
    cowl: usize,
    is_generator: bool,
    has_alternator: bool,
    total_reliability: f64,
    revision: Revision,
}

impl Engine {
    /// Builds an engine around the first entry of the engine table.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyTable`] when the catalog has no engines.
    pub fn new(catalog: Arc<EngineCatalog>) -> Result<Self, CatalogError> {
        let first = catalog
            .engines()
            .first()
            .ok_or(CatalogError::EmptyTable("engines"))?;
        let archetype = working_snapshot(first);
        let cooling_count = sanitize_count(archetype.stats.cooling);

        let mut engine = Self {
            catalog,
            selection: EngineSelection::Catalog {
                index: 0,
                archetype,
            },
            cooling_count,
            radiator: (cooling_count > 0).then_some(0),
            num_radiators: 0,
            mount: 0,
            use_pushpull: false,
            torque_to_struct: false,
            use_driveshafts: false,
            gear_count: 0,
            gear_reliability: 0,
            cowl: 0,
            is_generator: false,
            has_alternator: false,
            total_reliability: 0.0,
            revision: Revision::default(),
        };
        engine.canonicalize();
        engine.verify_cowl(0);
        Ok(engine)
    }

    pub fn catalog(&self) -> &Arc<EngineCatalog> {
        &self.catalog
    }

    pub fn selection(&self) -> &EngineSelection {
        &self.selection
    }

    fn archetype(&self) -> &EngineArchetype {
        self.selection.archetype()
    }

    fn mount_type(&self) -> &MountType {
        &self.catalog.mounts()[self.mount]
    }

    fn touch(&mut self) {
        self.revision.bump(PartKind::Engine);
    }

    // ===== archetype =====

    /// Selects entry `index` of the engine table and resets cooling to the
    /// engine's full capacity.
    pub fn set_selected_index(&mut self, index: usize) -> Result<(), PartError> {
        let engines = self.catalog.engines();
        PartError::check("engine", index, engines.len())?;
        self.selection = EngineSelection::Catalog {
            index,
            archetype: working_snapshot(&engines[index]),
        };
        self.canonicalize();
        self.verify_cowl(self.cowl);
        self.cooling_count = sanitize_count(self.archetype().stats.cooling);
        self.touch();
        Ok(())
    }

    /// Table index of the selected engine, `None` for a custom engine.
    pub fn selected_index(&self) -> Option<usize> {
        self.selection.index()
    }

    /// Replaces the engine with a host-supplied archetype.
    ///
    /// An oil tank zeroes the cooling capacity. Current cooling is kept but
    /// clamped to the new capacity.
    pub fn set_custom_stats(&mut self, archetype: EngineArchetype) {
        let mut archetype = archetype;
        if archetype.oiltank {
            archetype.stats.cooling = 0.0;
        }
        self.selection = EngineSelection::Custom(working_snapshot(&archetype));
        self.canonicalize();
        self.cooling_count = self
            .cooling_count
            .min(sanitize_count(self.archetype().stats.cooling));
        self.verify_cowl(self.cowl);
        self.touch();
    }

    /// Working copy of the selected archetype.
    pub fn current_stats(&self) -> &EngineArchetype {
        self.archetype()
    }

    pub fn is_pulsejet(&self) -> bool {
        self.archetype().pulsejet
    }

    /// Forces the pulsejet state, or re-applies the driveshaft requirement of
    /// the current mount for any other engine.
    fn canonicalize(&mut self) {
        if !self.is_pulsejet() {
            if self.mount_type().req_ed {
                self.use_driveshafts = true;
            }
            return;
        }
        self.cooling_count = 0;
        self.use_pushpull = false;
        self.torque_to_struct = false;
        self.use_driveshafts = false;
        self.gear_count = 0;
        self.gear_reliability = 0;
        self.is_generator = false;
        self.has_alternator = false;
        if self.mount_type().pp_type == PushPullKind::Fuselage {
            let replacement = self
                .catalog
                .mounts()
                .iter()
                .position(|m| m.pp_type != PushPullKind::Fuselage);
            if let Some(mount) = replacement {
                debug!(from = self.mount, to = mount, "pulsejet moved off fuselage mount");
                self.mount = mount;
            }
        }
    }

    // ===== cooling =====

    pub fn set_cooling(&mut self, count: f64) {
        self.cooling_count = sanitize_count(count).min(self.max_cooling());
        self.touch();
    }

    pub fn cooling(&self) -> u32 {
        self.cooling_count
    }

    /// Cooling capacity; doubled by push-pull.
    pub fn max_cooling(&self) -> u32 {
        let base = sanitize_count(self.archetype().stats.cooling);
        if self.use_pushpull {
            base.saturating_mul(2)
        } else {
            base
        }
    }

    pub fn needs_cooling(&self) -> bool {
        self.cooling_count > 0
    }

    /// True when the engine runs with less cooling than its archetype wants.
    pub fn warn_cooling_reliability(&self) -> bool {
        f64::from(self.cooling_count) < self.archetype().stats.cooling
    }

    /// Number of radiators the host offers; clamps the selected radiator.
    pub fn set_num_radiators(&mut self, count: f64) {
        self.num_radiators = sanitize_count(count);
        let radiator = self.clamp_radiator(self.radiator);
        if radiator != self.radiator {
            self.radiator = radiator;
            self.touch();
        }
    }

    pub fn num_radiators(&self) -> u32 {
        self.num_radiators
    }

    pub fn set_radiator(&mut self, radiator: Option<usize>) {
        self.radiator = self.clamp_radiator(radiator);
        self.touch();
    }

    pub fn radiator(&self) -> Option<usize> {
        self.radiator
    }

    fn clamp_radiator(&self, radiator: Option<usize>) -> Option<usize> {
        let count = self.num_radiators as usize;
        match radiator {
            _ if count == 0 => None,
            None => Some(0),
            Some(index) => Some(index.min(count - 1)),
        }
    }

    // ===== mounting =====

    pub fn set_mount_index(&mut self, index: usize) -> Result<(), PartError> {
        PartError::check("mount", index, self.catalog.mounts().len())?;
        self.mount = index;
        self.canonicalize();
        self.verify_cowl(self.cowl);
        self.touch();
        Ok(())
    }

    /// Selected mount, `None` for pulsejets (which are bolted on).
    pub fn mount_index(&self) -> Option<usize> {
        (!self.is_pulsejet()).then_some(self.mount)
    }

    pub fn requires_extended_driveshafts(&self) -> bool {
        self.mount_type().req_ed
    }

    /// Mounts that need tail modifications fall back to extended driveshafts
    /// when the airframe has neither a forward boom nor a swing rear.
    pub fn set_tail_mods(&mut self, forward_boom: bool, swing_rear: bool) {
        if self.mount_type().req_tail && !(forward_boom || swing_rear) && !self.is_pulsejet() {
            self.use_driveshafts = true;
        }
        self.touch();
    }

    /// Enables push-pull, doubling current cooling (halving it when turned
    /// off). Pulsejets cannot run push-pull.
    pub fn set_use_pushpull(&mut self, use_pushpull: bool) {
        let use_pushpull = use_pushpull && !self.is_pulsejet();
        if use_pushpull != self.use_pushpull {
            self.use_pushpull = use_pushpull;
            if use_pushpull {
                self.cooling_count = self.cooling_count.saturating_mul(2);
            } else {
                self.cooling_count /= 2;
                self.torque_to_struct = false;
            }
        }
        self.touch();
    }

    pub fn use_pushpull(&self) -> bool {
        self.use_pushpull
    }

    pub fn set_use_extended_driveshaft(&mut self, use_driveshafts: bool) {
        self.use_driveshafts =
            (use_driveshafts || self.requires_extended_driveshafts()) && !self.is_pulsejet();
        self.touch();
    }

    pub fn use_extended_driveshaft(&self) -> bool {
        self.use_driveshafts
    }

    pub fn set_torque_to_struct(&mut self, use_struct: bool) {
        self.torque_to_struct = use_struct && self.use_pushpull;
        self.touch();
    }

    pub fn torque_to_struct(&self) -> bool {
        self.torque_to_struct
    }

    /// Routing torque into structure needs a wing push-pull with torque.
    pub fn can_torque_to_struct(&self) -> bool {
        self.use_pushpull
            && self.archetype().torque > 0.0
            && self.mount_type().pp_type == PushPullKind::Wing
    }

    /// Wing-mounted tractor: a wing mount without push-pull.
    pub fn is_tractor_nacelle(&self) -> bool {
        !self.is_pulsejet() && !self.use_pushpull && self.mount_type().pp_type == PushPullKind::Wing
    }

    pub fn has_propeller(&self) -> bool {
        !self.is_pulsejet()
    }

    pub fn tractor(&self) -> PropellerMount {
        PropellerMount {
            has: self.mount_type().role.is_tractor(),
            spinner: self.spinner(),
        }
    }

    pub fn pusher(&self) -> PropellerMount {
        PropellerMount {
            has: self.mount_type().role.is_pusher(),
            spinner: self.spinner(),
        }
    }

    /// A geared propeller leaves the hub free. A center mount on extended
    /// driveshafts takes artillery; rotaries have no room otherwise.
    fn spinner(&self) -> Spinner {
        if self.gear_count == 0 {
            return Spinner::default();
        }
        if self.use_driveshafts && self.mount_type().role.is_center() {
            Spinner {
                gun: true,
                artillery: true,
            }
        } else if !self.archetype().oiltank {
            Spinner {
                gun: true,
                artillery: false,
            }
        } else {
            Spinner::default()
        }
    }

    /// Height class of the engine relative to the wing: 2 for pods and
    /// pulsejets, 1 for offset nacelles, 0 for inside nacelles and channel
    /// tractors. `None` for engines in the fuselage line.
    pub fn engine_height(&self) -> Option<u8> {
        if self.is_pulsejet() {
            return Some(2);
        }
        match self.mount_type().role {
            MountRole::Pod => Some(2),
            MountRole::NacelleOffset => Some(1),
            MountRole::NacelleInside | MountRole::ChannelTractor => Some(0),
            _ => None,
        }
    }

    // ===== gearing =====

    pub fn set_gear_count(&mut self, count: f64) {
        self.gear_count = if self.is_pulsejet() {
            0
        } else {
            sanitize_count(count)
        };
        self.gear_reliability = self.gear_reliability.min(self.gear_count);
        self.touch();
    }

    pub fn gear_count(&self) -> u32 {
        self.gear_count
    }

    /// Rated gears, never more than the gear count.
    pub fn set_gear_reliability(&mut self, count: f64) {
        self.gear_reliability = sanitize_count(count).min(self.gear_count);
        self.touch();
    }

    pub fn gear_reliability(&self) -> u32 {
        self.gear_reliability
    }

    // ===== cowl =====

    pub fn set_cowl(&mut self, index: usize) {
        self.verify_cowl(index);
        self.touch();
    }

    pub fn cowl(&self) -> usize {
        self.cowl
    }

    /// For each cowl in the table, whether it fits the current engine.
    pub fn cowl_enabled(&self) -> Vec<bool> {
        let archetype = self.archetype();
        self.catalog
            .cowls()
            .iter()
            .map(|cowl| archetype.accepts(cowl))
            .collect()
    }

    /// Takes `requested` if it fits, otherwise keeps the current cowl if that
    /// still fits, otherwise falls back to cowl 0.
    fn verify_cowl(&mut self, requested: usize) {
        let enabled = self.cowl_enabled();
        if enabled.get(requested).copied().unwrap_or(false) {
            self.cowl = requested;
        } else if !enabled.get(self.cowl).copied().unwrap_or(false) {
            debug!(cowl = self.cowl, "cowl no longer fits engine, falling back to 0");
            self.cowl = 0;
        }
    }

    // ===== electrics =====

    pub fn generator_enabled(&self) -> bool {
        !self.is_pulsejet()
    }

    pub fn set_generator(&mut self, use_generator: bool) {
        self.is_generator = use_generator && self.generator_enabled();
        if self.is_generator {
            self.has_alternator = false;
        }
        self.touch();
    }

    pub fn generator(&self) -> bool {
        self.is_generator
    }

    pub fn alternator_enabled(&self) -> bool {
        !self.is_pulsejet() && !self.is_generator
    }

    pub fn set_alternator(&mut self, use_alternator: bool) {
        self.has_alternator = use_alternator && self.alternator_enabled();
        self.touch();
    }

    pub fn alternator(&self) -> bool {
        self.has_alternator
    }

    pub fn is_electrics(&self) -> bool {
        self.has_alternator || self.is_generator
    }

    // ===== performance =====

    /// Overspeed, raised by half the base value per gear.
    pub fn overspeed(&self) -> f64 {
        let base = self.archetype().overspeed;
        base + floor_eps(f64::from(self.gear_count) * base / 2.0)
    }

    pub fn max_altitude(&self) -> f64 {
        self.archetype().altitude
    }

    pub fn rumble(&self) -> f64 {
        self.archetype().rumble
    }

    pub fn reliability(&self) -> f64 {
        self.total_reliability
    }
}
