//! Engine, mount, push-pull and cowl archetype tables.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::CatalogError;
use crate::persist::{PersistError, StreamReader, StreamWriter};
use crate::stats::Stats;

/// Which airframe structure a mount routes push-pull torque into.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PushPullKind {
    /// Torque shows up as lateral instability.
    Fuselage,
    /// Torque loads the wing spar.
    Wing,
}

/// Where a mount places the engine relative to the airframe.
///
/// Drives the propeller and engine-height readouts; mounts without a special
/// placement use [`MountRole::Other`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MountRole {
    #[default]
    Other,
    Tractor,
    CenterTractor,
    ChannelTractor,
    Pusher,
    CenterPusher,
    Pod,
    NacelleOffset,
    NacelleInside,
}

impl MountRole {
    /// Front-mounted propeller, including the center-mounted tractor. The
    /// channel tractor is not counted.
    pub const fn is_tractor(self) -> bool {
        matches!(self, Self::Tractor | Self::CenterTractor)
    }

    pub const fn is_pusher(self) -> bool {
        matches!(self, Self::Pusher | Self::CenterPusher)
    }

    /// Engine sits mid-fuselage and drives the propeller through a shaft.
    pub const fn is_center(self) -> bool {
        matches!(self, Self::CenterTractor | Self::CenterPusher)
    }
}

bitflags! {
    /// Engine cooling classes a cowl can be fitted to.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct CoolingClasses: u8 {
        const AIR    = 1 << 0;
        const LIQUID = 1 << 1;
        const ROTARY = 1 << 2;
    }
}

/// One selectable engine type.
///
/// The same shape doubles as a custom engine snapshot supplied directly by the
/// host, so every field is public and plain data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineArchetype {
    pub name: String,
    pub stats: Stats,
    pub overspeed: f64,
    pub altitude: f64,
    pub torque: f64,
    pub rumble: f64,
    pub oiltank: bool,
    pub pulsejet: bool,
}

impl EngineArchetype {
    /// Cowl classes this engine accepts.
    ///
    /// Pulsejets take only a cowl that fits every class (the "no cowl"
    /// entry). Anything needing coolant is liquid-cooled, an oil tank marks a
    /// rotary (which also takes air cowls), the rest are air-cooled.
    pub fn cooling_classes(&self) -> CoolingClasses {
        if self.pulsejet {
            CoolingClasses::all()
        } else if self.stats.cooling > 0.0 {
            CoolingClasses::LIQUID
        } else if self.oiltank {
            CoolingClasses::ROTARY | CoolingClasses::AIR
        } else {
            CoolingClasses::AIR
        }
    }

    /// Returns true if `cowl` can be fitted to this engine.
    pub fn accepts(&self, cowl: &CowlType) -> bool {
        if self.pulsejet {
            cowl.fits.is_all()
        } else {
            cowl.fits.intersects(self.cooling_classes())
        }
    }

    pub fn serialize(&self, out: &mut StreamWriter) {
        out.push_str(&self.name);
        self.stats.serialize(out);
        out.push_num(self.overspeed);
        out.push_num(self.altitude);
        out.push_num(self.torque);
        out.push_num(self.rumble);
        out.push_bool(self.oiltank);
        out.push_bool(self.pulsejet);
    }

    pub fn deserialize(input: &mut StreamReader) -> Result<Self, PersistError> {
        Ok(Self {
            name: input.read_str()?,
            stats: Stats::deserialize(input)?,
            overspeed: input.read_num()?,
            altitude: input.read_num()?,
            torque: input.read_num()?,
            rumble: input.read_num()?,
            oiltank: input.read_bool()?,
            pulsejet: input.read_bool()?,
        })
    }
}

/// Where and how the engine is attached to the airframe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MountType {
    pub name: String,
    #[serde(default)]
    pub stats: Stats,
    /// Max strain lost per point of engine mass.
    pub strainfactor: f64,
    /// Drag added per point of engine mass.
    pub dragfactor: f64,
    pub pp_type: PushPullKind,
    /// Mount only works with extended driveshafts.
    #[serde(default)]
    pub req_ed: bool,
    /// Mount needs tail modifications (boom or swing rear).
    #[serde(default)]
    pub req_tail: bool,
    #[serde(default)]
    pub role: MountRole,
}

/// Push-pull linkage for one mount kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PushPullLinkage {
    pub kind: PushPullKind,
    pub name: String,
    pub powerfactor: f64,
}

/// Engine cowling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CowlType {
    pub name: String,
    #[serde(default)]
    pub stats: Stats,
    /// Drag efficiency: engine drag is scaled by this.
    pub ed: f64,
    /// Mass added per point of engine drag.
    pub mpd: f64,
    pub fits: CoolingClasses,
}

/// Raw engine tables as written in content files.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EngineCatalogData {
    pub engines: Vec<EngineArchetype>,
    pub mounts: Vec<MountType>,
    pub push_pull: Vec<PushPullLinkage>,
    pub cowls: Vec<CowlType>,
}

/// Validated, immutable engine tables.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineCatalog {
    engines: Vec<EngineArchetype>,
    mounts: Vec<MountType>,
    push_pull: Vec<PushPullLinkage>,
    cowls: Vec<CowlType>,
}

impl EngineCatalog {
    /// Builds the catalog.
    ///
    /// # Errors
    ///
    /// Fails when the engine, mount or cowl table is empty, or when a mount
    /// refers to a push-pull kind with no linkage entry.
    pub fn new(
        engines: Vec<EngineArchetype>,
        mounts: Vec<MountType>,
        push_pull: Vec<PushPullLinkage>,
        cowls: Vec<CowlType>,
    ) -> Result<Self, CatalogError> {
        if engines.is_empty() {
            return Err(CatalogError::EmptyTable("engines"));
        }
        if mounts.is_empty() {
            return Err(CatalogError::EmptyTable("mounts"));
        }
        if cowls.is_empty() {
            return Err(CatalogError::EmptyTable("cowls"));
        }
        for mount in &mounts {
            if !push_pull.iter().any(|link| link.kind == mount.pp_type) {
                return Err(CatalogError::MissingLinkage {
                    mount: mount.name.clone(),
                    kind: mount.pp_type,
                });
            }
        }
        Ok(Self {
            engines,
            mounts,
            push_pull,
            cowls,
        })
    }

    pub fn engines(&self) -> &[EngineArchetype] {
        &self.engines
    }

    pub fn mounts(&self) -> &[MountType] {
        &self.mounts
    }

    pub fn push_pull(&self) -> &[PushPullLinkage] {
        &self.push_pull
    }

    pub fn cowls(&self) -> &[CowlType] {
        &self.cowls
    }

    /// Linkage used when a mount of `kind` runs push-pull.
    pub fn linkage(&self, kind: PushPullKind) -> Option<&PushPullLinkage> {
        self.push_pull.iter().find(|link| link.kind == kind)
    }
}

impl TryFrom<EngineCatalogData> for EngineCatalog {
    type Error = CatalogError;

    fn try_from(data: EngineCatalogData) -> Result<Self, Self::Error> {
        Self::new(data.engines, data.mounts, data.push_pull, data.cowls)
    }
}
