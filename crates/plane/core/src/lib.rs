//! Rules and stat derivation for aircraft part models.
//!
//! `plane-core` owns the engine, rotor and wing part models: their archetype
//! catalogs, the invariants each part keeps while it is edited, the stat
//! vector each part derives, and both save encodings. Parts are plain owned
//! values; a host (see [`assembly::PartAssembly`]) pushes cross-part context
//! into them and sums their [`Stats`] into a design total.
pub mod assembly;
pub mod catalog;
pub mod config;
pub mod error;
pub mod parts;
pub mod persist;
pub mod rounding;
pub mod stats;

pub use assembly::{DesignSave, PartAssembly};
pub use catalog::{
    CantileverMaterial, CatalogError, Catalogs, CoolingClasses, CowlType, DeckType,
    EngineArchetype, EngineCatalog, EngineCatalogData, LongestWingBonus, MountRole, MountType,
    PushPullKind, PushPullLinkage, RotorCatalog, RotorCatalogData, SkinType, StaggerLayout,
    WingCatalog, WingCatalogData, WingDeck,
};
pub use config::DesignConfig;
pub use error::{ErrorSeverity, PlaneError};
pub use parts::{
    AircraftType, Engine, EngineRecord, EngineSelection, Part, PartError, PartKind,
    PropellerMount, Revision, Rotor, RotorRecord, Sesquiplane, Spinner, WingSegment, Wings,
    WingsRecord,
};
pub use persist::{FormatVersion, Migrate, PersistError, Primitive, StreamReader, StreamWriter};
pub use stats::{EraNote, Stats};
