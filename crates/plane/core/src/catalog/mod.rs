//! Archetype tables supplied by the host.
//!
//! Catalogs are validated once when built and never change afterwards. Parts
//! hold them behind [`Arc`] so a whole design session shares one copy.

pub mod engine;
pub mod rotor;
pub mod wings;

use std::sync::Arc;

pub use engine::{
    CoolingClasses, CowlType, EngineArchetype, EngineCatalog, EngineCatalogData, MountRole,
    MountType, PushPullKind, PushPullLinkage,
};
pub use rotor::{CantileverMaterial, RotorCatalog, RotorCatalogData};
pub use wings::{
    DeckType, LongestWingBonus, SkinType, StaggerLayout, WingCatalog, WingCatalogData, WingDeck,
};

use crate::error::{ErrorSeverity, PlaneError};

/// A table the parts cannot be built from.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("{0} table is empty")]
    EmptyTable(&'static str),

    #[error("mount '{mount}' uses {kind} push-pull but no linkage is defined for it")]
    MissingLinkage { mount: String, kind: PushPullKind },

    #[error("longest-wing table has {longest} rows for {decks} decks")]
    LongestTableTooShort { longest: usize, decks: usize },

    #[error("cantilever material '{material}' covers no strain")]
    NonPositiveStrain { material: String },
}

impl PlaneError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyTable(_) => "CATALOG_EMPTY_TABLE",
            Self::MissingLinkage { .. } => "CATALOG_MISSING_LINKAGE",
            Self::LongestTableTooShort { .. } => "CATALOG_LONGEST_TABLE_TOO_SHORT",
            Self::NonPositiveStrain { .. } => "CATALOG_NON_POSITIVE_STRAIN",
        }
    }
}

/// The three catalogs a full design needs.
#[derive(Clone, Debug)]
pub struct Catalogs {
    pub engine: Arc<EngineCatalog>,
    pub wings: Arc<WingCatalog>,
    pub rotor: Arc<RotorCatalog>,
}

impl Catalogs {
    pub fn new(engine: EngineCatalog, wings: WingCatalog, rotor: RotorCatalog) -> Self {
        Self {
            engine: Arc::new(engine),
            wings: Arc::new(wings),
            rotor: Arc::new(rotor),
        }
    }
}
