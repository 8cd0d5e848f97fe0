//! Wing skins, stagger layouts, decks and the longest-wing bonus table.

use serde::{Deserialize, Serialize};

use super::CatalogError;
use crate::stats::Stats;

/// Named vertical positions, in deck-table order.
///
/// Decks are stored on segments as plain table indices; these variants name
/// the positions the wing rules single out.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::FromRepr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(usize)]
pub enum WingDeck {
    Parasol = 0,
    Shoulder = 1,
    Mid = 2,
    Low = 3,
    Gear = 4,
}

impl WingDeck {
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Wing covering material.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkinType {
    pub name: String,
    #[serde(default)]
    pub flammable: bool,
    /// Per unit of wing area.
    #[serde(default)]
    pub stats: Stats,
    pub strainfactor: f64,
    pub dragfactor: f64,
    #[serde(default)]
    pub metal: bool,
    #[serde(default)]
    pub transparent: bool,
}

/// Arrangement of multiple full wings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaggerLayout {
    pub name: String,
    /// Tandem layouts: wings may share a deck one behind the other.
    #[serde(default)]
    pub inline: bool,
    pub wing_count: usize,
    #[serde(default)]
    pub hstab: bool,
    #[serde(default)]
    pub stats: Stats,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeckType {
    pub name: String,
    /// Holds at most one full wing outside tandem layouts.
    #[serde(default)]
    pub limited: bool,
    #[serde(default)]
    pub stats: Stats,
}

/// Bonus for the dominant wing of a monoplane or sesquiplane, per deck.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LongestWingBonus {
    pub dragfactor: f64,
    #[serde(default)]
    pub stats: Stats,
}

/// Raw wing tables as written in content files.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WingCatalogData {
    pub skins: Vec<SkinType>,
    pub staggers: Vec<StaggerLayout>,
    pub decks: Vec<DeckType>,
    pub longest: Vec<LongestWingBonus>,
}

/// Validated, immutable wing tables.
#[derive(Clone, Debug, PartialEq)]
pub struct WingCatalog {
    skins: Vec<SkinType>,
    staggers: Vec<StaggerLayout>,
    decks: Vec<DeckType>,
    longest: Vec<LongestWingBonus>,
}

impl WingCatalog {
    /// Builds the catalog.
    ///
    /// # Errors
    ///
    /// Fails when the skin, stagger or deck table is empty, or when the
    /// longest-wing table has fewer rows than there are decks.
    pub fn new(
        skins: Vec<SkinType>,
        staggers: Vec<StaggerLayout>,
        decks: Vec<DeckType>,
        longest: Vec<LongestWingBonus>,
    ) -> Result<Self, CatalogError> {
        if skins.is_empty() {
            return Err(CatalogError::EmptyTable("skins"));
        }
        if staggers.is_empty() {
            return Err(CatalogError::EmptyTable("staggers"));
        }
        if decks.is_empty() {
            return Err(CatalogError::EmptyTable("decks"));
        }
        if longest.len() < decks.len() {
            return Err(CatalogError::LongestTableTooShort {
                longest: longest.len(),
                decks: decks.len(),
            });
        }
        Ok(Self {
            skins,
            staggers,
            decks,
            longest,
        })
    }

    pub fn skins(&self) -> &[SkinType] {
        &self.skins
    }

    pub fn staggers(&self) -> &[StaggerLayout] {
        &self.staggers
    }

    pub fn decks(&self) -> &[DeckType] {
        &self.decks
    }

    pub fn longest(&self) -> &[LongestWingBonus] {
        &self.longest
    }

    /// Layout picked when a design first gains a second full wing.
    pub fn default_multi_stagger(&self) -> usize {
        self.staggers.len() / 2
    }
}

impl TryFrom<WingCatalogData> for WingCatalog {
    type Error = CatalogError;

    fn try_from(data: WingCatalogData) -> Result<Self, Self::Error> {
        Self::new(data.skins, data.staggers, data.decks, data.longest)
    }
}
