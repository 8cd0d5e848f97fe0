//! Rotor cantilever materials.

use serde::{Deserialize, Serialize};

use super::CatalogError;
use crate::stats::Stats;

/// Material a rotor blade is built from.
///
/// Each increment of material covers `stats.max_strain` points of rotor
/// strain; the rest of its stats are paid once per increment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CantileverMaterial {
    pub name: String,
    #[serde(default)]
    pub limited: bool,
    pub stats: Stats,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RotorCatalogData {
    pub cantilevers: Vec<CantileverMaterial>,
}

/// Validated, immutable rotor tables.
#[derive(Clone, Debug, PartialEq)]
pub struct RotorCatalog {
    cantilevers: Vec<CantileverMaterial>,
}

impl RotorCatalog {
    /// # Errors
    ///
    /// Fails on an empty table or a material that covers no strain.
    pub fn new(cantilevers: Vec<CantileverMaterial>) -> Result<Self, CatalogError> {
        if cantilevers.is_empty() {
            return Err(CatalogError::EmptyTable("cantilevers"));
        }
        if let Some(bad) = cantilevers
            .iter()
            .find(|m| m.stats.max_strain.is_nan() || m.stats.max_strain <= 0.0)
        {
            return Err(CatalogError::NonPositiveStrain {
                material: bad.name.clone(),
            });
        }
        Ok(Self { cantilevers })
    }

    pub fn cantilevers(&self) -> &[CantileverMaterial] {
        &self.cantilevers
    }
}

impl TryFrom<RotorCatalogData> for RotorCatalog {
    type Error = CatalogError;

    fn try_from(data: RotorCatalogData) -> Result<Self, Self::Error> {
        Self::new(data.cantilevers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn materials_must_cover_strain() {
        let wood = CantileverMaterial {
            name: "Wood".into(),
            limited: false,
            stats: Stats {
                mass: 1.0,
                ..Stats::default()
            },
        };
        assert_eq!(
            RotorCatalog::new(vec![wood]).unwrap_err(),
            CatalogError::NonPositiveStrain {
                material: "Wood".into()
            }
        );
        assert_eq!(
            RotorCatalog::new(vec![]).unwrap_err(),
            CatalogError::EmptyTable("cantilevers")
        );
    }
}
