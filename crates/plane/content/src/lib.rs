//! Data-driven part catalogs and design configuration.
//!
//! This crate reads the tables the part models are built from:
//! - Engine, mount, push-pull and cowl tables (RON)
//! - Wing skin, stagger, deck and longest-wing tables (RON)
//! - Rotor cantilever materials (RON)
//! - Design configuration (TOML)
//!
//! Every table is validated by `plane-core` on load, so a [`Catalogs`] handed
//! out here is always usable. A built-in copy of the stock data ships in
//! [`defaults`].
//!
//! [`Catalogs`]: plane_core::Catalogs

pub mod defaults;
pub mod loaders;

pub use loaders::{
    ConfigLoader, ContentFactory, EngineCatalogLoader, LoadResult, RotorCatalogLoader,
    WingCatalogLoader,
};
