//! Data-driven content definitions and loaders.
//!
//! This crate reads static arena content from RON/TOML data files:
//! - Item catalogs (data-driven via RON)
//! - Character rosters with equipment and abilities (data-driven via RON)
//! - Combat rules (data-driven via TOML)
//!
//! All loaders deserialize into arena-core types with serde.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ActorLoader, ActorSpec, ConfigLoader, Content, ContentFactory, EquipmentSpec, ItemLoader,
    KindSpec,
};
