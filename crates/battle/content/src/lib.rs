//! Data-driven battle content and loaders.
//!
//! This crate reads the static inputs of a battle from RON/TOML data files:
//! - Ship design catalogs (RON)
//! - Battle rules (TOML)
//! - Scenarios: players, relations and the fleets at a location (RON)
//!
//! Content feeds the oracles of `battle-core` and never appears in a
//! battle record.
//!
//! All loaders use battle-core types directly with serde for RON/TOML deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    BattleContent, ContentFactory, DesignCatalog, DesignLoader, RulesLoader, Scenario,
    ScenarioLoader,
};
