//! Content loaders for reading battle data from files.
//!
//! Each loader turns one RON/TOML file into battle-core types; the
//! [`ContentFactory`] ties them together for a whole data directory.

pub mod designs;
pub mod factory;
pub mod rules;
pub mod scenario;

pub use designs::{DesignCatalog, DesignLoader};
pub use factory::{BattleContent, ContentFactory};
pub use rules::RulesLoader;
pub use scenario::{Scenario, ScenarioLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// RON parser settings shared by the loaders.
///
/// Newtypes are written bare, so trait flags read `traits: "REGENERATING_SHIELDS"`
/// rather than `traits: ("REGENERATING_SHIELDS")`.
pub(crate) fn ron_options() -> ron::Options {
    ron::Options::default().with_default_extension(ron::extensions::Extensions::UNWRAP_NEWTYPES)
}
