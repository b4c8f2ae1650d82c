//! Battle rules loader.

use std::path::Path;

use battle_core::BattleRules;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle rules from TOML files.
pub struct RulesLoader;

impl RulesLoader {
    /// Load rules from a TOML file. Missing keys take their default values.
    pub fn load(path: &Path) -> LoadResult<BattleRules> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleRules> {
        let rules: BattleRules = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules TOML: {}", e))?;
        Self::validate(&rules)?;
        Ok(rules)
    }

    fn validate(rules: &BattleRules) -> LoadResult<()> {
        if rules.board_size == 0 {
            anyhow::bail!("board_size must be positive");
        }
        if rules.starting_positions.is_empty() {
            anyhow::bail!("at least one starting position is required");
        }
        let size = rules.board_size as i32;
        if let Some(outside) = rules
            .starting_positions
            .iter()
            .find(|p| !(0..size).contains(&p.x) || !(0..size).contains(&p.y))
        {
            anyhow::bail!("starting position {} lies off the {size}x{size} board", outside);
        }
        Ok(())
    }
}
