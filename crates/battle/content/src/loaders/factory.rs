//! Content factory for building battle inputs from data files.

use std::path::{Path, PathBuf};

use battle_core::{BattleRules, DesignTable, PlayerTable};

use crate::loaders::{DesignLoader, LoadResult, RulesLoader, Scenario, ScenarioLoader};

/// Everything needed to resolve one battle.
#[derive(Debug, Clone)]
pub struct BattleContent {
    pub designs: DesignTable,
    pub players: PlayerTable,
    pub rules: BattleRules,
    pub scenario: Scenario,
}

/// Content factory that loads battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── designs.ron
/// ├── rules.toml          (optional, defaults apply when absent)
/// └── scenarios/
///     └── skirmish.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load the design catalog from `designs.ron`.
    pub fn load_designs(&self) -> LoadResult<DesignTable> {
        DesignLoader::load(&self.data_dir.join("designs.ron"))
    }

    /// Load battle rules from `rules.toml`, or the defaults if the file is absent.
    pub fn load_rules(&self) -> LoadResult<BattleRules> {
        let path = self.data_dir.join("rules.toml");
        if !path.exists() {
            return Ok(BattleRules::default());
        }
        RulesLoader::load(&path)
    }

    /// Load a scenario by name from `scenarios/{name}.ron`, or from an
    /// explicit path when `scenario` names an existing file.
    pub fn load_scenario(&self, scenario: &str) -> LoadResult<Scenario> {
        let direct = Path::new(scenario);
        if direct.is_file() {
            return ScenarioLoader::load(direct);
        }
        let path = self
            .data_dir
            .join("scenarios")
            .join(format!("{}.ron", scenario));
        ScenarioLoader::load(&path)
    }

    /// Load designs, rules and one scenario together.
    pub fn load_battle(&self, scenario: &str) -> LoadResult<BattleContent> {
        let scenario = self.load_scenario(scenario)?;
        Ok(BattleContent {
            designs: self.load_designs()?,
            players: scenario.player_table(),
            rules: self.load_rules()?,
            scenario,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::PlayerId;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_rules_fall_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let factory = ContentFactory::new(temp_dir.path());

        assert_eq!(factory.load_rules().unwrap(), BattleRules::default());
    }

    #[test]
    fn loads_a_whole_battle() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            "designs.ron",
            r#"(designs: [(id: 1, player: 1, name: "Scout", armor: 20)])"#,
        );
        write(temp_dir.path(), "rules.toml", "max_rounds = 4\n");
        write(
            temp_dir.path(),
            "scenarios/patrol.ron",
            r#"(
                name: "patrol",
                players: [(id: 1, name: "Humanoids")],
                location: (num: 3, fleets: [(id: 1, player: 1, name: "Scout", stacks: [(design: 1, quantity: 1)])]),
            )"#,
        );

        let content = ContentFactory::new(temp_dir.path())
            .load_battle("patrol")
            .unwrap();

        assert_eq!(content.designs.len(), 1);
        assert_eq!(content.rules.max_rounds, 4);
        assert_eq!(content.scenario.location.num, 3);
        assert!(content.players.player(PlayerId(1)).is_some());
    }
}
