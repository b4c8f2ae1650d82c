//! Scenario loader.
//!
//! A scenario is everything one battle needs besides the design catalog:
//! the players, how they regard each other and the fleets at the location.

use std::collections::BTreeSet;
use std::path::Path;

use battle_core::{Location, PlayerEntry, PlayerId, PlayerTable, RelationEntry};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file, ron_options};

/// Scenario structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    /// Seed used when the caller does not pick one.
    #[serde(default)]
    pub seed: Option<u64>,
    pub players: Vec<PlayerEntry>,
    /// Directed relations; unlisted pairs are enemies.
    #[serde(default)]
    pub relations: Vec<RelationEntry>,
    /// Pairs of friends who share battle reports both ways.
    #[serde(default)]
    pub alliances: Vec<(PlayerId, PlayerId)>,
    pub location: Location,
}

impl Scenario {
    /// Builds the diplomacy oracle described by the scenario.
    pub fn player_table(&self) -> PlayerTable {
        let mut table = PlayerTable::new();
        for player in &self.players {
            table.insert_player(player.clone());
        }
        for &(a, b) in &self.alliances {
            table = table.with_alliance(a, b);
        }
        for relation in &self.relations {
            table.insert_relation(*relation);
        }
        table
    }
}

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses a scenario and checks that every fleet belongs to a listed
    /// player and that fleet ids are unique.
    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let scenario: Scenario = ron_options()
            .from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;

        let players: BTreeSet<PlayerId> = scenario.players.iter().map(|p| p.id).collect();
        let mut fleets = BTreeSet::new();
        for fleet in &scenario.location.fleets {
            if !players.contains(&fleet.player) {
                anyhow::bail!(
                    "{} ({}) belongs to unknown player {}",
                    fleet.id,
                    fleet.name,
                    fleet.player
                );
            }
            if !fleets.insert(fleet.id) {
                anyhow::bail!("Duplicate {} in scenario {}", fleet.id, scenario.name);
            }
        }

        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{
        BattleTactic, BattleTarget, FleetKind, PlayerOracle, PlayerRelation, PlayerTraits,
    };

    const SKIRMISH: &str = r#"
        (
            name: "skirmish",
            seed: Some(7),
            players: [
                (id: 1, name: "Humanoids"),
                (id: 2, name: "Insectoids", traits: "REGENERATING_SHIELDS"),
                (id: 3, name: "Nucleotids"),
            ],
            relations: [
                (player: 1, other: 3, relation: Neutral),
            ],
            alliances: [(2, 3)],
            location: (
                num: 1,
                planet: Some(12),
                fleets: [
                    (
                        id: 1,
                        player: 1,
                        name: "Stalwart Defender",
                        plan: (primary_target: Starbase, tactic: DisengageIfChallenged),
                        stacks: [(design: 1, quantity: 2)],
                    ),
                    (
                        id: 2,
                        player: 2,
                        name: "Orbital Fort",
                        kind: Starbase,
                        stacks: [(design: 5, quantity: 1, quantity_damaged: 1, damage: 12.5)],
                    ),
                ],
            ),
        )
    "#;

    #[test]
    fn parses_scenario() {
        let scenario = ScenarioLoader::parse(SKIRMISH).unwrap();

        assert_eq!(scenario.seed, Some(7));
        assert_eq!(scenario.location.planet, Some(12));
        assert_eq!(scenario.location.fleets.len(), 2);

        let defender = &scenario.location.fleets[0];
        assert_eq!(defender.plan.primary_target, BattleTarget::Starbase);
        assert_eq!(defender.plan.secondary_target, BattleTarget::Any);
        assert_eq!(defender.plan.tactic, BattleTactic::DisengageIfChallenged);

        let fort = &scenario.location.fleets[1];
        assert_eq!(fort.kind, FleetKind::Starbase);
        assert_eq!(fort.stacks[0].damage, 12.5);
        assert_eq!(fort.stacks[0].stack_shields, None);
    }

    #[test]
    fn builds_player_table() {
        let table = ScenarioLoader::parse(SKIRMISH).unwrap().player_table();

        assert_eq!(table.relation(PlayerId(1), PlayerId(2)), PlayerRelation::Enemy);
        assert_eq!(table.relation(PlayerId(1), PlayerId(3)), PlayerRelation::Neutral);
        assert_eq!(table.relation(PlayerId(3), PlayerId(2)), PlayerRelation::Friend);
        assert!(table.shares_battle_visibility(PlayerId(2), PlayerId(3)));
        assert_eq!(table.traits(PlayerId(2)), PlayerTraits::REGENERATING_SHIELDS);
    }

    #[test]
    fn reads_player_traits() {
        let scenario = ScenarioLoader::parse(
            r#"(
                name: "traits",
                players: [
                    (id: 1, name: "Humanoids"),
                    (id: 2, name: "Insectoids", traits: "REGENERATING_SHIELDS"),
                ],
                location: (num: 1, fleets: []),
            )"#,
        )
        .unwrap();

        assert_eq!(scenario.players[0].traits, PlayerTraits::empty());
        assert_eq!(scenario.players[1].traits, PlayerTraits::REGENERATING_SHIELDS);
    }

    #[test]
    fn rejects_fleets_of_unknown_players() {
        let orphan = r#"(
            name: "orphan",
            players: [(id: 1, name: "Humanoids")],
            location: (num: 1, fleets: [(id: 1, player: 9, name: "Ghost", stacks: [])]),
        )"#;

        let error = ScenarioLoader::parse(orphan).unwrap_err();
        assert!(error.to_string().contains("unknown player"));
    }
}
