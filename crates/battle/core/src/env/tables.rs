//! In-memory oracle implementations.
//!
//! Content loaders and tests build these from plain lists; the turn
//! generator can use them directly or implement the oracle traits over its
//! own storage.

use std::collections::BTreeMap;

use super::{DesignOracle, PlayerOracle, PlayerRelation, PlayerTraits, ShipDesign};
use crate::state::{DesignId, PlayerId};

/// Design catalog keyed by (player, design).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DesignTable {
    designs: BTreeMap<(PlayerId, DesignId), ShipDesign>,
}

impl DesignTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a design, keyed by its own player and id.
    pub fn insert(&mut self, design: ShipDesign) {
        self.designs.insert((design.player, design.id), design);
    }

    #[must_use]
    pub fn with_design(mut self, design: ShipDesign) -> Self {
        self.insert(design);
        self
    }

    pub fn len(&self) -> usize {
        self.designs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.designs.is_empty()
    }
}

impl FromIterator<ShipDesign> for DesignTable {
    fn from_iter<T: IntoIterator<Item = ShipDesign>>(iter: T) -> Self {
        let mut table = Self::new();
        for design in iter {
            table.insert(design);
        }
        table
    }
}

impl DesignOracle for DesignTable {
    fn design(&self, player: PlayerId, design: DesignId) -> Option<ShipDesign> {
        self.designs.get(&(player, design)).cloned()
    }
}

/// One directed entry of the diplomacy table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelationEntry {
    pub player: PlayerId,
    pub other: PlayerId,
    pub relation: PlayerRelation,
    /// `player` passes battle reports on to `other`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub share_battles: bool,
}

/// A player as seen by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerEntry {
    pub id: PlayerId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub traits: PlayerTraits,
}

impl PlayerEntry {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            traits: PlayerTraits::empty(),
        }
    }

    #[must_use]
    pub fn with_traits(mut self, traits: PlayerTraits) -> Self {
        self.traits = traits;
        self
    }
}

/// Players and their directed relations.
///
/// Pairs without an entry are treated as enemies, the stance every new
/// player takes toward strangers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayerTable {
    players: BTreeMap<PlayerId, PlayerEntry>,
    relations: BTreeMap<(PlayerId, PlayerId), RelationEntry>,
}

impl PlayerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_player(&mut self, player: PlayerEntry) {
        self.players.insert(player.id, player);
    }

    pub fn insert_relation(&mut self, entry: RelationEntry) {
        self.relations.insert((entry.player, entry.other), entry);
    }

    #[must_use]
    pub fn with_player(mut self, player: PlayerEntry) -> Self {
        self.insert_player(player);
        self
    }

    /// Sets how `player` regards `other` (one direction only).
    #[must_use]
    pub fn with_relation(
        mut self,
        player: PlayerId,
        other: PlayerId,
        relation: PlayerRelation,
    ) -> Self {
        let share_battles = self
            .relations
            .get(&(player, other))
            .is_some_and(|entry| entry.share_battles);
        self.insert_relation(RelationEntry {
            player,
            other,
            relation,
            share_battles,
        });
        self
    }

    /// Makes two players friends who share battle reports with each other.
    #[must_use]
    pub fn with_alliance(mut self, a: PlayerId, b: PlayerId) -> Self {
        for (player, other) in [(a, b), (b, a)] {
            self.insert_relation(RelationEntry {
                player,
                other,
                relation: PlayerRelation::Friend,
                share_battles: true,
            });
        }
        self
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerEntry> {
        self.players.get(&id)
    }
}

impl PlayerOracle for PlayerTable {
    fn relation(&self, player: PlayerId, other: PlayerId) -> PlayerRelation {
        if player == other {
            return PlayerRelation::Own;
        }
        self.relations
            .get(&(player, other))
            .map_or(PlayerRelation::Enemy, |entry| entry.relation)
    }

    fn shares_battle_visibility(&self, player: PlayerId, other: PlayerId) -> bool {
        player != other
            && self
                .relations
                .get(&(player, other))
                .is_some_and(|entry| entry.share_battles && entry.relation == PlayerRelation::Friend)
    }

    fn traits(&self, player: PlayerId) -> PlayerTraits {
        self.players
            .get(&player)
            .map_or(PlayerTraits::empty(), |entry| entry.traits)
    }

    fn players(&self) -> Vec<PlayerId> {
        self.players.keys().copied().collect()
    }
}
