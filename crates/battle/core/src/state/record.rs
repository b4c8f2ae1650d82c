//! Replayable battle log.
//!
//! A record is append-only: the engine assembles each round completely and
//! pushes it with [`BattleRecord::push_round`]; closed rounds are never
//! touched again. The record is the only thing the intel layer learns about
//! a battle, and the only thing a presentation layer needs to replay it.

use std::collections::{BTreeMap, BTreeSet};

use super::{DesignId, FleetId, MapCoords, PlayerId, Position, TokenAttributes, TokenId};
use crate::env::PlayerOracle;

/// Roster entry describing a token as it entered the battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleRecordToken {
    pub token: TokenId,
    pub player: PlayerId,
    pub fleet: FleetId,
    pub design: DesignId,
    pub attributes: TokenAttributes,
    pub position: Position,
    pub quantity: u32,
}

/// Token state at the end of a round.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenSnapshot {
    pub token: TokenId,
    pub position: Position,
    pub quantity: u32,
    pub quantity_damaged: u32,
    pub damage: f64,
    pub stack_shields: f64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenMove {
    pub token: TokenId,
    pub from: Position,
    pub to: Position,
}

/// Damage one beam volley did to one target stack.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeamFire {
    pub token: TokenId,
    pub target: TokenId,
    pub shield_damage: f64,
    pub armor_damage: f64,
    pub ships_destroyed: u32,
}

/// Outcome of a torpedo salvo against one target stack.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TorpedoFire {
    pub token: TokenId,
    pub target: TokenId,
    pub hits: u32,
    pub misses: u32,
    pub shield_damage: f64,
    pub armor_damage: f64,
    pub ships_destroyed: u32,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum BattleAction {
    Move(TokenMove),
    Beam(BeamFire),
    Torpedo(TorpedoFire),
}

impl BattleAction {
    /// Token that performed the action.
    pub fn token(&self) -> TokenId {
        match self {
            Self::Move(action) => action.token,
            Self::Beam(action) => action.token,
            Self::Torpedo(action) => action.token,
        }
    }

    pub fn ships_destroyed(&self) -> u32 {
        match self {
            Self::Move(_) => 0,
            Self::Beam(action) => action.ships_destroyed,
            Self::Torpedo(action) => action.ships_destroyed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleRound {
    pub index: u32,
    pub actions: Vec<BattleAction>,
    pub tokens: Vec<TokenSnapshot>,
}

impl BattleRound {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            actions: Vec::new(),
            tokens: Vec::new(),
        }
    }
}

/// Complete log of one battle.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleRecord {
    pub num: u32,
    pub planet: Option<u32>,
    pub coords: MapCoords,
    pub seed: u64,
    /// Participating players in order of first appearance.
    pub players: Vec<PlayerId>,
    pub tokens: Vec<BattleRecordToken>,
    rounds: Vec<BattleRound>,
}

impl BattleRecord {
    pub fn new(
        num: u32,
        planet: Option<u32>,
        coords: MapCoords,
        seed: u64,
        tokens: Vec<BattleRecordToken>,
    ) -> Self {
        let mut players = Vec::new();
        for token in &tokens {
            if !players.contains(&token.player) {
                players.push(token.player);
            }
        }

        Self {
            num,
            planet,
            coords,
            seed,
            players,
            tokens,
            rounds: Vec::new(),
        }
    }

    /// Appends a finished round. Round indices must not go backwards.
    pub fn push_round(&mut self, round: BattleRound) {
        debug_assert!(
            self.rounds
                .last()
                .is_none_or(|last| last.index <= round.index),
            "round indices must be non-decreasing"
        );
        self.rounds.push(round);
    }

    /// Index the next round will carry.
    pub fn next_round_index(&self) -> u32 {
        self.rounds.len() as u32
    }

    pub fn rounds(&self) -> &[BattleRound] {
        &self.rounds
    }

    /// True when no shots were ever possible and no round was fought.
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn actions(&self) -> impl Iterator<Item = &BattleAction> {
        self.rounds.iter().flat_map(|round| round.actions.iter())
    }

    /// Final state of a token, or its entry state if no round was fought.
    pub fn final_quantity(&self, token: TokenId) -> Option<u32> {
        let last = self
            .rounds
            .last()
            .and_then(|round| round.tokens.iter().find(|snap| snap.token == token));
        match last {
            Some(snapshot) => Some(snapshot.quantity),
            None => self
                .tokens
                .iter()
                .find(|entry| entry.token == token)
                .map(|entry| entry.quantity),
        }
    }

    /// Ships lost per player over the whole battle.
    pub fn losses(&self) -> BTreeMap<PlayerId, u32> {
        let mut losses: BTreeMap<PlayerId, u32> =
            self.players.iter().map(|&player| (player, 0)).collect();
        for entry in &self.tokens {
            let remaining = self.final_quantity(entry.token).unwrap_or(entry.quantity);
            *losses.entry(entry.player).or_default() += entry.quantity.saturating_sub(remaining);
        }
        losses
    }

    /// Players who learn about this battle: participants, plus anyone a
    /// participant shares battle visibility with.
    pub fn viewers(&self, players: &(impl PlayerOracle + ?Sized)) -> Vec<PlayerId> {
        let mut viewers: BTreeSet<PlayerId> = self.players.iter().copied().collect();
        for candidate in players.players() {
            if self
                .players
                .iter()
                .any(|&participant| players.shares_battle_visibility(participant, candidate))
            {
                viewers.insert(candidate);
            }
        }
        viewers.into_iter().collect()
    }

    /// SHA-256 over the bincode encoding of the record.
    ///
    /// Two resolutions of the same inputs with the same seed produce the same
    /// digest, which is what replay verification compares.
    ///
    /// # Errors
    ///
    /// Returns the bincode error if the record cannot be encoded.
    #[cfg(feature = "serde")]
    pub fn digest(&self) -> Result<[u8; 32], bincode::Error> {
        use sha2::{Digest, Sha256};

        let bytes = bincode::serialize(self)?;
        Ok(Sha256::digest(&bytes).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(token: u32, player: u32, quantity: u32) -> BattleRecordToken {
        BattleRecordToken {
            token: TokenId(token),
            player: PlayerId(player),
            fleet: FleetId(token),
            design: DesignId(1),
            attributes: TokenAttributes::ARMED,
            position: Position::ORIGIN,
            quantity,
        }
    }

    fn snapshot(token: u32, quantity: u32) -> TokenSnapshot {
        TokenSnapshot {
            token: TokenId(token),
            position: Position::ORIGIN,
            quantity,
            quantity_damaged: 0,
            damage: 0.0,
            stack_shields: 0.0,
        }
    }

    #[test]
    fn players_listed_in_order_of_appearance() {
        let record = BattleRecord::new(
            1,
            None,
            MapCoords::default(),
            0,
            vec![entry(0, 2, 1), entry(1, 1, 1), entry(2, 2, 3)],
        );
        assert_eq!(record.players, vec![PlayerId(2), PlayerId(1)]);
        assert!(record.is_empty());
    }

    #[test]
    fn losses_compare_last_round_to_roster() {
        let mut record = BattleRecord::new(
            1,
            None,
            MapCoords::default(),
            0,
            vec![entry(0, 1, 3), entry(1, 2, 2)],
        );

        let mut first = BattleRound::new(record.next_round_index());
        first.tokens = vec![snapshot(0, 3), snapshot(1, 1)];
        record.push_round(first);

        let mut second = BattleRound::new(record.next_round_index());
        second.tokens = vec![snapshot(0, 2), snapshot(1, 0)];
        record.push_round(second);

        let losses = record.losses();
        assert_eq!(losses[&PlayerId(1)], 1);
        assert_eq!(losses[&PlayerId(2)], 2);
        assert_eq!(record.rounds()[1].index, 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn digest_covers_the_encoded_record() {
        use sha2::{Digest, Sha256};

        let mut record =
            BattleRecord::new(4, Some(9), MapCoords::default(), 21, vec![entry(0, 1, 2)]);
        let encoded = bincode::serialize(&record).unwrap();
        let expected: [u8; 32] = Sha256::digest(&encoded).into();
        assert_eq!(record.digest().unwrap(), expected);
        assert_ne!(expected, <[u8; 32]>::from(Sha256::digest(b"")));

        let mut round = BattleRound::new(record.next_round_index());
        round.tokens = vec![snapshot(0, 1)];
        record.push_round(round);
        assert_ne!(record.digest().unwrap(), expected);
    }
}
