use bitflags::bitflags;

use crate::state::PlayerId;

/// How one player regards another.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PlayerRelation {
    /// The same player.
    Own,
    Friend,
    Neutral,
    Enemy,
}

bitflags! {
    /// Racial traits the battle engine cares about.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct PlayerTraits: u8 {
        /// Shields recover a fraction of their capacity every round.
        const REGENERATING_SHIELDS = 1 << 0;
    }
}

/// Read-only view of the diplomacy table and player traits.
///
/// The engine only classifies relationships; storing or changing them is
/// the caller's business.
pub trait PlayerOracle: Send + Sync {
    /// How `player` regards `other`. Must return [`PlayerRelation::Own`] when
    /// both are the same player.
    fn relation(&self, player: PlayerId, other: PlayerId) -> PlayerRelation;

    /// Whether `player` passes its battle reports on to `other`.
    fn shares_battle_visibility(&self, player: PlayerId, other: PlayerId) -> bool;

    fn traits(&self, player: PlayerId) -> PlayerTraits;

    /// Every player known to the oracle.
    fn players(&self) -> Vec<PlayerId>;
}
