use super::{BattleToken, Position, TokenId};

/// Weapon family, which selects the damage algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum WeaponKind {
    /// Always hits, loses power with range, damage pools across ships and stacks.
    Beam,
    /// Rolls to hit per shot, full power at any range, half stopped by shields.
    Torpedo,
}

/// One weapon category on a firing token.
///
/// Identical weapons in several design slots collapse into one slot whose
/// `slot_quantity` is the number of such weapons per ship.
#[derive(Clone, Debug, PartialEq)]
pub struct BattleWeaponSlot {
    pub token: TokenId,
    pub kind: WeaponKind,
    pub power: u32,
    pub range: u32,
    /// Hit chance in percent; ignored for beams.
    pub accuracy: u32,
    pub slot_quantity: u32,
    pub initiative: u32,
}

impl BattleWeaponSlot {
    pub fn beam(token: TokenId, power: u32, range: u32, slot_quantity: u32) -> Self {
        Self {
            token,
            kind: WeaponKind::Beam,
            power,
            range,
            accuracy: 0,
            slot_quantity,
            initiative: 0,
        }
    }

    pub fn torpedo(token: TokenId, power: u32, range: u32, accuracy: u32, slot_quantity: u32) -> Self {
        Self {
            token,
            kind: WeaponKind::Torpedo,
            power,
            range,
            accuracy,
            slot_quantity,
            initiative: 0,
        }
    }

    #[must_use]
    pub fn with_initiative(mut self, initiative: u32) -> Self {
        self.initiative = initiative;
        self
    }

    /// Whether `target` lies within range of this weapon on `owner`.
    pub fn is_in_range(&self, owner: &BattleToken, target: Position) -> bool {
        crate::combat::in_range(self.range, owner.position, target)
    }

    /// Discrete shots (torpedoes) or beam units fired by the owning stack.
    pub fn shots(&self, living_ships: u32) -> u32 {
        self.slot_quantity.saturating_mul(living_ships)
    }
}
