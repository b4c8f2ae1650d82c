//! Combat tokens: one per fleet stack, alive for a single battle.

use bitflags::bitflags;

use super::{BattlePlan, DesignId, FleetId, PlayerId, Position, TokenId};

bitflags! {
    /// Role flags derived once from the design, used only for target policy matching.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TokenAttributes: u8 {
        const ARMED          = 1 << 0;
        const STARBASE       = 1 << 1;
        const BOMBER         = 1 << 2;
        const FREIGHTER      = 1 << 3;
        const FUEL_TRANSPORT = 1 << 4;
        const UNARMED        = 1 << 5;
    }
}

/// Where a token came from, so casualties can be written back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenOrigin {
    pub fleet: FleetId,
    pub fleet_index: usize,
    pub stack_index: usize,
}

/// A ship stack as it fights.
///
/// Armor and shields are per ship; `stack_shields` is the shared pool for
/// the whole stack. Hull damage follows the stack model of [`ShipStack`]:
/// `quantity_damaged` ships carry `damage` each.
///
/// [`ShipStack`]: super::ShipStack
#[derive(Clone, Debug, PartialEq)]
pub struct BattleToken {
    pub id: TokenId,
    pub player: PlayerId,
    pub design: DesignId,
    pub origin: TokenOrigin,
    pub position: Position,
    pub attributes: TokenAttributes,
    pub plan: BattlePlan,
    pub initiative: u32,
    pub movement: u32,
    pub armor: f64,
    pub shields: f64,
    pub stack_shields: f64,
    pub quantity: u32,
    pub quantity_damaged: u32,
    pub damage: f64,
    /// Ships lost during this battle.
    pub destroyed: u32,
}

impl BattleToken {
    /// Creates an undamaged token with full shields and no weapons attributes.
    ///
    /// The engine fills attributes, plan and origin during setup; tests use
    /// the builder methods below.
    pub fn new(id: TokenId, player: PlayerId, quantity: u32, armor: f64) -> Self {
        Self {
            id,
            player,
            design: DesignId::default(),
            origin: TokenOrigin {
                fleet: FleetId::default(),
                fleet_index: 0,
                stack_index: 0,
            },
            position: Position::ORIGIN,
            attributes: TokenAttributes::UNARMED,
            plan: BattlePlan::default(),
            initiative: 0,
            movement: 0,
            armor,
            shields: 0.0,
            stack_shields: 0.0,
            quantity,
            quantity_damaged: 0,
            damage: 0.0,
            destroyed: 0,
        }
    }

    #[must_use]
    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Sets per-ship shields and charges the stack pool to full.
    #[must_use]
    pub fn with_shields(mut self, shields: f64) -> Self {
        self.shields = shields;
        self.stack_shields = shields * self.quantity as f64;
        self
    }

    #[must_use]
    pub fn with_damage(mut self, quantity_damaged: u32, damage: f64) -> Self {
        self.quantity_damaged = quantity_damaged;
        self.damage = damage;
        self
    }

    #[must_use]
    pub fn with_attributes(mut self, attributes: TokenAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    #[must_use]
    pub fn with_plan(mut self, plan: BattlePlan) -> Self {
        self.plan = plan;
        self
    }

    #[must_use]
    pub fn with_initiative(mut self, initiative: u32) -> Self {
        self.initiative = initiative;
        self
    }

    #[must_use]
    pub fn with_movement(mut self, movement: u32) -> Self {
        self.movement = movement;
        self
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.quantity > 0
    }

    pub fn is_armed(&self) -> bool {
        self.attributes.contains(TokenAttributes::ARMED)
    }

    pub fn is_starbase(&self) -> bool {
        self.attributes.contains(TokenAttributes::STARBASE)
    }

    /// Shield pool of the stack when every living ship is fully charged.
    pub fn max_stack_shields(&self) -> f64 {
        self.shields * self.quantity as f64
    }

    /// Hull damage carried by the stack as a whole.
    pub fn accumulated_damage(&self) -> f64 {
        self.damage * self.quantity_damaged as f64
    }

    /// Armor plus shields still standing between the stack and destruction.
    pub fn effective_hit_points(&self) -> f64 {
        self.armor * self.quantity as f64 - self.accumulated_damage() + self.stack_shields
    }

    /// True once the stack has taken any loss, used by `DisengageIfChallenged`.
    pub fn is_challenged(&self) -> bool {
        self.destroyed > 0
            || self.quantity_damaged > 0
            || self.stack_shields < self.max_stack_shields()
    }

    /// Removes one ship from the stack.
    ///
    /// Keeps the shield pool inside the capacity of the survivors and clears
    /// all residual state once the last ship is gone.
    pub fn lose_ship(&mut self) {
        self.quantity = self.quantity.saturating_sub(1);
        self.destroyed += 1;
        self.stack_shields = self.stack_shields.min(self.max_stack_shields());
        if self.quantity == 0 {
            self.reset_destroyed();
        }
    }

    /// Dead stacks carry no residual state.
    pub fn reset_destroyed(&mut self) {
        self.damage = 0.0;
        self.quantity_damaged = 0;
        self.stack_shields = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn losing_last_ship_resets_stack() {
        let mut token = BattleToken::new(TokenId(0), PlayerId(1), 1, 20.0)
            .with_shields(10.0)
            .with_damage(1, 5.0);

        token.lose_ship();

        assert_eq!(token.quantity, 0);
        assert_eq!(token.destroyed, 1);
        assert_eq!(token.quantity_damaged, 0);
        assert_eq!(token.damage, 0.0);
        assert_eq!(token.stack_shields, 0.0);
    }

    #[test]
    fn losing_a_ship_clamps_shield_pool() {
        let mut token = BattleToken::new(TokenId(0), PlayerId(1), 3, 20.0).with_shields(10.0);
        assert_eq!(token.stack_shields, 30.0);

        token.lose_ship();

        assert_eq!(token.quantity, 2);
        assert_eq!(token.stack_shields, 20.0);
    }

    #[test]
    fn effective_hit_points_counts_shields_and_damage() {
        let token = BattleToken::new(TokenId(0), PlayerId(1), 2, 20.0)
            .with_shields(5.0)
            .with_damage(1, 15.0);

        // 40 armor - 15 damage + 10 shields
        assert_eq!(token.effective_hit_points(), 35.0);
    }
}
