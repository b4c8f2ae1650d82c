//! Beam weapons: always hit, lose power with range, damage flows as one pool.
//!
//! # Resolution
//!
//! ```text
//! pool     = power × slot_quantity × living ships
//! falloff% = 100 − dropoff% × max(distance − 1, 0)      (floored at 0)
//! per target: available = pool × falloff% / 100
//!             shields absorb 1:1, then hull ship by ship
//!             leftover carries on only if the target stack died
//! ```
//!
//! The pool is tracked in undiminished units so every target in the list
//! sees its own falloff.

use crate::config::BattleRules;
use crate::state::{BattleToken, BattleWeaponSlot, BeamFire, TokenId};

use super::Shooter;
use super::geometry::distance;

/// Percent of beam power left after travelling `distance` squares.
pub fn falloff_percent(rules: &BattleRules, distance: u32) -> u32 {
    let lost = rules
        .beam_range_dropoff_percent
        .saturating_mul(distance.saturating_sub(1));
    100u32.saturating_sub(lost)
}

/// Damage landed on one stack by part of a beam pool.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BeamHit {
    pub shield_damage: f64,
    pub armor_damage: f64,
    pub ships_destroyed: u32,
}

impl BeamHit {
    /// Pool consumed by this hit.
    pub fn used(&self) -> f64 {
        self.shield_damage + self.armor_damage
    }
}

/// Fires one beam slot of `shooter` down the ordered `targets` list.
///
/// Returns one entry per stack that took damage.
pub fn fire_beam(
    shooter: Shooter,
    weapon: &BattleWeaponSlot,
    tokens: &mut [BattleToken],
    targets: &[TokenId],
    rules: &BattleRules,
) -> Vec<BeamFire> {
    let pool = u64::from(weapon.power) * u64::from(weapon.shots(shooter.ships));
    let mut remaining = pool as f64;
    let mut fired = Vec::new();

    for &target_id in targets {
        if remaining <= 0.0 {
            break;
        }
        let Some(target) = tokens.get_mut(target_id.index()) else {
            continue;
        };
        if !target.is_alive() {
            continue;
        }

        let percent = falloff_percent(rules, distance(shooter.position, target.position));
        if percent == 0 {
            continue;
        }
        let available = remaining * f64::from(percent) / 100.0;

        let hit = apply_beam_damage(target, available);
        tracing::debug!(
            shooter = %shooter.token,
            target = %target_id,
            shields = hit.shield_damage,
            armor = hit.armor_damage,
            killed = hit.ships_destroyed,
            "beam volley"
        );
        fired.push(BeamFire {
            token: shooter.token,
            target: target_id,
            shield_damage: hit.shield_damage,
            armor_damage: hit.armor_damage,
            ships_destroyed: hit.ships_destroyed,
        });

        if target.is_alive() {
            break;
        }
        tracing::debug!(target = %target_id, "stack destroyed");
        remaining = (available - hit.used()).max(0.0) * 100.0 / f64::from(percent);
    }

    fired
}

/// Applies `amount` beam damage to one stack.
///
/// Shields soak first. Hull damage then finishes already damaged ships,
/// kills undamaged ships one at a time, and spreads any remainder over the
/// damaged ships (or wounds a single fresh one).
pub fn apply_beam_damage(target: &mut BattleToken, amount: f64) -> BeamHit {
    let mut hit = BeamHit::default();
    let mut remaining = amount.max(0.0);

    let absorbed = remaining.min(target.stack_shields);
    target.stack_shields -= absorbed;
    remaining -= absorbed;
    hit.shield_damage = absorbed;

    while remaining > 0.0 && target.is_alive() {
        if target.quantity_damaged > 0 {
            let needed = (target.armor - target.damage).max(0.0);
            if remaining >= needed {
                remaining -= needed;
                hit.armor_damage += needed;
                target.quantity_damaged -= 1;
                if target.quantity_damaged == 0 {
                    target.damage = 0.0;
                }
                target.lose_ship();
                hit.ships_destroyed += 1;
            } else {
                let damaged = f64::from(target.quantity_damaged);
                target.damage = (target.damage * damaged + remaining) / damaged;
                hit.armor_damage += remaining;
                remaining = 0.0;
            }
        } else if remaining >= target.armor {
            remaining -= target.armor;
            hit.armor_damage += target.armor;
            target.lose_ship();
            hit.ships_destroyed += 1;
        } else {
            target.quantity_damaged = 1;
            target.damage = remaining;
            hit.armor_damage += remaining;
            remaining = 0.0;
        }
    }

    hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{PlayerId, Position};

    fn shooter(ships: u32, position: Position) -> Shooter {
        Shooter {
            token: TokenId(99),
            position,
            ships,
        }
    }

    fn defender(id: u32, quantity: u32, armor: f64) -> BattleToken {
        BattleToken::new(TokenId(id), PlayerId(2), quantity, armor)
    }

    fn fire(
        shooter: Shooter,
        weapon: BattleWeaponSlot,
        tokens: &mut [BattleToken],
    ) -> Vec<BeamFire> {
        let targets: Vec<TokenId> = tokens.iter().map(|token| token.id).collect();
        fire_beam(shooter, &weapon, tokens, &targets, &BattleRules::default())
    }

    fn assert_stack(token: &BattleToken, damage: f64, quantity_damaged: u32, quantity: u32) {
        assert_eq!(token.damage, damage, "damage of {}", token.id);
        assert_eq!(token.quantity_damaged, quantity_damaged, "damaged of {}", token.id);
        assert_eq!(token.quantity, quantity, "quantity of {}", token.id);
    }

    #[test]
    fn single_beam_wounds_without_killing() {
        let mut tokens = vec![defender(0, 1, 20.0)];

        let fired = fire(
            shooter(1, Position::ORIGIN),
            BattleWeaponSlot::beam(TokenId(99), 10, 1, 1),
            &mut tokens,
        );

        assert_stack(&tokens[0], 10.0, 1, 1);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].armor_damage, 10.0);
        assert_eq!(fired[0].ships_destroyed, 0);
    }

    #[test]
    fn beam_finishes_damaged_ship_then_wounds_the_next() {
        let mut tokens = vec![defender(0, 2, 20.0).with_damage(1, 5.0)];

        fire(
            shooter(1, Position::ORIGIN),
            BattleWeaponSlot::beam(TokenId(99), 30, 1, 1),
            &mut tokens,
        );

        assert_stack(&tokens[0], 15.0, 1, 1);
    }

    #[test]
    fn beam_loses_power_with_range() {
        let mut tokens = vec![defender(0, 1, 20.0).at(Position::ORIGIN)];

        fire(
            shooter(1, Position::new(2, 0)),
            BattleWeaponSlot::beam(TokenId(99), 10, 2, 1),
            &mut tokens,
        );

        assert_stack(&tokens[0], 9.0, 1, 1);
    }

    #[test]
    fn overkill_destroys_and_resets_stack() {
        let mut tokens = vec![defender(0, 1, 20.0)];

        let fired = fire(
            shooter(1, Position::ORIGIN),
            BattleWeaponSlot::beam(TokenId(99), 15, 2, 2),
            &mut tokens,
        );

        assert_stack(&tokens[0], 0.0, 0, 0);
        assert_eq!(fired[0].ships_destroyed, 1);
    }

    #[test]
    fn two_ships_two_beams_kill_one_wound_one() {
        let mut tokens = vec![defender(0, 2, 30.0)];

        fire(
            shooter(2, Position::ORIGIN),
            BattleWeaponSlot::beam(TokenId(99), 10, 0, 2),
            &mut tokens,
        );

        assert_stack(&tokens[0], 10.0, 1, 1);
    }

    #[test]
    fn shields_soak_beam_first() {
        let mut tokens = vec![defender(0, 1, 30.0).with_shields(20.0)];

        let fired = fire(
            shooter(1, Position::ORIGIN),
            BattleWeaponSlot::beam(TokenId(99), 10, 0, 1),
            &mut tokens,
        );

        assert_stack(&tokens[0], 0.0, 0, 1);
        assert_eq!(tokens[0].stack_shields, 10.0);
        assert_eq!(fired[0].shield_damage, 10.0);
    }

    #[test]
    fn leftover_pool_spills_into_next_stack() {
        let mut tokens = vec![defender(0, 1, 10.0), defender(1, 1, 100.0)];

        let fired = fire(
            shooter(1, Position::ORIGIN),
            BattleWeaponSlot::beam(TokenId(99), 100, 0, 1),
            &mut tokens,
        );

        assert_stack(&tokens[0], 0.0, 0, 0);
        assert_stack(&tokens[1], 90.0, 1, 1);
        assert_eq!(fired.len(), 2);
    }

    #[test]
    fn spillover_recomputes_falloff_per_target() {
        // Near stack at distance 1 (100%), far stack at distance 3 (80%).
        let mut tokens = vec![
            defender(0, 1, 10.0).at(Position::new(1, 0)),
            defender(1, 1, 100.0).at(Position::new(3, 0)),
        ];

        fire(
            shooter(1, Position::ORIGIN),
            BattleWeaponSlot::beam(TokenId(99), 60, 3, 1),
            &mut tokens,
        );

        assert_eq!(tokens[0].quantity, 0);
        // 50 left at full power becomes 40 at the far stack.
        assert_stack(&tokens[1], 40.0, 1, 1);
    }

    #[test]
    fn shields_and_armor_absorb_exactly_the_pool() {
        let mut tokens = vec![
            defender(0, 3, 25.0).with_shields(8.0).with_damage(2, 4.0),
            defender(1, 2, 40.0).with_shields(5.0),
        ];
        let before: f64 = tokens.iter().map(BattleToken::effective_hit_points).sum();

        let fired = fire(
            shooter(3, Position::ORIGIN),
            BattleWeaponSlot::beam(TokenId(99), 17, 0, 2),
            &mut tokens,
        );

        let dealt: f64 = fired.iter().map(|f| f.shield_damage + f.armor_damage).sum();
        assert_eq!(dealt, 102.0);
        assert!(tokens.iter().all(|t| t.quantity_damaged <= t.quantity));
        assert!(tokens.iter().all(|t| t.stack_shields <= t.max_stack_shields()));
        let after: f64 = tokens.iter().map(BattleToken::effective_hit_points).sum();
        assert!(after < before);
    }

    #[test]
    fn falloff_floors_at_zero() {
        let rules = BattleRules::default();
        assert_eq!(falloff_percent(&rules, 0), 100);
        assert_eq!(falloff_percent(&rules, 1), 100);
        assert_eq!(falloff_percent(&rules, 2), 90);
        assert_eq!(falloff_percent(&rules, 11), 0);
        assert_eq!(falloff_percent(&rules, 40), 0);
    }
}
