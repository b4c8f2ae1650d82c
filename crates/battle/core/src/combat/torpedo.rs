//! Torpedoes: discrete shots, each rolled against accuracy.
//!
//! Torpedoes keep full power at any range. While a stack still has
//! shields, a share of every hit (`torpedo_shield_percent`) is taken out of
//! the shield pool and the rest strikes the hull.

use crate::config::BattleRules;
use crate::env::BattleDice;
use crate::state::{BattleToken, BattleWeaponSlot, TokenId, TorpedoFire};

use super::Shooter;

/// Outcome of one torpedo hit on a stack.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TorpedoHit {
    pub shield_damage: f64,
    pub armor_damage: f64,
    pub destroyed_ship: bool,
}

/// Fires every torpedo of one slot, walking down `targets` as stacks die.
///
/// Shots left over once no living target remains are not fired.
pub fn fire_torpedoes(
    shooter: Shooter,
    weapon: &BattleWeaponSlot,
    tokens: &mut [BattleToken],
    targets: &[TokenId],
    rules: &BattleRules,
    dice: &mut BattleDice<'_>,
) -> Vec<TorpedoFire> {
    let mut shots = weapon.shots(shooter.ships);
    let mut fired = Vec::new();

    for &target_id in targets {
        if shots == 0 {
            break;
        }
        let Some(target) = tokens.get_mut(target_id.index()) else {
            continue;
        };
        if !target.is_alive() {
            continue;
        }

        let mut salvo = TorpedoFire {
            token: shooter.token,
            target: target_id,
            hits: 0,
            misses: 0,
            shield_damage: 0.0,
            armor_damage: 0.0,
            ships_destroyed: 0,
        };

        while shots > 0 && target.is_alive() {
            shots -= 1;
            if !dice.chance(shooter.token, BattleDice::TORPEDO_ACCURACY, weapon.accuracy) {
                salvo.misses += 1;
                continue;
            }
            let hit = apply_torpedo_hit(target, f64::from(weapon.power), rules);
            salvo.hits += 1;
            salvo.shield_damage += hit.shield_damage;
            salvo.armor_damage += hit.armor_damage;
            if hit.destroyed_ship {
                salvo.ships_destroyed += 1;
            }
        }

        tracing::debug!(
            shooter = %shooter.token,
            target = %target_id,
            hits = salvo.hits,
            misses = salvo.misses,
            killed = salvo.ships_destroyed,
            "torpedo salvo"
        );
        if !target.is_alive() {
            tracing::debug!(target = %target_id, "stack destroyed");
        }
        fired.push(salvo);
    }

    fired
}

/// Applies a single torpedo hit of `power` to a stack.
///
/// A hit that covers the armor left on the ship being worked on (armor minus
/// the stack's accumulated damage) destroys it; the overkill is wasted and
/// the stack's damage clears. A lesser hit wounds one ship of an undamaged
/// stack, or is averaged over every ship of an already damaged one.
pub fn apply_torpedo_hit(target: &mut BattleToken, power: f64, rules: &BattleRules) -> TorpedoHit {
    let mut hit = TorpedoHit::default();
    let mut hull = power;

    if target.stack_shields > 0.0 {
        let shield_part = power * f64::from(rules.torpedo_shield_percent) / 100.0;
        let absorbed = shield_part.min(target.stack_shields);
        target.stack_shields -= absorbed;
        hit.shield_damage = absorbed;
        hull = power - absorbed;
    }

    if hull <= 0.0 || !target.is_alive() {
        return hit;
    }

    let accumulated = target.accumulated_damage();
    let left = (target.armor - accumulated).max(0.0);
    if hull >= left {
        hit.armor_damage = left;
        hit.destroyed_ship = true;
        target.damage = 0.0;
        target.quantity_damaged = 0;
        target.lose_ship();
    } else if target.quantity_damaged == 0 {
        hit.armor_damage = hull;
        target.quantity_damaged = 1;
        target.damage = hull;
    } else {
        hit.armor_damage = hull;
        target.quantity_damaged = target.quantity;
        target.damage = (accumulated + hull) / f64::from(target.quantity);
    }

    hit
}
