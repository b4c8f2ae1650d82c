//! One battle round: move, fire in initiative order, regenerate, snapshot.

use crate::combat::{
    Shooter, distance, fire_beam, fire_torpedoes, regenerate_shields, select_targets,
};
use crate::config::BattleRules;
use crate::env::{BattleDice, PlayerOracle};
use crate::state::{BattleAction, BattleRound, TokenSnapshot, WeaponKind};

use super::movement::{is_disengaging, run_movement};
use super::setup::Roster;

/// True while some living armed token has a legal target it can shoot now
/// or is still willing to close on.
pub(crate) fn engagement_possible(
    roster: &Roster,
    players: &(impl PlayerOracle + ?Sized),
) -> bool {
    roster
        .tokens
        .iter()
        .filter(|token| token.is_alive() && token.is_armed())
        .any(|token| {
            let Some(range) = roster.max_range(token.id) else {
                return false;
            };
            let targets = select_targets(token, &roster.tokens, players, None);
            if targets.is_empty() {
                return false;
            }
            let closing = token.movement > 0 && !token.is_starbase() && !is_disengaging(token);
            closing
                || targets.iter().any(|target| {
                    distance(token.position, roster.tokens[target.index()].position) <= range
                })
        })
}

pub(crate) fn run_round(
    index: u32,
    roster: &mut Roster,
    players: &(impl PlayerOracle + ?Sized),
    rules: &BattleRules,
    dice: &mut BattleDice<'_>,
) -> BattleRound {
    let mut round = BattleRound::new(index);

    round.actions.extend(
        run_movement(roster, players, rules)
            .into_iter()
            .map(BattleAction::Move),
    );
    round.actions.extend(run_firing(roster, players, rules, dice));

    for token in roster.tokens.iter_mut().filter(|token| token.is_alive()) {
        let restored = regenerate_shields(token, players.traits(token.player), rules);
        if restored > 0.0 {
            tracing::trace!(token = %token.id, restored, "shields regenerated");
        }
    }

    round.tokens = roster
        .tokens
        .iter()
        .map(|token| TokenSnapshot {
            token: token.id,
            position: token.position,
            quantity: token.quantity,
            quantity_damaged: token.quantity_damaged,
            damage: token.damage,
            stack_shields: token.stack_shields,
        })
        .collect();

    round
}

/// Every living token fires each of its slots, highest initiative first.
///
/// Stacks destroyed earlier in the round do not get to fire.
fn run_firing(
    roster: &mut Roster,
    players: &(impl PlayerOracle + ?Sized),
    rules: &BattleRules,
    dice: &mut BattleDice<'_>,
) -> Vec<BattleAction> {
    let mut order: Vec<usize> = (0..roster.tokens.len()).collect();
    order.sort_by(|&a, &b| {
        roster.tokens[b]
            .initiative
            .cmp(&roster.tokens[a].initiative)
            .then(a.cmp(&b))
    });

    let mut actions = Vec::new();
    for index in order {
        for weapon in &roster.weapons[index] {
            let token = &roster.tokens[index];
            if !token.is_alive() {
                break;
            }
            let targets = select_targets(token, &roster.tokens, players, Some(weapon.range));
            if targets.is_empty() {
                continue;
            }

            let shooter = Shooter::of(token);
            match weapon.kind {
                WeaponKind::Beam => actions.extend(
                    fire_beam(shooter, weapon, &mut roster.tokens, &targets, rules)
                        .into_iter()
                        .map(BattleAction::Beam),
                ),
                WeaponKind::Torpedo => actions.extend(
                    fire_torpedoes(shooter, weapon, &mut roster.tokens, &targets, rules, dice)
                        .into_iter()
                        .map(BattleAction::Torpedo),
                ),
            }
        }
    }

    actions
}
