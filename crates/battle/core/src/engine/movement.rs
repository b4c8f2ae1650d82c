//! Movement phase: close on targets or fall back, one token at a time.

use crate::combat::{distance, select_targets, step_away, step_toward, would_attack};
use crate::config::BattleRules;
use crate::env::PlayerOracle;
use crate::state::{BattleTactic, BattleToken, Position, TokenId, TokenMove};

use super::setup::Roster;

/// What a token wants to do this round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Intent {
    Hold,
    Close { target: Position, keep: u32 },
    Retreat { threat: Position },
}

/// Whether a token is trying to leave the fight.
pub(crate) fn is_disengaging(token: &BattleToken) -> bool {
    !token.is_armed()
        || match token.plan.tactic {
            BattleTactic::MaximizeDamage => false,
            BattleTactic::Disengage => true,
            BattleTactic::DisengageIfChallenged => token.is_challenged(),
        }
}

pub(crate) fn intent(
    token: &BattleToken,
    roster: &Roster,
    players: &(impl PlayerOracle + ?Sized),
) -> Intent {
    if !token.is_alive() || token.movement == 0 || token.is_starbase() {
        return Intent::Hold;
    }

    if is_disengaging(token) {
        return nearest_threat(token, &roster.tokens, players)
            .map_or(Intent::Hold, |threat| Intent::Retreat { threat });
    }

    let Some(keep) = roster.max_range(token.id) else {
        return Intent::Hold;
    };
    select_targets(token, &roster.tokens, players, None)
        .first()
        .map(|target| roster.tokens[target.index()].position)
        .filter(|&target| distance(token.position, target) > keep)
        .map_or(Intent::Hold, |target| Intent::Close { target, keep })
}

/// Moves every mobile token in insertion order and returns the moves made.
pub(crate) fn run_movement(
    roster: &mut Roster,
    players: &(impl PlayerOracle + ?Sized),
    rules: &BattleRules,
) -> Vec<TokenMove> {
    let mut moves = Vec::new();

    for index in 0..roster.tokens.len() {
        let token = &roster.tokens[index];
        let from = token.position;
        let to = match intent(token, roster, players) {
            Intent::Hold => continue,
            Intent::Close { target, keep } => step_toward(from, target, token.movement, keep),
            Intent::Retreat { threat } => step_away(from, threat, token.movement),
        };
        let to = rules.clamp_to_board(to);
        if to == from {
            continue;
        }

        let id = TokenId(index as u32);
        tracing::trace!(token = %id, %from, %to, "token moved");
        roster.tokens[index].position = to;
        moves.push(TokenMove { token: id, from, to });
    }

    moves
}

/// Position of the closest living armed token that would fire on `token`.
fn nearest_threat(
    token: &BattleToken,
    tokens: &[BattleToken],
    players: &(impl PlayerOracle + ?Sized),
) -> Option<Position> {
    tokens
        .iter()
        .filter(|other| other.is_alive() && other.is_armed())
        .filter(|other| would_attack(players, other.player, &other.plan, token.player))
        .min_by_key(|other| (distance(token.position, other.position), other.id))
        .map(|other| other.position)
}
