//! Target policy matching and target ordering.

use core::cmp::Ordering;

use crate::env::{PlayerOracle, PlayerRelation};
use crate::state::{AttackWho, BattlePlan, BattleTarget, BattleToken, PlayerId, TokenAttributes, TokenId};

use super::geometry::distance;

/// Whether `policy` matches `token`.
pub fn will_target(policy: BattleTarget, token: &BattleToken) -> bool {
    let attributes = token.attributes;
    match policy {
        BattleTarget::None => false,
        BattleTarget::Any => true,
        BattleTarget::Starbase => attributes.contains(TokenAttributes::STARBASE),
        BattleTarget::ArmedShips => attributes.contains(TokenAttributes::ARMED),
        BattleTarget::UnarmedShips => attributes.contains(TokenAttributes::UNARMED),
        BattleTarget::Freighters => attributes.contains(TokenAttributes::FREIGHTER),
        BattleTarget::FuelTransports => attributes.contains(TokenAttributes::FUEL_TRANSPORT),
        BattleTarget::BombersFreighters => {
            attributes.intersects(TokenAttributes::BOMBER | TokenAttributes::FREIGHTER)
        }
    }
}

/// Whether `attacker`, flying `plan`, opens fire on ships of `defender`.
pub fn would_attack(
    players: &(impl PlayerOracle + ?Sized),
    attacker: PlayerId,
    plan: &BattlePlan,
    defender: PlayerId,
) -> bool {
    if attacker == defender {
        return false;
    }
    match players.relation(attacker, defender) {
        PlayerRelation::Enemy => true,
        PlayerRelation::Neutral => plan.attack_who == AttackWho::EnemiesAndNeutrals,
        PlayerRelation::Own | PlayerRelation::Friend => false,
    }
}

/// Living tokens `shooter` may legally fire on, in preference order.
///
/// Tokens matching the primary policy come first, then those matching only
/// the secondary one. Inside each group the weakest stack (lowest
/// effective hit points) leads, then the nearest, then insertion order.
/// With `range` set, only tokens within that many squares are kept.
pub fn select_targets(
    shooter: &BattleToken,
    tokens: &[BattleToken],
    players: &(impl PlayerOracle + ?Sized),
    range: Option<u32>,
) -> Vec<TokenId> {
    let candidates: Vec<&BattleToken> = tokens
        .iter()
        .filter(|target| target.id != shooter.id && target.is_alive())
        .filter(|target| would_attack(players, shooter.player, &shooter.plan, target.player))
        .filter(|target| range.is_none_or(|range| distance(shooter.position, target.position) <= range))
        .collect();

    let [primary, secondary] = shooter.plan.policies();

    let mut first: Vec<&BattleToken> = candidates
        .iter()
        .copied()
        .filter(|target| will_target(primary, target))
        .collect();
    let mut second: Vec<&BattleToken> = candidates
        .iter()
        .copied()
        .filter(|target| !will_target(primary, target) && will_target(secondary, target))
        .collect();

    first.sort_by(|a, b| target_order(shooter, a, b));
    second.sort_by(|a, b| target_order(shooter, a, b));

    first.into_iter().chain(second).map(|target| target.id).collect()
}

/// True when `shooter` has at least one legal target anywhere on the board.
pub fn has_legal_target(
    shooter: &BattleToken,
    tokens: &[BattleToken],
    players: &(impl PlayerOracle + ?Sized),
) -> bool {
    !select_targets(shooter, tokens, players, None).is_empty()
}

fn target_order(shooter: &BattleToken, a: &BattleToken, b: &BattleToken) -> Ordering {
    a.effective_hit_points()
        .total_cmp(&b.effective_hit_points())
        .then_with(|| distance(shooter.position, a.position).cmp(&distance(shooter.position, b.position)))
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PlayerTable;
    use crate::state::Position;

    fn token(id: u32, player: u32, attributes: TokenAttributes) -> BattleToken {
        BattleToken::new(TokenId(id), PlayerId(player), 1, 20.0).with_attributes(attributes)
    }

    #[test]
    fn will_target_grid() {
        use BattleTarget::*;

        let cases = [
            (TokenAttributes::ARMED, Any, true),
            (TokenAttributes::ARMED, None, false),
            (TokenAttributes::ARMED, Starbase, false),
            (TokenAttributes::ARMED, ArmedShips, true),
            (TokenAttributes::ARMED, BombersFreighters, false),
            (TokenAttributes::ARMED, UnarmedShips, false),
            (TokenAttributes::ARMED, FuelTransports, false),
            (TokenAttributes::ARMED, Freighters, false),
            (TokenAttributes::STARBASE, Any, true),
            (TokenAttributes::STARBASE, None, false),
            (TokenAttributes::STARBASE, Starbase, true),
            (TokenAttributes::STARBASE, ArmedShips, false),
            (TokenAttributes::STARBASE, BombersFreighters, false),
            (TokenAttributes::STARBASE, UnarmedShips, false),
            (TokenAttributes::STARBASE, FuelTransports, false),
            (TokenAttributes::STARBASE, Freighters, false),
        ];

        for (attributes, policy, expected) in cases {
            assert_eq!(
                will_target(policy, &token(0, 1, attributes)),
                expected,
                "{policy} vs {attributes:?}"
            );
        }
    }

    #[test]
    fn armed_starbase_is_targeted_as_armed_or_starbase_only() {
        use BattleTarget::*;

        let fort = token(0, 1, TokenAttributes::ARMED | TokenAttributes::STARBASE);
        let cases = [
            (Any, true),
            (None, false),
            (Starbase, true),
            (ArmedShips, true),
            (BombersFreighters, false),
            (UnarmedShips, false),
            (FuelTransports, false),
            (Freighters, false),
        ];

        for (policy, expected) in cases {
            assert_eq!(will_target(policy, &fort), expected, "{policy}");
        }
        assert!(will_target(Any, &token(1, 1, TokenAttributes::empty())));
    }

    #[test]
    fn bombers_freighters_matches_either_role() {
        assert!(will_target(
            BattleTarget::BombersFreighters,
            &token(0, 1, TokenAttributes::UNARMED | TokenAttributes::FREIGHTER)
        ));
        assert!(will_target(
            BattleTarget::BombersFreighters,
            &token(0, 1, TokenAttributes::ARMED | TokenAttributes::BOMBER)
        ));
    }

    #[test]
    fn neutrals_only_attacked_on_request() {
        let players =
            PlayerTable::new().with_relation(PlayerId(1), PlayerId(2), PlayerRelation::Neutral);
        let plan = BattlePlan::new();

        assert!(!would_attack(&players, PlayerId(1), &plan, PlayerId(2)));
        assert!(would_attack(
            &players,
            PlayerId(1),
            &plan.with_attack_who(AttackWho::EnemiesAndNeutrals),
            PlayerId(2)
        ));
        assert!(!would_attack(&players, PlayerId(1), &plan, PlayerId(1)));
    }

    #[test]
    fn friends_are_never_attacked() {
        let players = PlayerTable::new().with_alliance(PlayerId(1), PlayerId(2));
        let plan = BattlePlan::new().with_attack_who(AttackWho::EnemiesAndNeutrals);

        assert!(!would_attack(&players, PlayerId(1), &plan, PlayerId(2)));
    }

    #[test]
    fn primary_policy_outranks_weaker_secondary_targets() {
        let players = PlayerTable::new();
        let shooter = token(0, 1, TokenAttributes::ARMED);
        let tokens = vec![
            shooter.clone(),
            // Weak freighter only matches the secondary policy.
            BattleToken::new(TokenId(1), PlayerId(2), 1, 5.0)
                .with_attributes(TokenAttributes::UNARMED | TokenAttributes::FREIGHTER),
            BattleToken::new(TokenId(2), PlayerId(2), 3, 50.0)
                .with_attributes(TokenAttributes::ARMED),
            BattleToken::new(TokenId(3), PlayerId(2), 1, 50.0)
                .with_attributes(TokenAttributes::ARMED),
        ];

        let targets = select_targets(&shooter, &tokens, &players, None);

        assert_eq!(targets, vec![TokenId(3), TokenId(2), TokenId(1)]);
    }

    #[test]
    fn ties_break_on_distance_then_insertion_order() {
        let players = PlayerTable::new();
        let shooter = token(0, 1, TokenAttributes::ARMED).at(Position::new(0, 0));
        let tokens = vec![
            shooter.clone(),
            token(1, 2, TokenAttributes::ARMED).at(Position::new(3, 0)),
            token(2, 2, TokenAttributes::ARMED).at(Position::new(1, 1)),
            token(3, 2, TokenAttributes::ARMED).at(Position::new(1, 0)),
        ];

        let targets = select_targets(&shooter, &tokens, &players, None);
        assert_eq!(targets, vec![TokenId(2), TokenId(3), TokenId(1)]);

        let in_reach = select_targets(&shooter, &tokens, &players, Some(1));
        assert_eq!(in_reach, vec![TokenId(2), TokenId(3)]);
    }

    #[test]
    fn dead_and_friendly_tokens_are_skipped() {
        let players = PlayerTable::new();
        let shooter = token(0, 1, TokenAttributes::ARMED);
        let mut dead = token(1, 2, TokenAttributes::ARMED);
        dead.quantity = 0;
        let tokens = vec![shooter.clone(), dead, token(2, 1, TokenAttributes::ARMED)];

        assert!(!has_legal_target(&shooter, &tokens, &players));
    }
}
