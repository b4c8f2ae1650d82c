use crate::config::BattleRules;
use crate::env::PlayerTraits;
use crate::state::BattleToken;

/// End-of-round shield recovery. Returns the amount restored.
///
/// Only races with regenerating shields recover, and a pool that has been
/// knocked down to zero stays down.
pub fn regenerate_shields(token: &mut BattleToken, traits: PlayerTraits, rules: &BattleRules) -> f64 {
    if !traits.contains(PlayerTraits::REGENERATING_SHIELDS)
        || !token.is_alive()
        || token.stack_shields <= 0.0
    {
        return 0.0;
    }

    let max = token.max_stack_shields();
    let regen = max * f64::from(rules.shield_regen_percent) / 100.0;
    let before = token.stack_shields;
    token.stack_shields = (before + regen).min(max);
    token.stack_shields - before
}
