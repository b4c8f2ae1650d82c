//! Battle orchestration.
//!
//! The [`BattleEngine`] takes the fleets sharing a location, runs the round
//! loop to completion and writes casualties back into the fleets. A battle
//! moves through `Setup → Round(0) → … → Resolved`:
//!
//! - **Setup** builds tokens and weapon slots from fleets and designs. Any
//!   failure aborts before a single fleet is touched.
//! - **Round** runs movement, fires every weapon slot in initiative order,
//!   regenerates shields and appends a snapshot to the record.
//! - **Resolved** is reached when no armed token can still engage, or when
//!   the round cap is hit.

mod errors;
mod movement;
mod round;
mod setup;

pub use errors::BattleError;

use crate::combat::has_legal_target;
use crate::config::BattleRules;
use crate::env::{BattleDice, BattleEnv};
use crate::state::{BattleRecord, BattleToken, Location};

/// Resolves battles at a location against the given oracles and rules.
pub struct BattleEngine<'a> {
    env: BattleEnv<'a>,
    rules: &'a BattleRules,
}

impl<'a> BattleEngine<'a> {
    pub fn new(env: BattleEnv<'a>, rules: &'a BattleRules) -> Self {
        Self { env, rules }
    }

    pub fn rules(&self) -> &BattleRules {
        self.rules
    }

    /// Runs the battle at `location` and returns its record.
    ///
    /// On success the fleets of `location` carry the post-battle quantity,
    /// damage and shield state of every stack; destroyed stacks stay in
    /// place with a quantity of zero. When nobody present would open fire
    /// the record has no rounds and the location is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`BattleError`] when an oracle is missing, the location holds
    /// no ships, a stack names an unknown design or claims more damaged ships
    /// than it has. The location is untouched in every error case.
    pub fn resolve(&self, location: &mut Location, seed: u64) -> Result<BattleRecord, BattleError> {
        let _span = tracing::info_span!("battle", num = location.num).entered();

        let designs = self.env.designs()?;
        let players = self.env.players()?;
        let rng = self.env.rng()?;

        let mut roster = setup::build_roster(location, self.rules, designs)?;
        let mut record = BattleRecord::new(
            location.num,
            location.planet,
            location.coords,
            seed,
            std::mem::take(&mut roster.entries),
        );

        let hostile = roster
            .tokens
            .iter()
            .any(|token| token.is_armed() && has_legal_target(token, &roster.tokens, players));
        if !hostile {
            tracing::info!(tokens = roster.tokens.len(), "no hostilities, battle skipped");
            return Ok(record);
        }

        tracing::info!(
            tokens = roster.tokens.len(),
            players = record.players.len(),
            seed,
            "battle started"
        );

        let mut dice = BattleDice::new(rng, seed);
        for _ in 0..self.rules.max_rounds {
            if !round::engagement_possible(&roster, players) {
                break;
            }
            let round = round::run_round(
                record.next_round_index(),
                &mut roster,
                players,
                self.rules,
                &mut dice,
            );
            record.push_round(round);
        }

        write_back(location, &roster.tokens);

        tracing::info!(
            rounds = record.rounds().len(),
            rolls = dice.rolls(),
            losses = ?record.losses(),
            "battle resolved"
        );
        Ok(record)
    }
}

/// Resolves the battle at `location`.
///
/// Shorthand for [`BattleEngine::new`] followed by [`BattleEngine::resolve`].
///
/// # Errors
///
/// See [`BattleEngine::resolve`].
pub fn resolve(
    location: &mut Location,
    rules: &BattleRules,
    env: BattleEnv<'_>,
    seed: u64,
) -> Result<BattleRecord, BattleError> {
    BattleEngine::new(env, rules).resolve(location, seed)
}

/// Copies casualties and shield state back onto the originating stacks.
///
/// A full shield pool is stored as `None`.
fn write_back(location: &mut Location, tokens: &[BattleToken]) {
    for token in tokens {
        let Some(stack) = location
            .fleets
            .get_mut(token.origin.fleet_index)
            .and_then(|fleet| fleet.stacks.get_mut(token.origin.stack_index))
        else {
            continue;
        };

        stack.quantity = token.quantity;
        stack.quantity_damaged = token.quantity_damaged;
        stack.damage = token.damage;
        stack.stack_shields =
            (token.stack_shields < token.max_stack_shields()).then_some(token.stack_shields);
    }
}
