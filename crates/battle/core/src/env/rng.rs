//! Deterministic randomness for torpedo accuracy rolls.
//!
//! The engine never owns global RNG state. Callers hand in an [`RngOracle`]
//! and a battle seed; every roll is derived from (seed, roll counter, firing
//! token, context), so a battle replays bit-for-bit from the same inputs and
//! independent battles can run in parallel without sharing anything.

use crate::state::TokenId;

/// Stateless source of pseudo-random numbers.
///
/// Implementations must return the same value for the same seed.
pub trait RngOracle: Send + Sync {
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }
}

/// PCG-XSH-RR generator: 64-bit LCG state, 32-bit permuted output.
///
/// See <https://www.pcg-random.org/>.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Mixes the battle seed with a roll counter, the firing token and a
/// context value into a per-roll seed (SplitMix64-style finalizer).
pub fn compute_seed(battle_seed: u64, nonce: u64, token: TokenId, context: u32) -> u64 {
    let mut hash = battle_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (token.0 as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Roll stream for one battle.
///
/// Wraps an oracle with the battle seed and a monotonically increasing roll
/// counter. Two dice built from the same oracle and seed yield the same
/// sequence for the same sequence of calls.
pub struct BattleDice<'a> {
    rng: &'a (dyn RngOracle + 'a),
    seed: u64,
    rolls: u64,
}

impl<'a> BattleDice<'a> {
    /// Context tag for torpedo accuracy rolls.
    pub const TORPEDO_ACCURACY: u32 = 1;

    pub fn new(rng: &'a (dyn RngOracle + 'a), seed: u64) -> Self {
        Self {
            rng,
            seed,
            rolls: 0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of rolls drawn so far.
    pub fn rolls(&self) -> u64 {
        self.rolls
    }

    pub fn roll_d100(&mut self, token: TokenId, context: u32) -> u32 {
        let seed = compute_seed(self.seed, self.rolls, token, context);
        self.rolls += 1;
        self.rng.roll_d100(seed)
    }

    /// Succeeds with `percent`% probability.
    ///
    /// 0% and 100% are decided without consuming a roll, so certain shots
    /// never perturb the stream.
    pub fn chance(&mut self, token: TokenId, context: u32, percent: u32) -> bool {
        if percent == 0 {
            return false;
        }
        if percent >= 100 {
            return true;
        }
        self.roll_d100(token, context) <= percent
    }
}
