//! Combat resolution.
//!
//! Pure functions over the token arena: geometry, target selection, the two
//! damage algorithms and shield recovery. Nothing here owns state; the
//! engine passes tokens in and records what comes back.
//!
//! # Core Functions
//!
//! - `select_targets`: legal targets in preference order
//! - `fire_beam`: pooled beam damage with range falloff and spillover
//! - `fire_torpedoes`: per-shot accuracy rolls, shield split
//! - `regenerate_shields`: end-of-round shield recovery

pub mod beam;
pub mod geometry;
pub mod shields;
pub mod targeting;
pub mod torpedo;

pub use beam::{BeamHit, apply_beam_damage, falloff_percent, fire_beam};
pub use geometry::{distance, in_range, step_away, step_toward};
pub use shields::regenerate_shields;
pub use targeting::{has_legal_target, select_targets, will_target, would_attack};
pub use torpedo::{TorpedoHit, apply_torpedo_hit, fire_torpedoes};

use crate::state::{BattleToken, Position, TokenId};

/// Snapshot of the firing stack taken before a volley.
///
/// Kept separate from the token so the arena can be borrowed mutably while
/// the shot resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shooter {
    pub token: TokenId,
    pub position: Position,
    /// Living ships in the firing stack.
    pub ships: u32,
}

impl Shooter {
    pub fn of(token: &BattleToken) -> Self {
        Self {
            token: token.id,
            position: token.position,
            ships: token.quantity,
        }
    }
}
