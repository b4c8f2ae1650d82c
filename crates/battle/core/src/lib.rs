//! Deterministic fleet battle resolution.
//!
//! `battle-core` resolves combat between the fleets and starbases sharing a
//! map location at the end of a turn. Callers supply the participants, the
//! design and diplomacy oracles and a seed; [`engine::BattleEngine`] runs the
//! round loop, writes casualties back into the fleets and returns a
//! replayable [`state::BattleRecord`]. Identical inputs and seed always give
//! the identical record.
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

pub use config::BattleRules;
pub use engine::{BattleEngine, BattleError, resolve};
pub use env::{
    BattleDice, BattleEnv, DesignOracle, DesignTable, Env, OracleError, PcgRng, PlayerEntry,
    PlayerOracle, PlayerRelation, PlayerTable, PlayerTraits, RelationEntry, RngOracle, ShipDesign,
    WeaponSpec,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use state::{
    AttackWho, BattleAction, BattlePlan, BattleRecord, BattleRecordToken, BattleRound,
    BattleTactic, BattleTarget, BattleToken, BattleWeaponSlot, BeamFire, DesignId, Fleet,
    FleetId, FleetKind, Location, MapCoords, PlayerId, Position, ShipStack, TokenAttributes,
    TokenId, TokenMove, TokenSnapshot, TorpedoFire, WeaponKind,
};
