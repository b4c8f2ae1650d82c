//! Battle participants, per-battle combat state and the battle record.
//!
//! Participants ([`Location`], [`Fleet`], [`ShipStack`]) are owned by the
//! caller and only touched at write-back. Tokens and weapon slots are built
//! fresh for each battle and discarded afterwards; the [`BattleRecord`]
//! outlives them for replay and intel.
mod common;
mod fleet;
mod plan;
mod record;
mod token;
mod weapon;

pub use common::{DesignId, FleetId, MapCoords, PlayerId, Position, TokenId};
pub use fleet::{Fleet, FleetKind, Location, ShipStack};
pub use plan::{AttackWho, BattlePlan, BattleTactic, BattleTarget};
pub use record::{
    BattleAction, BattleRecord, BattleRecordToken, BattleRound, BeamFire, TokenMove,
    TokenSnapshot, TorpedoFire,
};
pub use token::{BattleToken, TokenAttributes, TokenOrigin};
pub use weapon::{BattleWeaponSlot, WeaponKind};
