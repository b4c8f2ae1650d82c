//! Traits describing read-only collaborator data.
//!
//! Oracles expose the design database, the diplomacy table and the random
//! source. The [`Env`] aggregate bundles them so the engine can reach
//! everything it needs without coupling to concrete storage.
mod designs;
mod error;
mod players;
mod rng;
mod tables;

pub use designs::{DesignOracle, ShipDesign, WeaponSpec};
pub use error::OracleError;
pub use players::{PlayerOracle, PlayerRelation, PlayerTraits};
pub use rng::{BattleDice, PcgRng, RngOracle, compute_seed};
pub use tables::{DesignTable, PlayerEntry, PlayerTable, RelationEntry};

/// Aggregates the read-only oracles a battle reads from.
pub struct Env<'a, D, P, R>
where
    D: DesignOracle + ?Sized,
    P: PlayerOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    designs: Option<&'a D>,
    players: Option<&'a P>,
    rng: Option<&'a R>,
}

// Manual impls: derives would demand `D: Clone`, which trait objects never are.
impl<D, P, R> Clone for Env<'_, D, P, R>
where
    D: DesignOracle + ?Sized,
    P: PlayerOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<D, P, R> Copy for Env<'_, D, P, R>
where
    D: DesignOracle + ?Sized,
    P: PlayerOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

pub type BattleEnv<'a> = Env<'a, dyn DesignOracle + 'a, dyn PlayerOracle + 'a, dyn RngOracle + 'a>;

impl<'a, D, P, R> Env<'a, D, P, R>
where
    D: DesignOracle + ?Sized,
    P: PlayerOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(designs: Option<&'a D>, players: Option<&'a P>, rng: Option<&'a R>) -> Self {
        Self {
            designs,
            players,
            rng,
        }
    }

    pub fn with_all(designs: &'a D, players: &'a P, rng: &'a R) -> Self {
        Self::new(Some(designs), Some(players), Some(rng))
    }

    pub fn empty() -> Self {
        Self {
            designs: None,
            players: None,
            rng: None,
        }
    }

    /// Returns the DesignOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::DesignsNotAvailable` if no design oracle was provided.
    pub fn designs(&self) -> Result<&'a D, OracleError> {
        self.designs.ok_or(OracleError::DesignsNotAvailable)
    }

    /// Returns the PlayerOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::PlayersNotAvailable` if no player oracle was provided.
    pub fn players(&self) -> Result<&'a P, OracleError> {
        self.players.ok_or(OracleError::PlayersNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl<'a, D, P, R> Env<'a, D, P, R>
where
    D: DesignOracle + 'a,
    P: PlayerOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based [`BattleEnv`].
    pub fn into_battle_env(self) -> BattleEnv<'a> {
        let designs: Option<&'a dyn DesignOracle> = self.designs.map(|designs| designs as _);
        let players: Option<&'a dyn PlayerOracle> = self.players.map(|players| players as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(designs, players, rng)
    }
}
