//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};

/// Errors raised while reading collaborator data.
///
/// The engine cannot resolve anything without designs, relations or a
/// random source, so every variant is fatal.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("DesignOracle not available")]
    DesignsNotAvailable,

    #[error("PlayerOracle not available")]
    PlayersNotAvailable,

    #[error("RngOracle not available")]
    RngNotAvailable,
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            DesignsNotAvailable => "ORACLE_DESIGNS_NOT_AVAILABLE",
            PlayersNotAvailable => "ORACLE_PLAYERS_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
        }
    }
}
