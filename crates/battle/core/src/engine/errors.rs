//! Errors raised while setting up or resolving a battle.

use crate::env::OracleError;
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::state::{DesignId, PlayerId};

/// Errors surfaced by [`BattleEngine`](super::BattleEngine).
///
/// Every variant is raised before the first round; a battle either
/// resolves completely or leaves the location untouched.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleError {
    #[error("oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("battle {} has no ships", .context.battle)]
    NoParticipants { context: ErrorContext },

    #[error("{design} of player {player} not found (battle {})", .context.battle)]
    DesignNotFound {
        player: PlayerId,
        design: DesignId,
        context: ErrorContext,
    },

    #[error("stack claims {quantity_damaged} damaged ships out of {quantity} (battle {})", .context.battle)]
    InvalidStack {
        quantity: u32,
        quantity_damaged: u32,
        context: ErrorContext,
    },
}

impl BattleError {
    pub(crate) fn no_participants(battle: u32) -> Self {
        Self::NoParticipants {
            context: ErrorContext::new(battle),
        }
    }

    pub(crate) fn design_not_found(player: PlayerId, design: DesignId, context: ErrorContext) -> Self {
        Self::DesignNotFound {
            player,
            design,
            context,
        }
    }
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        use BattleError::*;
        match self {
            Oracle(error) => error.severity(),
            NoParticipants { .. } | DesignNotFound { .. } | InvalidStack { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        use BattleError::*;
        match self {
            Oracle(_) => None,
            NoParticipants { context }
            | DesignNotFound { context, .. }
            | InvalidStack { context, .. } => Some(context),
        }
    }

    fn error_code(&self) -> &'static str {
        use BattleError::*;
        match self {
            Oracle(error) => error.error_code(),
            NoParticipants { .. } => "BATTLE_NO_PARTICIPANTS",
            DesignNotFound { .. } => "BATTLE_DESIGN_NOT_FOUND",
            InvalidStack { .. } => "BATTLE_INVALID_STACK",
        }
    }
}
