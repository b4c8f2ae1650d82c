//! Common error infrastructure for battle-core.
//!
//! Domain errors ([`BattleError`], [`OracleError`]) live next to the code
//! that raises them; this module holds what they share.
//!
//! The engine never retries: every error describes caller-supplied data the
//! engine refuses to resolve, reported once.
//!
//! [`BattleError`]: crate::engine::BattleError
//! [`OracleError`]: crate::env::OracleError

use crate::state::{DesignId, FleetId};

/// Severity level of an error, used for categorization and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input, rejected without side effects.
    ///
    /// Examples: stack referencing an unknown design, empty location
    Validation,

    /// The engine cannot run at all.
    ///
    /// Examples: missing oracle
    Fatal,
}

/// Where in the input an error was found.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Battle number of the location being resolved.
    pub battle: u32,
    pub fleet: Option<FleetId>,
    pub design: Option<DesignId>,
    /// Stack index inside the fleet.
    pub stack: Option<usize>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(battle: u32) -> Self {
        Self {
            battle,
            fleet: None,
            design: None,
            stack: None,
        }
    }

    #[must_use]
    pub const fn with_fleet(mut self, fleet: FleetId) -> Self {
        self.fleet = Some(fleet);
        self
    }

    #[must_use]
    pub const fn with_design(mut self, design: DesignId) -> Self {
        self.design = Some(design);
        self
    }

    #[must_use]
    pub const fn with_stack(mut self, stack: usize) -> Self {
        self.stack = Some(stack);
        self
    }
}

/// Common trait for all battle-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error
/// - Classify severity by what the caller can do about it, not by impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Static identifier for metrics and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
