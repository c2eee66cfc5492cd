//! Session construction errors.

use crate::action::ActionId;
use crate::error::{BattleError, ErrorSeverity};
use crate::state::Faction;

/// Errors that prevent a battle session from being created.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionError {
    /// No living combatant to schedule.
    #[error("cannot start a battle without living combatants")]
    EmptyRoster,

    #[error("{faction} party has {count} members (max {max})")]
    PartyTooLarge {
        faction: Faction,
        count: usize,
        max: usize,
    },

    /// A template slot references an action missing from the catalog.
    #[error("character '{character}' references unknown action '{action}'")]
    UnknownAction { character: String, action: ActionId },

    #[error("character '{character}' has negative or non-finite stats")]
    InvalidStats { character: String },
}

impl BattleError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptyRoster => ErrorSeverity::Fatal,
            Self::PartyTooLarge { .. } | Self::UnknownAction { .. } | Self::InvalidStats { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyRoster => "SESSION_EMPTY_ROSTER",
            Self::PartyTooLarge { .. } => "SESSION_PARTY_TOO_LARGE",
            Self::UnknownAction { .. } => "SESSION_UNKNOWN_ACTION",
            Self::InvalidStats { .. } => "SESSION_INVALID_STATS",
        }
    }
}
