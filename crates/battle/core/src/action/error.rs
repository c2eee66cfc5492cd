//! Action selection and resolution errors.

use crate::error::{BattleError, ErrorSeverity};
use crate::state::CombatantId;

use super::{ActionId, TargetType};

/// Errors raised while selecting or resolving an action.
///
/// Every variant is produced before any combatant is mutated.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    /// Target fails the action's targeting rule.
    #[error("invalid target {target:?} for {target_type} action '{action}'")]
    InvalidTarget {
        action: ActionId,
        target_type: TargetType,
        target: Option<CombatantId>,
    },

    /// Action is on cooldown for the acting combatant.
    #[error("action '{action}' is on cooldown for {remaining} more turn(s)")]
    ActionUnavailable { action: ActionId, remaining: u32 },

    #[error("no action selected")]
    NoActionSelected,

    #[error("no target selected")]
    NoTargetSelected,

    /// The battle already reached a terminal outcome.
    #[error("battle has already ended")]
    BattleEnded,

    /// Action id is not in the acting combatant's loadout.
    #[error("combatant {actor} has no action '{action}'")]
    UnknownAction { actor: CombatantId, action: ActionId },

    #[error("combatant {0} not found in roster")]
    UnknownCombatant(CombatantId),

    /// The current combatant already acted this turn.
    #[error("combatant {0} already acted this turn")]
    AlreadyActed(CombatantId),
}

impl BattleError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            ActionUnavailable { .. } | NoActionSelected | NoTargetSelected => {
                ErrorSeverity::Recoverable
            }
            InvalidTarget { .. } | UnknownAction { .. } | UnknownCombatant(_) => {
                ErrorSeverity::Validation
            }
            BattleEnded | AlreadyActed(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            InvalidTarget { .. } => "ACTION_INVALID_TARGET",
            ActionUnavailable { .. } => "ACTION_UNAVAILABLE",
            NoActionSelected => "ACTION_NONE_SELECTED",
            NoTargetSelected => "ACTION_NO_TARGET_SELECTED",
            BattleEnded => "ACTION_BATTLE_ENDED",
            UnknownAction { .. } => "ACTION_UNKNOWN",
            UnknownCombatant(_) => "ACTION_UNKNOWN_COMBATANT",
            AlreadyActed(_) => "ACTION_ALREADY_ACTED",
        }
    }
}
