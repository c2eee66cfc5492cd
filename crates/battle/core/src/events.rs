//! Events emitted for the presentation layer.
//!
//! Every engine call returns the events it produced, in order. The engine
//! never calls back into presentation code.

use crate::combat::ActionResult;
use crate::engine::BattleOutcome;
use crate::state::CombatantId;
use crate::stats::StatKind;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    /// A combatant's turn began.
    TurnStarted { combatant: CombatantId, round: u32 },

    /// One target's result of a resolved action.
    ActionResolved(ActionResult),

    /// A combatant's health reached zero.
    CombatantDied { combatant: CombatantId },

    /// A modifier ran out at the end of its owner's turn.
    ModifierExpired {
        combatant: CombatantId,
        stat: StatKind,
        magnitude: f64,
    },

    /// The battle reached its terminal outcome. Emitted exactly once.
    BattleEnded { outcome: BattleOutcome },
}

impl BattleEvent {
    pub fn as_result(&self) -> Option<&ActionResult> {
        match self {
            Self::ActionResolved(result) => Some(result),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::BattleEnded { .. })
    }
}
