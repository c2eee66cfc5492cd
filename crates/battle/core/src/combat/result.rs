//! Per-target result records.

use crate::action::ActionId;
use crate::state::CombatantId;

/// Outcome reported for one target of one action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResultKind {
    Hit,
    CriticalHit,
    Miss,
    Heal,
    CriticalHeal,
    BuffApplied,
    DebuffApplied,
}

/// Result of applying an action to one target.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionResult {
    pub actor: CombatantId,
    pub target: CombatantId,
    pub action: ActionId,
    pub kind: ResultKind,

    /// Damage dealt, health restored, or signed modifier magnitude.
    /// `None` on a miss.
    pub amount: Option<f64>,
}
