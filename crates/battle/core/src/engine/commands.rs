//! Player input commands and the pending selection they build up.

use crate::action::{ActionId, TargetSelection};

/// Input from the presentation layer for the current combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// Pick an action from the current combatant's loadout.
    SelectAction(ActionId),
    /// Pick a combatant, or the whole qualifying faction.
    SelectTarget(TargetSelection),
    /// Resolve the selection and end the turn.
    Confirm,
}

/// Action and target chosen so far this turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingSelection {
    pub action: Option<ActionId>,
    pub target: Option<TargetSelection>,
}

impl PendingSelection {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
