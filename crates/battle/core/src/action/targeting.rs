//! Target validation and group expansion.
//!
//! Faction rules:
//! - `SingleEnemy` / `AllEnemies`: targets must oppose the actor's faction
//! - `SingleAlly` / `AllAllies`: targets must share the actor's faction
//!
//! Group actions expand to every living member of the qualifying faction at
//! the moment of resolution. Dead combatants are never valid targets.

use crate::state::{Combatant, CombatantId, Faction, Roster};

use super::{ActionDefinition, ActionError, TargetType};

/// What the caller pointed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetSelection {
    /// A specific combatant.
    Single(CombatantId),
    /// The whole qualifying faction ("all").
    All,
}

/// Faction an action's targets must belong to.
pub fn target_faction(actor: Faction, target_type: TargetType) -> Faction {
    if target_type.targets_own_faction() {
        actor
    } else {
        actor.opposing()
    }
}

/// Every combatant the actor could currently aim `action` at.
pub fn valid_targets(
    roster: &Roster,
    actor: &Combatant,
    action: &ActionDefinition,
) -> Vec<CombatantId> {
    let faction = target_faction(actor.faction, action.target_type);
    roster.living_in(faction).map(|c| c.id).collect()
}

/// Checks `selection` against the action's targeting rule and expands groups.
///
/// Returns the concrete, non-empty list of targets in roster order.
pub fn resolve_targets(
    roster: &Roster,
    actor: &Combatant,
    action: &ActionDefinition,
    selection: TargetSelection,
) -> Result<Vec<CombatantId>, ActionError> {
    let faction = target_faction(actor.faction, action.target_type);
    let invalid = |target: Option<CombatantId>| ActionError::InvalidTarget {
        action: action.id.clone(),
        target_type: action.target_type,
        target,
    };

    if let TargetSelection::Single(id) = selection {
        let target = roster.get(id).ok_or(ActionError::UnknownCombatant(id))?;
        if !target.is_alive() || target.faction != faction {
            return Err(invalid(Some(id)));
        }
        if !action.target_type.is_group() {
            return Ok(vec![id]);
        }
    } else if !action.target_type.is_group() {
        return Err(invalid(None));
    }

    let targets = valid_targets(roster, actor, action);
    if targets.is_empty() {
        return Err(invalid(None));
    }
    Ok(targets)
}
