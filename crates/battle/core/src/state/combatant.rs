use arrayvec::ArrayVec;

use crate::action::{ActionDefinition, ActionId};
use crate::config::BattleConfig;
use crate::stats::{
    ActiveModifier, BaseStats, CooldownTracker, ModifierSet, StatKind, effective_stat,
};

use super::{CombatantId, Faction};

/// One participant of a battle session.
///
/// Current health is kept inside `[0, effective Health]` by every mutator,
/// so the invariant holds between any two engine calls.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub faction: Faction,
    pub base: BaseStats,
    current_health: f64,
    modifiers: ModifierSet,
    cooldowns: CooldownTracker,
    loadout: ArrayVec<ActionDefinition, { BattleConfig::MAX_ACTION_SLOTS }>,
}

impl Combatant {
    /// Creates a combatant at full health with an empty loadout.
    pub fn new(
        id: CombatantId,
        name: impl Into<String>,
        faction: Faction,
        base: BaseStats,
    ) -> Self {
        let mut combatant = Self {
            id,
            name: name.into(),
            faction,
            base,
            current_health: base.max_health,
            modifiers: ModifierSet::new(),
            cooldowns: CooldownTracker::new(),
            loadout: ArrayVec::new(),
        };
        combatant.clamp_health();
        combatant
    }

    /// Adds an action to the loadout. Extra actions beyond the slot limit are dropped.
    pub fn with_action(mut self, action: ActionDefinition) -> Self {
        if self.loadout.try_push(action).is_err() {
            tracing::warn!(combatant = %self.name, "action slots full, ignoring action");
        }
        self
    }

    /// Overrides current health (clamped), e.g. to stage a wounded combatant.
    pub fn with_health(mut self, health: f64) -> Self {
        self.current_health = health;
        self.clamp_health();
        self
    }

    // ===== queries =====

    pub fn current_health(&self) -> f64 {
        self.current_health
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0.0
    }

    pub fn effective(&self, stat: StatKind) -> f64 {
        effective_stat(&self.base, &self.modifiers, stat)
    }

    pub fn max_health(&self) -> f64 {
        self.effective(StatKind::Health)
    }

    pub fn modifiers(&self) -> &ModifierSet {
        &self.modifiers
    }

    pub fn cooldowns(&self) -> &CooldownTracker {
        &self.cooldowns
    }

    pub fn loadout(&self) -> &[ActionDefinition] {
        &self.loadout
    }

    pub fn action(&self, id: &ActionId) -> Option<&ActionDefinition> {
        self.loadout.iter().find(|action| &action.id == id)
    }

    pub fn is_available(&self, action: &ActionDefinition) -> bool {
        self.cooldowns.is_available(action)
    }

    // ===== mutators (resolver / trackers only) =====

    /// Subtracts damage, floored at zero. Returns true if this blow was fatal.
    pub(crate) fn take_damage(&mut self, damage: f64) -> bool {
        let was_alive = self.is_alive();
        self.current_health = (self.current_health - damage).max(0.0);
        was_alive && !self.is_alive()
    }

    /// Adds healing, capped at effective max health.
    pub(crate) fn heal(&mut self, amount: f64) {
        self.current_health = (self.current_health + amount).min(self.max_health());
    }

    pub(crate) fn apply_modifier(&mut self, stat: StatKind, magnitude: f64, duration: f64) -> u32 {
        let turns = self.modifiers.apply(stat, magnitude, duration);
        self.clamp_health();
        turns
    }

    pub(crate) fn mark_used(&mut self, action: &ActionDefinition) {
        self.cooldowns.mark_used(action);
    }

    /// Advances both trackers once, at the end of this combatant's own turn.
    pub(crate) fn advance_owner_turn(&mut self) -> Vec<ActiveModifier> {
        let expired = self.modifiers.advance_owner_turn();
        self.cooldowns.advance_owner_turn();
        self.clamp_health();
        expired
    }

    fn clamp_health(&mut self) {
        self.current_health = self.current_health.clamp(0.0, self.max_health());
    }
}
