/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Multiplier applied to damage and healing on a natural 20.
    pub crit_multiplier: u32,

    /// Sides of the die added to speed when rolling initiative.
    pub initiative_die: u32,

    /// Maximum number of combatants per faction.
    pub max_party_size: usize,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_ACTION_SLOTS: usize = 6;

    // ===== fixed rules =====
    pub const D20_SIDES: u32 = 20;
    pub const CRITICAL_FAIL_ROLL: u32 = 1;
    pub const CRITICAL_ROLL: u32 = 20;
    pub const MIN_SPEED: f64 = 0.1;
    pub const MIN_MAX_HEALTH: f64 = 1.0;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CRIT_MULTIPLIER: u32 = 2;
    pub const DEFAULT_INITIATIVE_DIE: u32 = 8;
    pub const DEFAULT_MAX_PARTY_SIZE: usize = 4;

    pub fn new() -> Self {
        Self {
            crit_multiplier: Self::DEFAULT_CRIT_MULTIPLIER,
            initiative_die: Self::DEFAULT_INITIATIVE_DIE,
            max_party_size: Self::DEFAULT_MAX_PARTY_SIZE,
        }
    }

    pub fn with_max_party_size(mut self, max_party_size: usize) -> Self {
        self.max_party_size = max_party_size;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
