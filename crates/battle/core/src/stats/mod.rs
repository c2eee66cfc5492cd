//! Stat model.
//!
//! A combatant's effective stats are always derived on read:
//!
//! ```text
//! effective = clamp(base + Σ active modifiers of that stat)
//! ```
//!
//! Base stats come from the character template and never change during a
//! battle. Modifiers are owned by the [`ModifierSet`] (buff tracker) and
//! cooldowns by the [`CooldownTracker`]; both advance only when their owner
//! completes a turn.

pub mod cooldowns;
pub mod modifiers;

pub use cooldowns::CooldownTracker;
pub use modifiers::{ActiveModifier, ModifierSet};

use crate::config::BattleConfig;

/// Stats that modifiers can target.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKind {
    Attack,
    Defense,
    /// Maximum health. Current health is clamped into `[0, effective Health]`.
    Health,
    Speed,
}

impl StatKind {
    /// Lower bound applied after modifiers are summed.
    pub const fn floor(self) -> f64 {
        match self {
            Self::Attack | Self::Defense => 0.0,
            Self::Health => BattleConfig::MIN_MAX_HEALTH,
            Self::Speed => BattleConfig::MIN_SPEED,
        }
    }
}

/// Template stats of a combatant. All values are non-negative reals.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub max_health: f64,
    pub attack: f64,
    pub defense: f64,
    pub speed: f64,
}

impl BaseStats {
    pub const fn new(max_health: f64, attack: f64, defense: f64, speed: f64) -> Self {
        Self {
            max_health,
            attack,
            defense,
            speed,
        }
    }

    /// Base value of a single stat.
    pub const fn get(&self, stat: StatKind) -> f64 {
        match stat {
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::Health => self.max_health,
            StatKind::Speed => self.speed,
        }
    }

    /// Scales the combat stats (health, attack, defense) by a rank multiplier.
    /// Speed is left untouched so ranks do not reshuffle initiative.
    pub fn scaled(&self, multiplier: f64) -> Self {
        Self {
            max_health: self.max_health * multiplier,
            attack: self.attack * multiplier,
            defense: self.defense * multiplier,
            speed: self.speed,
        }
    }

    /// Returns true when every stat is a finite non-negative number.
    pub fn is_valid(&self) -> bool {
        [self.max_health, self.attack, self.defense, self.speed]
            .iter()
            .all(|value| value.is_finite() && *value >= 0.0)
    }
}

impl Default for BaseStats {
    /// Default crew stats: 100 health, 10 attack, 5 defense, 5 speed.
    fn default() -> Self {
        Self::new(100.0, 10.0, 5.0, 5.0)
    }
}

/// Sum base plus all modifiers of `stat`, then clamp to the stat's floor.
pub fn effective_stat(base: &BaseStats, modifiers: &ModifierSet, stat: StatKind) -> f64 {
    (base.get(stat) + modifiers.total(stat)).max(stat.floor())
}

/// Standard half-up rounding for non-negative amounts (2.5 → 3).
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use strum::IntoEnumIterator;

    #[test]
    fn effective_stat_sums_modifiers() {
        let base = BaseStats::new(100.0, 10.0, 5.0, 5.0);
        let mut modifiers = ModifierSet::new();
        modifiers.apply(StatKind::Attack, 4.0, 2.0);
        modifiers.apply(StatKind::Attack, 1.5, 1.0);

        assert_eq!(effective_stat(&base, &modifiers, StatKind::Attack), 15.5);
        assert_eq!(effective_stat(&base, &modifiers, StatKind::Defense), 5.0);
    }

    #[test]
    fn defense_debuff_clamps_at_zero() {
        let base = BaseStats::new(100.0, 10.0, 5.0, 5.0);
        let mut modifiers = ModifierSet::new();
        modifiers.apply(StatKind::Defense, -5.0, 2.0);
        assert_eq!(effective_stat(&base, &modifiers, StatKind::Defense), 0.0);

        modifiers.apply(StatKind::Defense, -3.0, 2.0);
        assert_eq!(effective_stat(&base, &modifiers, StatKind::Defense), 0.0);
    }

    #[test]
    fn speed_and_health_have_positive_floors() {
        let base = BaseStats::new(10.0, 0.0, 0.0, 1.0);
        let mut modifiers = ModifierSet::new();
        modifiers.apply(StatKind::Speed, -50.0, 1.0);
        modifiers.apply(StatKind::Health, -50.0, 1.0);

        assert_eq!(effective_stat(&base, &modifiers, StatKind::Speed), 0.1);
        assert_eq!(effective_stat(&base, &modifiers, StatKind::Health), 1.0);
    }

    #[test]
    fn half_up_rounding() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.49), 2.0);
        assert_eq!(round_half_up(0.0), 0.0);
        assert_eq!(round_half_up(7.5), 8.0);
    }

    #[test]
    fn rank_scaling_leaves_speed_alone() {
        let scaled = BaseStats::new(100.0, 10.0, 4.0, 6.0).scaled(1.5);
        assert_eq!(scaled, BaseStats::new(150.0, 15.0, 6.0, 6.0));
    }

    proptest! {
        #[test]
        fn effective_stats_never_drop_below_floor(
            base in (0.0f64..200.0, 0.0f64..50.0, 0.0f64..50.0, 0.0f64..20.0),
            deltas in proptest::collection::vec((0usize..4, -100.0f64..100.0), 0..8),
        ) {
            let base = BaseStats::new(base.0, base.1, base.2, base.3);
            let stats: Vec<StatKind> = StatKind::iter().collect();
            let mut modifiers = ModifierSet::new();
            for (index, magnitude) in deltas {
                modifiers.apply(stats[index], magnitude, 1.0);
            }

            prop_assert!(effective_stat(&base, &modifiers, StatKind::Attack) >= 0.0);
            prop_assert!(effective_stat(&base, &modifiers, StatKind::Defense) >= 0.0);
            prop_assert!(effective_stat(&base, &modifiers, StatKind::Speed) >= 0.1);
            prop_assert!(effective_stat(&base, &modifiers, StatKind::Health) >= 1.0);
        }
    }
}
