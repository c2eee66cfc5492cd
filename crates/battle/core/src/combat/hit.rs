//! d20 hit checks.

use crate::config::BattleConfig;

/// Classification of a single d20 attack roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackRoll {
    /// Natural 1: always misses.
    CriticalFail,
    Miss,
    Hit,
    /// Natural 20: always hits, damage multiplied.
    Critical,
}

impl AttackRoll {
    pub const fn lands(self) -> bool {
        matches!(self, Self::Hit | Self::Critical)
    }
}

/// Check if `roll + attack` meets the defender's defense.
///
/// # Formula
///
/// ```text
/// hit = roll + attack >= defense
/// ```
pub fn check_hit(roll: u32, attack: f64, defense: f64) -> bool {
    f64::from(roll) + attack >= defense
}

/// Classify a d20 roll, applying the natural 1 / natural 20 overrides first.
pub fn classify_attack(roll: u32, attack: f64, defense: f64) -> AttackRoll {
    if roll == BattleConfig::CRITICAL_FAIL_ROLL {
        AttackRoll::CriticalFail
    } else if roll >= BattleConfig::CRITICAL_ROLL {
        AttackRoll::Critical
    } else if check_hit(roll, attack, defense) {
        AttackRoll::Hit
    } else {
        AttackRoll::Miss
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_one_misses_even_against_zero_defense() {
        assert_eq!(classify_attack(1, 100.0, 0.0), AttackRoll::CriticalFail);
        assert!(!AttackRoll::CriticalFail.lands());
    }

    #[test]
    fn natural_twenty_hits_even_against_huge_defense() {
        assert_eq!(classify_attack(20, 0.0, 500.0), AttackRoll::Critical);
        assert!(AttackRoll::Critical.lands());
    }

    #[test]
    fn regular_rolls_compare_against_defense() {
        // 12 + 10 = 22 >= 15
        assert_eq!(classify_attack(12, 10.0, 15.0), AttackRoll::Hit);
        // Ties hit.
        assert_eq!(classify_attack(5, 10.0, 15.0), AttackRoll::Hit);
        assert_eq!(classify_attack(4, 10.0, 15.0), AttackRoll::Miss);
    }
}
