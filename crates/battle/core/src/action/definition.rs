//! Immutable action definitions authored in the content store.

use std::fmt;

use crate::stats::StatKind;

/// Content identifier of an action (e.g. `"power_strike"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActionId(pub String);

impl ActionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActionId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Which combatants an action may be aimed at, relative to the actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetType {
    SingleEnemy,
    SingleAlly,
    AllAllies,
    AllEnemies,
}

impl TargetType {
    /// Returns true if the action hits every living member of a faction.
    pub const fn is_group(self) -> bool {
        matches!(self, Self::AllAllies | Self::AllEnemies)
    }

    /// Returns true if targets must belong to the actor's faction.
    pub const fn targets_own_faction(self) -> bool {
        matches!(self, Self::SingleAlly | Self::AllAllies)
    }
}

/// What an action does, carrying only the numbers that kind needs.
#[derive(Clone, Debug, PartialEq, strum::EnumDiscriminants)]
#[strum_discriminants(name(ActionKind), derive(Hash, strum::Display))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionEffect {
    /// d20 hit check, then damage drawn from `[min_damage, max_damage]`.
    Attack { min_damage: f64, max_damage: f64 },

    /// Always lands; amount drawn from `[min_heal, max_heal]`.
    Heal { min_heal: f64, max_heal: f64 },

    /// Adds `+magnitude` to `stat` for `duration_turns` owner turns.
    Buff {
        stat: StatKind,
        magnitude: f64,
        duration_turns: f64,
    },

    /// Adds `-magnitude` to `stat` for `duration_turns` owner turns.
    Debuff {
        stat: StatKind,
        magnitude: f64,
        duration_turns: f64,
    },
}

/// Errors found while validating authored definitions.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum DefinitionError {
    #[error("action '{action}': range {min}..{max} is invalid")]
    InvalidRange { action: ActionId, min: f64, max: f64 },

    #[error("action '{action}': cooldown {value} must be a non-negative number")]
    InvalidCooldown { action: ActionId, value: f64 },

    #[error("action '{action}': duration {value} must be a non-negative number")]
    InvalidDuration { action: ActionId, value: f64 },

    #[error("action '{action}': magnitude {value} must be a non-negative number")]
    InvalidMagnitude { action: ActionId, value: f64 },
}

impl crate::error::BattleError for DefinitionError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        crate::error::ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRange { .. } => "DEFINITION_INVALID_RANGE",
            Self::InvalidCooldown { .. } => "DEFINITION_INVALID_COOLDOWN",
            Self::InvalidDuration { .. } => "DEFINITION_INVALID_DURATION",
            Self::InvalidMagnitude { .. } => "DEFINITION_INVALID_MAGNITUDE",
        }
    }
}

/// One authored action. Never mutated at runtime.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionDefinition {
    pub id: ActionId,
    pub name: String,
    pub target_type: TargetType,
    pub effect: ActionEffect,
    /// Owner turns before the action can be used again. Rounded half-up.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown_turns: f64,
}

impl ActionDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        target_type: TargetType,
        effect: ActionEffect,
    ) -> Self {
        Self {
            id: ActionId(id.into()),
            name: name.into(),
            target_type,
            effect,
            cooldown_turns: 0.0,
        }
    }

    pub fn with_cooldown(mut self, cooldown_turns: f64) -> Self {
        self.cooldown_turns = cooldown_turns;
        self
    }

    pub fn kind(&self) -> ActionKind {
        ActionKind::from(&self.effect)
    }

    /// Checks the authored numbers before a definition enters a catalog.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        let non_negative = |value: f64| value.is_finite() && value >= 0.0;

        if !non_negative(self.cooldown_turns) {
            return Err(DefinitionError::InvalidCooldown {
                action: self.id.clone(),
                value: self.cooldown_turns,
            });
        }

        match self.effect {
            ActionEffect::Attack {
                min_damage: min,
                max_damage: max,
            }
            | ActionEffect::Heal {
                min_heal: min,
                max_heal: max,
            } => {
                if !non_negative(min) || !non_negative(max) || min > max {
                    return Err(DefinitionError::InvalidRange {
                        action: self.id.clone(),
                        min,
                        max,
                    });
                }
            }
            ActionEffect::Buff {
                magnitude,
                duration_turns,
                ..
            }
            | ActionEffect::Debuff {
                magnitude,
                duration_turns,
                ..
            } => {
                if !non_negative(magnitude) {
                    return Err(DefinitionError::InvalidMagnitude {
                        action: self.id.clone(),
                        value: magnitude,
                    });
                }
                if !non_negative(duration_turns) {
                    return Err(DefinitionError::InvalidDuration {
                        action: self.id.clone(),
                        value: duration_turns,
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_effect_variant() {
        let heal = ActionDefinition::new(
            "mend",
            "Mend",
            TargetType::SingleAlly,
            ActionEffect::Heal {
                min_heal: 5.0,
                max_heal: 8.0,
            },
        );
        assert_eq!(heal.kind(), ActionKind::Heal);
        assert_eq!(heal.kind().to_string(), "Heal");
    }

    #[test]
    fn validation_rejects_inverted_ranges() {
        let broken = ActionDefinition::new(
            "broken",
            "Broken",
            TargetType::SingleEnemy,
            ActionEffect::Attack {
                min_damage: 9.0,
                max_damage: 3.0,
            },
        );
        assert!(matches!(
            broken.validate(),
            Err(DefinitionError::InvalidRange { .. })
        ));
    }

    #[test]
    fn validation_rejects_negative_cooldown_and_magnitude() {
        let cooldown = ActionDefinition::new(
            "rush",
            "Rush",
            TargetType::SingleEnemy,
            ActionEffect::Attack {
                min_damage: 1.0,
                max_damage: 2.0,
            },
        )
        .with_cooldown(-1.0);
        assert!(matches!(
            cooldown.validate(),
            Err(DefinitionError::InvalidCooldown { .. })
        ));

        let magnitude = ActionDefinition::new(
            "hex",
            "Hex",
            TargetType::SingleEnemy,
            ActionEffect::Debuff {
                stat: StatKind::Defense,
                magnitude: -5.0,
                duration_turns: 2.0,
            },
        );
        assert!(matches!(
            magnitude.validate(),
            Err(DefinitionError::InvalidMagnitude { .. })
        ));
    }

    #[test]
    fn target_type_helpers() {
        assert!(TargetType::AllEnemies.is_group());
        assert!(!TargetType::SingleAlly.is_group());
        assert!(TargetType::AllAllies.targets_own_faction());
        assert!(!TargetType::SingleEnemy.targets_own_faction());
    }
}
