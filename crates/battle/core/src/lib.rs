//! Deterministic encounter rules for party-vs-party turn-based combat.
//!
//! `battle-core` owns the battle state and every rule that changes it: stats
//! and modifiers, cooldowns, d20 action resolution, initiative and the
//! victory check. It performs no I/O. Content comes in through
//! [`env::ActionCatalog`] and [`env::CharacterTemplate`], randomness through
//! [`env::RandomSource`], and every mutation flows through
//! [`engine::BattleSession`], which returns the [`events::BattleEvent`]s it
//! produced.
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod events;
pub mod policy;
pub mod state;
pub mod stats;

pub use action::{
    ActionDefinition, ActionEffect, ActionError, ActionId, ActionKind, DefinitionError,
    TargetSelection, TargetType,
};
pub use combat::{ActionResult, AttackRoll, ResultKind};
pub use config::BattleConfig;
pub use engine::{
    BattleOutcome, BattleSession, Command, PendingSelection, SessionError, TurnScheduler,
};
pub use env::{
    ActionCatalog, CharacterClass, CharacterTemplate, PcgRandom, RandomSource, Rank,
    ScriptedRandom,
};
pub use error::{BattleError, ErrorSeverity};
pub use events::BattleEvent;
pub use policy::{ActionPolicy, Decision, FirstReadyPolicy};
pub use state::{Combatant, CombatantId, Faction, Roster};
pub use stats::{ActiveModifier, BaseStats, CooldownTracker, ModifierSet, StatKind};
