//! Topic-based event bus for runtime events.
//!
//! Every [`battle_core::BattleEvent`] the session produces is re-published on
//! one of three topics, so consumers subscribe only to what they render.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CombatEvent, OutcomeEvent, TurnEvent};
