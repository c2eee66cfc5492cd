//! Runtime orchestration for turn-based party battles.
//!
//! This crate wires the battle engine to asynchronous action providers and a
//! topic-based event bus. Consumers embed [`Runtime`] to play turns, plug in
//! human or automated deciders, and subscribe to what happens.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`rng`] provides the seeded production random source
pub mod api;
pub mod events;
pub mod rng;
pub mod runtime;

pub use api::{
    ActionProvider, ChannelProvider, PlayerInput, PolicyProvider, ProviderKind, Result,
    RuntimeError,
};
pub use events::{CombatEvent, Event, EventBus, OutcomeEvent, Topic, TurnEvent};
pub use rng::ChaChaRandom;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
