//! High-level runtime orchestrator.
//!
//! The runtime owns the battle session, asks the right provider for each
//! turn, and republishes every session event on the topic bus. Clients build
//! it through [`RuntimeBuilder`].

use std::env;
use std::time::Duration;

use tokio::sync::broadcast;

use battle_content::{ContentStore, EncounterSpec};
use battle_core::{
    BattleConfig, BattleEvent, BattleOutcome, BattleSession, FirstReadyPolicy, RandomSource,
    Roster,
};

use crate::api::{
    ActionProvider, ChannelProvider, PlayerInput, PolicyProvider, ProviderKind, Result,
    RuntimeError,
};
use crate::events::{CombatEvent, Event, EventBus, Topic};
use crate::rng::ChaChaRandom;

/// Runtime configuration shared across the orchestrator and providers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub battle_config: BattleConfig,
    pub event_buffer_size: usize,
    /// Queued decisions a [`PlayerInput`] can hold before `act` waits.
    pub command_buffer_size: usize,
    /// Pause before each NPC decision.
    pub npc_action_delay: Duration,
    /// Fixed seed for the random source; `None` picks one at build time.
    pub seed: Option<u64>,
    /// Rejected decisions tolerated per turn before the step fails.
    pub max_rejections: usize,
}

impl RuntimeConfig {
    pub const DEFAULT_NPC_ACTION_DELAY: Duration = Duration::from_millis(1250);

    /// Construct configuration from process environment variables.
    ///
    /// - `BATTLE_SEED`
    /// - `BATTLE_NPC_DELAY_MS`
    /// - `BATTLE_EVENT_BUFFER`
    /// - `BATTLE_COMMAND_BUFFER`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64>("BATTLE_SEED") {
            config.seed = Some(seed);
        }

        if let Some(millis) = read_env::<u64>("BATTLE_NPC_DELAY_MS") {
            config.npc_action_delay = Duration::from_millis(millis);
        }

        if let Some(capacity) = read_env::<usize>("BATTLE_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }

        if let Some(capacity) = read_env::<usize>("BATTLE_COMMAND_BUFFER") {
            config.command_buffer_size = capacity.max(1);
        }

        config
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            battle_config: BattleConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            npc_action_delay: Self::DEFAULT_NPC_ACTION_DELAY,
            seed: None,
            max_rejections: 8,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    let raw = env::var(key).ok()?;
    let parsed = raw.parse().ok();
    if parsed.is_none() {
        tracing::warn!(key, value = %raw, "ignoring unparsable environment variable");
    }
    parsed
}

/// Main runtime that drives one battle to its outcome.
pub struct Runtime {
    session: BattleSession,
    config: RuntimeConfig,
    event_bus: EventBus,
    opening_events: Vec<BattleEvent>,

    // Action providers (injected by user)
    player_provider: Option<Box<dyn ActionProvider>>,
    npc_provider: Option<Box<dyn ActionProvider>>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn session(&self) -> &BattleSession {
        &self.session
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Subscribe to events from a specific topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Events the session produced when it started.
    pub fn opening_events(&self) -> &[BattleEvent] {
        &self.opening_events
    }

    pub fn outcome(&self) -> BattleOutcome {
        self.session.outcome()
    }

    /// Plays the current combatant's turn.
    ///
    /// Asks the provider for the combatant's side until the session accepts
    /// a decision. Each rejection is published as
    /// [`CombatEvent::CommandRejected`].
    pub async fn step(&mut self) -> Result<Vec<BattleEvent>> {
        if self.session.is_over() {
            return Err(RuntimeError::BattleOver);
        }
        let actor = self
            .session
            .current_combatant()
            .ok_or(RuntimeError::BattleOver)?;
        let (actor_id, kind) = (actor.id, ProviderKind::for_faction(actor.faction));

        let provider = match kind {
            ProviderKind::Player => self.player_provider.as_mut(),
            ProviderKind::Npc => self.npc_provider.as_mut(),
        }
        .ok_or(RuntimeError::ProviderNotSet { kind })?;

        let attempts = self.config.max_rejections.max(1);
        for _ in 0..attempts {
            let decision = provider.provide_decision(&self.session).await?;
            let result = match decision {
                Some(decision) => {
                    tracing::debug!(
                        actor = %actor_id,
                        action = %decision.action,
                        "decision received"
                    );
                    self.session.apply_decision(decision)
                }
                None => {
                    tracing::debug!(actor = %actor_id, "turn passed");
                    Ok(self.session.complete_turn())
                }
            };

            match result {
                Ok(events) => {
                    publish_all(&self.event_bus, &self.session, &events);
                    return Ok(events);
                }
                Err(err) => {
                    tracing::warn!(actor = %actor_id, %err, "decision rejected");
                    self.event_bus
                        .publish(Event::Combat(CombatEvent::CommandRejected {
                            combatant: actor_id,
                            error: err.to_string(),
                        }));
                }
            }
        }

        Err(RuntimeError::TooManyRejections { kind, attempts })
    }

    /// Run turns until the battle ends.
    pub async fn run(&mut self) -> Result<BattleOutcome> {
        while !self.session.is_over() {
            self.step().await?;
        }
        Ok(self.session.outcome())
    }

    /// Set the player action provider
    pub fn set_player_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.player_provider = Some(Box::new(provider));
    }

    /// Set the NPC action provider
    pub fn set_npc_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.npc_provider = Some(Box::new(provider));
    }
}

fn publish_all(bus: &EventBus, session: &BattleSession, events: &[BattleEvent]) {
    for event in events {
        bus.publish(Event::from_battle(event, session));
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    roster: Option<Roster>,
    rng: Option<Box<dyn RandomSource>>,
    event_bus: Option<EventBus>,
    player_provider: Option<Box<dyn ActionProvider>>,
    npc_provider: Option<Box<dyn ActionProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            roster: None,
            rng: None,
            event_bus: None,
            player_provider: None,
            npc_provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide the combatants directly
    pub fn roster(mut self, roster: Roster) -> Self {
        self.roster = Some(roster);
        self
    }

    /// Stage an encounter from loaded content, adopting the store's rules.
    pub fn encounter(mut self, store: &ContentStore, encounter: &EncounterSpec) -> Result<Self> {
        self.roster = Some(store.build_roster(encounter)?);
        self.config.battle_config = store.config().clone();
        Ok(self)
    }

    /// Replace the seeded ChaCha source, e.g. with a scripted one in tests
    pub fn random_source(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Publish on an existing bus, so subscribers also see the opening events
    pub fn event_bus(mut self, event_bus: EventBus) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    /// Set player action provider (optional)
    pub fn player_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.player_provider = Some(Box::new(provider));
        self
    }

    /// Drive allies from a [`ChannelProvider`] sized by `command_buffer_size`.
    ///
    /// Call after [`RuntimeBuilder::config`] so the configured size applies.
    pub fn player_channel(mut self) -> (Self, PlayerInput) {
        let (provider, input) = ChannelProvider::new(self.config.command_buffer_size);
        self.player_provider = Some(Box::new(provider));
        (self, input)
    }

    /// Set NPC action provider (optional)
    ///
    /// Defaults to [`FirstReadyPolicy`] paced by `npc_action_delay`.
    pub fn npc_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.npc_provider = Some(Box::new(provider));
        self
    }

    /// Start the session and publish its opening events.
    pub fn build(self) -> Result<Runtime> {
        let roster = self.roster.ok_or(RuntimeError::MissingRoster)?;

        let rng = match self.rng {
            Some(rng) => rng,
            None => {
                let rng = match self.config.seed {
                    Some(seed) => ChaChaRandom::seeded(seed),
                    None => ChaChaRandom::from_entropy(),
                };
                tracing::info!(seed = rng.seed(), "random source seeded");
                Box::new(rng)
            }
        };

        let (session, opening_events) =
            BattleSession::start(roster, self.config.battle_config.clone(), rng)?;

        let event_bus = self
            .event_bus
            .unwrap_or_else(|| EventBus::with_capacity(self.config.event_buffer_size));
        publish_all(&event_bus, &session, &opening_events);

        let npc_provider = self.npc_provider.unwrap_or_else(|| {
            Box::new(PolicyProvider::new(FirstReadyPolicy).with_delay(self.config.npc_action_delay))
        });

        Ok(Runtime {
            session,
            config: self.config,
            event_bus,
            opening_events,
            player_provider: self.player_provider,
            npc_provider: Some(npc_provider),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn building_without_roster_fails() {
        assert!(matches!(
            Runtime::builder().build(),
            Err(RuntimeError::MissingRoster)
        ));
    }

    #[test]
    fn defaults_pace_npcs() {
        let config = RuntimeConfig::default();
        assert_eq!(config.npc_action_delay, Duration::from_millis(1250));
        assert_eq!(config.seed, None);
    }
}
