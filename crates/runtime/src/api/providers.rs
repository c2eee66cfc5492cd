//! Asynchronous abstraction for sourcing player and NPC intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so a battle can
//! run with human input, scripted fixtures, or automated policies.
use std::time::Duration;

use async_trait::async_trait;
use battle_core::{ActionPolicy, BattleSession, Decision};
use tokio::sync::mpsc;

use super::errors::{Result, RuntimeError};

/// Trait for deciding what the current combatant does.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - NPC policies
/// - Scripted/replayed decisions
#[async_trait]
pub trait ActionProvider: Send {
    /// Decide for the session's current combatant.
    ///
    /// `Ok(None)` passes the turn. A decision the session rejects is reported
    /// on the event bus and this method is called again.
    async fn provide_decision(&mut self, session: &BattleSession) -> Result<Option<Decision>>;
}

/// Runs an [`ActionPolicy`] after a fixed pacing delay.
pub struct PolicyProvider<P> {
    policy: P,
    delay: Duration,
}

impl<P: ActionPolicy> PolicyProvider<P> {
    /// Decides immediately.
    pub fn new(policy: P) -> Self {
        Self {
            policy,
            delay: Duration::ZERO,
        }
    }

    /// Waits `delay` before every decision so observers can follow along.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl<P: ActionPolicy> ActionProvider for PolicyProvider<P> {
    async fn provide_decision(&mut self, session: &BattleSession) -> Result<Option<Decision>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.policy.decide(session))
    }
}

/// Receives decisions from a [`PlayerInput`] handle.
pub struct ChannelProvider {
    rx: mpsc::Receiver<Option<Decision>>,
}

impl ChannelProvider {
    /// Creates a provider and the handle that feeds it.
    pub fn new(buffer: usize) -> (Self, PlayerInput) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (Self { rx }, PlayerInput { tx })
    }
}

#[async_trait]
impl ActionProvider for ChannelProvider {
    async fn provide_decision(&mut self, _session: &BattleSession) -> Result<Option<Decision>> {
        self.rx
            .recv()
            .await
            .ok_or(RuntimeError::ActionProviderChannelClosed)
    }
}

/// Cloneable sender side of a [`ChannelProvider`].
#[derive(Clone, Debug)]
pub struct PlayerInput {
    tx: mpsc::Sender<Option<Decision>>,
}

impl PlayerInput {
    /// Submit an action for the combatant whose turn it is.
    pub async fn act(&self, decision: Decision) -> Result<()> {
        self.send(Some(decision)).await
    }

    /// Decisions the channel can queue.
    pub fn capacity(&self) -> usize {
        self.tx.max_capacity()
    }

    /// End the current turn without acting.
    pub async fn pass(&self) -> Result<()> {
        self.send(None).await
    }

    async fn send(&self, input: Option<Decision>) -> Result<()> {
        self.tx
            .send(input)
            .await
            .map_err(|_| RuntimeError::ActionProviderChannelClosed)
    }
}
