//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from content, session setup and action providers so clients
//! can bubble them up with consistent context.
use std::fmt;

use battle_content::ContentError;
use battle_core::{ActionError, BattleError, ErrorSeverity, Faction, SessionError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{kind} action provider not set")]
    ProviderNotSet { kind: ProviderKind },

    #[error("action provider channel closed")]
    ActionProviderChannelClosed,

    #[error("runtime requires a roster before building")]
    MissingRoster,

    #[error("battle is already over")]
    BattleOver,

    #[error("{kind} provider had {attempts} decisions rejected in a row")]
    TooManyRejections { kind: ProviderKind, attempts: usize },

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Action(#[from] ActionError),
}

impl BattleError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Session(err) => err.severity(),
            Self::Content(err) => err.severity(),
            Self::Action(err) => err.severity(),
            Self::BattleOver => ErrorSeverity::Validation,
            Self::MissingRoster | Self::ProviderNotSet { .. } => ErrorSeverity::Fatal,
            Self::ActionProviderChannelClosed | Self::TooManyRejections { .. } => {
                ErrorSeverity::Internal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ProviderNotSet { .. } => "RUNTIME_PROVIDER_NOT_SET",
            Self::ActionProviderChannelClosed => "RUNTIME_PROVIDER_CHANNEL_CLOSED",
            Self::MissingRoster => "RUNTIME_MISSING_ROSTER",
            Self::BattleOver => "RUNTIME_BATTLE_OVER",
            Self::TooManyRejections { .. } => "RUNTIME_TOO_MANY_REJECTIONS",
            Self::Session(err) => err.error_code(),
            Self::Content(err) => err.error_code(),
            Self::Action(err) => err.error_code(),
        }
    }
}

/// Which provider slot drives a combatant. Allies are player controlled,
/// enemies are NPCs.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProviderKind {
    Player,
    Npc,
}

impl ProviderKind {
    pub const fn for_faction(faction: Faction) -> Self {
        match faction {
            Faction::Ally => Self::Player,
            Faction::Enemy => Self::Npc,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderKind::Player => "player",
            ProviderKind::Npc => "npc",
        };
        write!(f, "{}", label)
    }
}
