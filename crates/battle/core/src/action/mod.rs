//! Action definitions, targeting rules and the errors they raise.

mod definition;
mod error;
pub mod targeting;

pub use definition::{
    ActionDefinition, ActionEffect, ActionId, ActionKind, DefinitionError, TargetType,
};
pub use error::ActionError;
pub use targeting::{TargetSelection, resolve_targets, target_faction, valid_targets};
