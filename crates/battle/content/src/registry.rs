//! In-memory action catalog and content validation errors.

use std::collections::HashMap;

use battle_core::{
    ActionCatalog, ActionDefinition, ActionId, BattleError, DefinitionError, ErrorSeverity,
    SessionError,
};

/// Errors raised while assembling or using a content store.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ContentError {
    #[error("duplicate action id '{0}'")]
    DuplicateAction(ActionId),

    #[error(transparent)]
    InvalidAction(#[from] DefinitionError),

    #[error("duplicate character id '{0}'")]
    DuplicateCharacter(String),

    #[error("encounter '{encounter}' references unknown character '{character}'")]
    UnknownCharacter { encounter: String, character: String },

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl BattleError for ContentError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidAction(err) => err.severity(),
            Self::Session(err) => err.severity(),
            Self::DuplicateAction(_)
            | Self::DuplicateCharacter(_)
            | Self::UnknownCharacter { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateAction(_) => "CONTENT_DUPLICATE_ACTION",
            Self::InvalidAction(err) => err.error_code(),
            Self::DuplicateCharacter(_) => "CONTENT_DUPLICATE_CHARACTER",
            Self::UnknownCharacter { .. } => "CONTENT_UNKNOWN_CHARACTER",
            Self::Session(err) => err.error_code(),
        }
    }
}

/// Validated action definitions, keyed by id.
#[derive(Clone, Debug, Default)]
pub struct ActionRegistry {
    actions: HashMap<ActionId, ActionDefinition>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry, rejecting invalid numbers and repeated ids.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = ActionDefinition>,
    ) -> Result<Self, ContentError> {
        let mut registry = Self::new();
        for definition in definitions {
            registry.insert(definition)?;
        }
        Ok(registry)
    }

    pub fn insert(&mut self, definition: ActionDefinition) -> Result<(), ContentError> {
        definition.validate()?;
        if self.actions.contains_key(&definition.id) {
            return Err(ContentError::DuplicateAction(definition.id));
        }
        self.actions.insert(definition.id.clone(), definition);
        Ok(())
    }

    pub fn get(&self, id: &ActionId) -> Option<&ActionDefinition> {
        self.actions.get(id)
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> Vec<&ActionId> {
        let mut ids: Vec<_> = self.actions.keys().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl ActionCatalog for ActionRegistry {
    fn action(&self, id: &ActionId) -> Option<&ActionDefinition> {
        self.get(id)
    }
}
