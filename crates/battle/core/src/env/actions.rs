//! Action catalog oracle.
//!
//! Provides read-only access to authored action definitions.

use std::collections::HashMap;

use crate::action::{ActionDefinition, ActionId};

/// Catalog of action definitions, looked up by id.
///
/// Implemented by the content store; definitions are loaded once before a
/// session starts and never change afterwards.
pub trait ActionCatalog: Send + Sync {
    fn action(&self, id: &ActionId) -> Option<&ActionDefinition>;
}

impl ActionCatalog for HashMap<ActionId, ActionDefinition> {
    fn action(&self, id: &ActionId) -> Option<&ActionDefinition> {
        self.get(id)
    }
}

impl ActionCatalog for [ActionDefinition] {
    fn action(&self, id: &ActionId) -> Option<&ActionDefinition> {
        self.iter().find(|definition| &definition.id == id)
    }
}

impl ActionCatalog for Vec<ActionDefinition> {
    fn action(&self, id: &ActionId) -> Option<&ActionDefinition> {
        self.as_slice().action(id)
    }
}
