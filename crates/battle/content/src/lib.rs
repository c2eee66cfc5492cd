//! Data-driven battle content and loaders.
//!
//! This crate houses the content store the battle engine reads from:
//! - Action catalogs (data-driven via RON)
//! - Character templates (data-driven via RON)
//! - Encounters pairing two parties (data-driven via RON)
//! - Battle rules (data-driven via TOML)
//!
//! Content is validated once when loaded and never appears in battle state.
pub mod registry;
pub mod store;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use registry::{ActionRegistry, ContentError};
pub use store::{ContentStore, EncounterEntry, EncounterSpec};

#[cfg(feature = "loaders")]
pub use loaders::{
    ActionLoader, CharacterLoader, ConfigLoader, ContentFactory, EncounterLoader, LoadResult,
};
