//! Read-only collaborators of the engine.
//!
//! The action catalog and character templates come from the content store;
//! the random source is injected by the embedder. None of them appear in
//! battle state.
mod actions;
mod characters;
mod rng;

pub use actions::ActionCatalog;
pub use characters::{CharacterClass, CharacterTemplate, Rank};
pub use rng::{PcgRandom, RandomSource, ScriptedRandom};
