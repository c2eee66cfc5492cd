//! Combat resolution system.
//!
//! # Architecture
//!
//! - **Pure checks**: `hit` classifies d20 rolls without touching state
//! - **Validation first**: `resolve::validate` runs every precondition before
//!   `resolve::apply` mutates anything
//! - **Event output**: resolution returns the events it produced
//!
//! # Core Functions
//!
//! - `resolve`: validate + apply one action
//! - `classify_attack`: natural 1 / natural 20 / roll + attack vs defense
//! - `apply`: per-target rolls, health and modifier changes, cooldown record

pub mod hit;
pub mod resolve;
pub mod result;

pub use hit::{AttackRoll, check_hit, classify_attack};
pub use resolve::{apply, resolve, validate};
pub use result::{ActionResult, ResultKind};
