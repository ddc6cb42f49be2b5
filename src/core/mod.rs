//! Core types of the rule compiler and resolver.
//!
//! This module contains the pure data the rest of the crate works with:
//! - State values via the `State` marker trait
//! - The entity accessor contract via `Stateful`
//! - Derivation functions for computed destinations
//! - Normalized transition rules and the immutable rule table
//!
//! Everything here is pure data with no side effects; building tables is
//! the `builder` module's job, applying them the `resolver`'s.

mod derivation;
mod entity;
mod rule;
mod state;
mod table;

pub use derivation::Derivation;
pub use entity::Stateful;
pub use rule::{Destination, TransitionRule};
pub use state::State;
pub use table::{DestinationView, RuleTable, TransitionView};
