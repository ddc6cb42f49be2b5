//! Core State trait for transition-rule tables.
//!
//! States are opaque values: the rule compiler and resolver only ever
//! compare them for equality, clone them into rules and catalogs, and
//! render them in diagnostics.

use serde::Serialize;
use std::fmt::Debug;

/// Marker trait for values usable as states in a rule table.
///
/// States are compared by equality only - there is no ordering, hashing,
/// or naming requirement. Any type with the standard value-type traits
/// qualifies automatically through the blanket impl below: enums, integers,
/// strings, or anything else `Clone + PartialEq + Debug + Serialize`.
///
/// # Required Traits
///
/// - `Clone`: states are copied into normalized rules and catalogs
/// - `PartialEq`: rule matching is exact equality on the state value
/// - `Debug`: states are rendered in diagnostics and rejections
/// - `Serialize`: states appear in the exported catalog document
/// - `Send + Sync + 'static`: rule tables are shareable across threads
///
/// # Example
///
/// ```rust
/// use turnstile::core::State;
/// use serde::Serialize;
///
/// #[derive(Clone, PartialEq, Debug, Serialize)]
/// enum DoorState {
///     Locked,
///     Unlocked,
///     Opened,
/// }
///
/// fn assert_state<S: State>() {}
/// assert_state::<DoorState>();
/// assert_state::<i32>();
/// assert_state::<String>();
/// ```
pub trait State: Clone + PartialEq + Debug + Serialize + Send + Sync + 'static {}

impl<T> State for T where T: Clone + PartialEq + Debug + Serialize + Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize)]
    enum TestState {
        Initial,
        Processing,
    }

    fn assert_state<S: State>() {}

    #[test]
    fn enums_are_states() {
        assert_state::<TestState>();
    }

    #[test]
    fn primitives_are_states() {
        assert_state::<i32>();
        assert_state::<u64>();
        assert_state::<String>();
    }

    #[test]
    fn states_compare_by_equality() {
        assert_eq!(TestState::Initial, TestState::Initial);
        assert_ne!(TestState::Initial, TestState::Processing);
    }

    #[test]
    fn states_are_cloneable() {
        let state = TestState::Processing;
        let cloned = state.clone();
        assert_eq!(state, cloned);
    }

    #[test]
    fn states_serialize() {
        let json = serde_json::to_string(&TestState::Initial).unwrap();
        assert_eq!(json, "\"Initial\"");
    }
}
