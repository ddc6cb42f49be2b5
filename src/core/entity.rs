//! Entity accessor contract.
//!
//! The resolver never assumes anything about the entity's shape beyond
//! this trait: read the current state value, produce a new entity with a
//! different one. Any representation satisfying the contract is usable.

use super::state::State;

/// Accessor contract between a rule table and the entity it governs.
///
/// Implementations read the entity's state field and produce an updated
/// copy - `with_state` consumes and returns the entity so resolution is
/// copy-on-write: the caller's original value is never mutated.
///
/// The trait is local to this crate, so it can be implemented either by
/// the module that owns the entity type or by a separate rules module
/// targeting an externally-defined entity. Which field holds the state is
/// entirely the implementation's choice; the [`stateful!`](crate::stateful)
/// macro generates an impl for a struct field named `state` by default,
/// with a `field:` argument to override it.
///
/// # Example
///
/// ```rust
/// use turnstile::core::Stateful;
/// use serde::Serialize;
///
/// #[derive(Clone, PartialEq, Debug, Serialize)]
/// enum Phase {
///     Draft,
///     Published,
/// }
///
/// #[derive(Clone)]
/// struct Article {
///     title: String,
///     phase: Phase,
/// }
///
/// impl Stateful for Article {
///     type State = Phase;
///
///     fn state(&self) -> &Phase {
///         &self.phase
///     }
///
///     fn with_state(mut self, next: Phase) -> Self {
///         self.phase = next;
///         self
///     }
/// }
///
/// let article = Article { title: "draft".into(), phase: Phase::Draft };
/// let published = article.clone().with_state(Phase::Published);
/// assert_eq!(*article.state(), Phase::Draft);
/// assert_eq!(*published.state(), Phase::Published);
/// ```
pub trait Stateful: Clone {
    /// The state value type held by this entity.
    type State: State;

    /// Read the current state value.
    fn state(&self) -> &Self::State;

    /// Produce this entity with its state replaced.
    fn with_state(self, next: Self::State) -> Self;
}
