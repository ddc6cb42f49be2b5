//! Derivation functions for computed destinations.
//!
//! A derivation is a pure function from the entity to a state value. It is
//! how "the destination depends on entity data" is expressed: attached as
//! the guard of an event-grouped declaration, it computes the real
//! destination at call time.

use super::entity::Stateful;
use std::fmt;
use std::sync::Arc;

/// Pure function computing a destination state from the entity.
///
/// Derivations are evaluated by the resolver after a rule has structurally
/// matched; their return value becomes the new state unconditionally. The
/// resolver treats them as trusted black-box computations - the result is
/// never re-validated against the declared state catalog, so a derivation
/// that returns a state absent from the catalog is accepted as-is.
///
/// The wrapped function is reference-counted, so derivations (and the
/// rules holding them) stay cheap to clone.
///
/// # Example
///
/// ```rust
/// use turnstile::core::{Derivation, Stateful};
/// use serde::Serialize;
///
/// #[derive(Clone, PartialEq, Debug, Serialize)]
/// enum Tier {
///     Standard,
///     Premium,
/// }
///
/// #[derive(Clone)]
/// struct Account {
///     state: Tier,
///     score: u32,
/// }
///
/// impl Stateful for Account {
///     type State = Tier;
///     fn state(&self) -> &Tier {
///         &self.state
///     }
///     fn with_state(mut self, next: Tier) -> Self {
///         self.state = next;
///         self
///     }
/// }
///
/// let by_score = Derivation::new(|account: &Account| {
///     if account.score >= 100 {
///         Tier::Premium
///     } else {
///         Tier::Standard
///     }
/// });
///
/// let account = Account { state: Tier::Standard, score: 150 };
/// assert_eq!(by_score.resolve(&account), Tier::Premium);
/// ```
pub struct Derivation<E: Stateful> {
    f: Arc<dyn Fn(&E) -> E::State + Send + Sync>,
}

impl<E: Stateful> Derivation<E> {
    /// Wrap a pure destination function.
    ///
    /// The function must be deterministic and thread-safe; the resolver
    /// may invoke it from any thread sharing the rule table.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&E) -> E::State + Send + Sync + 'static,
    {
        Derivation { f: Arc::new(f) }
    }

    /// Compute the destination state for this entity.
    pub fn resolve(&self, entity: &E) -> E::State {
        (self.f)(entity)
    }
}

impl<E: Stateful> Clone for Derivation<E> {
    fn clone(&self) -> Self {
        Derivation {
            f: Arc::clone(&self.f),
        }
    }
}

impl<E: Stateful> fmt::Debug for Derivation<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<derivation>")
    }
}
