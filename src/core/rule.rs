//! Normalized transition rules.
//!
//! Every accepted declaration shape compiles down to a flat list of these
//! atomic rules. Order is semantically significant: the resolver applies
//! the first rule whose `from` and `event` match.

use super::derivation::Derivation;
use super::entity::Stateful;
use std::fmt;

/// Destination of a normalized rule.
///
/// Either a literal state value or a [`Derivation`] computing the state
/// from the entity at call time. Derived destinations only arise from
/// event-grouped declarations carrying a guard; the builder rejects a
/// derivation supplied as a plain `to` anywhere else.
pub enum Destination<E: Stateful> {
    /// Transition to this exact state value.
    Literal(E::State),
    /// Compute the destination from the entity when the rule fires.
    Guarded(Derivation<E>),
}

impl<E: Stateful> Destination<E> {
    /// True when the destination is computed by a derivation.
    pub fn is_guarded(&self) -> bool {
        matches!(self, Destination::Guarded(_))
    }
}

impl<E: Stateful> Clone for Destination<E> {
    fn clone(&self) -> Self {
        match self {
            Destination::Literal(state) => Destination::Literal(state.clone()),
            Destination::Guarded(derivation) => Destination::Guarded(derivation.clone()),
        }
    }
}

impl<E: Stateful> fmt::Debug for Destination<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Literal(state) => write!(f, "Literal({state:?})"),
            Destination::Guarded(_) => f.write_str("Guarded(<derivation>)"),
        }
    }
}

/// The atomic, normalized unit of a rule table.
///
/// `from` is always a concrete state value here - any-state declarations
/// are expanded by the builder before a rule is stored, so resolution
/// needs no wildcard handling. `from`+`event` pairs may legitimately
/// repeat across rules that originate from a guard-grouped declaration;
/// the resolver still picks the first structural match.
pub struct TransitionRule<E: Stateful> {
    /// Source state, matched by exact equality.
    pub from: E::State,
    /// Event identifier triggering this rule.
    pub event: String,
    /// Literal or derivation-computed destination.
    pub to: Destination<E>,
}

impl<E: Stateful> Clone for TransitionRule<E> {
    fn clone(&self) -> Self {
        TransitionRule {
            from: self.from.clone(),
            event: self.event.clone(),
            to: self.to.clone(),
        }
    }
}

impl<E: Stateful> fmt::Debug for TransitionRule<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionRule")
            .field("from", &self.from)
            .field("event", &self.event)
            .field("to", &self.to)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Clone, PartialEq, Debug, Serialize)]
    enum TestState {
        Start,
        End,
    }

    #[derive(Clone)]
    struct Widget {
        state: TestState,
    }

    impl Stateful for Widget {
        type State = TestState;

        fn state(&self) -> &TestState {
            &self.state
        }

        fn with_state(mut self, next: TestState) -> Self {
            self.state = next;
            self
        }
    }

    #[test]
    fn literal_destination_is_not_guarded() {
        let to: Destination<Widget> = Destination::Literal(TestState::End);
        assert!(!to.is_guarded());
    }

    #[test]
    fn derived_destination_is_guarded() {
        let to: Destination<Widget> =
            Destination::Guarded(Derivation::new(|_: &Widget| TestState::End));
        assert!(to.is_guarded());
    }

    #[test]
    fn rules_clone_including_derivations() {
        let rule = TransitionRule::<Widget> {
            from: TestState::Start,
            event: "finish".to_string(),
            to: Destination::Guarded(Derivation::new(|_: &Widget| TestState::End)),
        };

        let cloned = rule.clone();
        assert_eq!(cloned.from, TestState::Start);
        assert_eq!(cloned.event, "finish");
        assert!(cloned.to.is_guarded());
    }

    #[test]
    fn debug_shows_literal_state_and_masks_derivations() {
        let literal = TransitionRule::<Widget> {
            from: TestState::Start,
            event: "finish".to_string(),
            to: Destination::Literal(TestState::End),
        };
        let rendered = format!("{literal:?}");
        assert!(rendered.contains("Literal(End)"));

        let guarded = TransitionRule::<Widget> {
            from: TestState::Start,
            event: "finish".to_string(),
            to: Destination::Guarded(Derivation::new(|_: &Widget| TestState::End)),
        };
        let rendered = format!("{guarded:?}");
        assert!(rendered.contains("Guarded(<derivation>)"));
    }
}
