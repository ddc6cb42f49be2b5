//! The immutable rule table and its introspection catalogs.

use super::entity::Stateful;
use super::rule::{Destination, TransitionRule};
use super::state::State;
use serde::Serialize;
use std::fmt;

/// Ordered, immutable collection of normalized rules plus the derived
/// state and event catalogs.
///
/// Built once per state-machine definition by
/// [`RuleTableBuilder`](crate::builder::RuleTableBuilder) and read-only
/// thereafter; resolution never mutates it, so a table can be shared
/// across concurrent callers without locking.
///
/// The catalogs are pure functions of the declared order: the state
/// catalog holds every value used as a `from` or literal `to` of a
/// normalized rule, in first-seen order, and the event catalog holds every
/// event identifier, in first-seen order. Rebuilding from an identical
/// declaration sequence reproduces them byte for byte.
pub struct RuleTable<E: Stateful> {
    rules: Vec<TransitionRule<E>>,
    states: Vec<E::State>,
    events: Vec<String>,
}

impl<E: Stateful> RuleTable<E> {
    pub(crate) fn from_parts(
        rules: Vec<TransitionRule<E>>,
        states: Vec<E::State>,
        events: Vec<String>,
    ) -> Self {
        RuleTable {
            rules,
            states,
            events,
        }
    }

    /// The normalized rules, in declaration order.
    pub fn rules(&self) -> &[TransitionRule<E>] {
        &self.rules
    }

    /// Distinct states, in first-seen order.
    pub fn states(&self) -> &[E::State] {
        &self.states
    }

    /// Distinct event identifiers, in first-seen order.
    pub fn events(&self) -> &[String] {
        &self.events
    }

    /// The ordered `{from, to, event}` triples of the table.
    ///
    /// Rules with a derivation-computed destination surface
    /// [`DestinationView::Guarded`] - a reference to the fact that a guard
    /// decides, never a computed value, since no entity is available at
    /// introspection time.
    pub fn transitions(&self) -> Vec<TransitionView<'_, E::State>> {
        self.rules
            .iter()
            .map(|rule| TransitionView {
                from: &rule.from,
                to: match &rule.to {
                    Destination::Literal(state) => DestinationView::Literal(state),
                    Destination::Guarded(_) => DestinationView::Guarded,
                },
                event: &rule.event,
            })
            .collect()
    }

    /// Events with at least one rule leaving the given state, in rule
    /// order, deduplicated.
    pub fn events_from(&self, state: &E::State) -> Vec<&str> {
        let mut events: Vec<&str> = Vec::new();
        for rule in &self.rules {
            if rule.from == *state && !events.contains(&rule.event.as_str()) {
                events.push(&rule.event);
            }
        }
        events
    }

    /// Export the catalogs as a JSON document.
    ///
    /// The document carries `states`, `events`, and `transitions` exactly
    /// as the introspection queries report them, and is stable across
    /// rebuilds from the same declarations.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "states": self.states,
            "events": self.events,
            "transitions": self.transitions(),
        })
    }
}

impl<E: Stateful> Clone for RuleTable<E> {
    fn clone(&self) -> Self {
        RuleTable {
            rules: self.rules.clone(),
            states: self.states.clone(),
            events: self.events.clone(),
        }
    }
}

impl<E: Stateful> fmt::Debug for RuleTable<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleTable")
            .field("rules", &self.rules)
            .field("states", &self.states)
            .field("events", &self.events)
            .finish()
    }
}

/// Introspection view of a single normalized rule.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct TransitionView<'a, S: State> {
    /// Source state.
    pub from: &'a S,
    /// Literal destination, or the marker that a guard decides.
    pub to: DestinationView<'a, S>,
    /// Event identifier.
    pub event: &'a str,
}

/// Destination as surfaced by introspection.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationView<'a, S: State> {
    /// A literal destination state.
    Literal(&'a S),
    /// The destination is computed by the rule's guard at call time.
    Guarded,
}
