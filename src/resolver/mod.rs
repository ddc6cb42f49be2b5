//! Call-time transition resolution.
//!
//! The resolver is a pure linear scan over a finished rule table: first
//! structural match wins, guarded destinations are computed from the
//! entity, and the result is a new entity value. No state lives here -
//! every call is independent given the immutable table.

use crate::core::{Destination, RuleTable, Stateful};
use thiserror::Error;

/// Call-time rejection raised by [`RuleTable::transit`].
///
/// `NotAllowed` is the sole call-time outcome besides success: no rule in
/// the table matches the entity's current state and the requested event.
/// It is a normal, expected result - callers branch on it, nothing is
/// retried, and the entity is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// No rule matches the current state/event pair.
    #[error("transition not allowed: no rule for event '{event}' in state {state}")]
    NotAllowed {
        /// Rendering of the entity's current state.
        state: String,
        /// The requested event identifier.
        event: String,
    },
}

impl<E: Stateful> RuleTable<E> {
    /// Apply an event to an entity, producing the updated entity or a
    /// not-allowed rejection.
    ///
    /// The rules are scanned in declaration order and the first rule whose
    /// `from` equals the entity's current state and whose `event` matches
    /// is applied. A literal destination is used as-is; a guarded
    /// destination is computed by the rule's derivation, and its return
    /// value becomes the new state unconditionally - the resolver never
    /// re-validates it against the state catalog.
    ///
    /// The input entity is never mutated: the result is a copy with only
    /// the state replaced.
    ///
    /// # Example
    ///
    /// ```rust
    /// use turnstile::builder::RuleTableBuilder;
    /// use turnstile::{state_enum, stateful};
    ///
    /// state_enum! {
    ///     enum DoorState {
    ///         Locked,
    ///         Unlocked,
    ///     }
    /// }
    ///
    /// #[derive(Clone)]
    /// struct Door {
    ///     state: DoorState,
    /// }
    ///
    /// stateful!(Door, state: DoorState);
    ///
    /// let table = RuleTableBuilder::<Door>::new()
    ///     .rule(DoorState::Locked, "unlock", DoorState::Unlocked)
    ///     .build()
    ///     .unwrap();
    ///
    /// let door = Door { state: DoorState::Locked };
    /// let door = table.transit(&door, "unlock").unwrap();
    /// assert_eq!(door.state, DoorState::Unlocked);
    ///
    /// assert!(table.transit(&door, "unlock").is_err());
    /// ```
    pub fn transit(&self, entity: &E, event: &str) -> Result<E, TransitionError> {
        let current = entity.state();

        let Some(rule) = self
            .rules()
            .iter()
            .find(|rule| rule.from == *current && rule.event == event)
        else {
            tracing::debug!(state = ?current, event, "transition not allowed");
            return Err(TransitionError::NotAllowed {
                state: format!("{current:?}"),
                event: event.to_string(),
            });
        };

        let next = match &rule.to {
            Destination::Literal(state) => state.clone(),
            Destination::Guarded(derivation) => derivation.resolve(entity),
        };

        tracing::trace!(from = ?current, to = ?next, event, "transition applied");
        Ok(entity.clone().with_state(next))
    }

    /// True when some rule matches the given state/event pair.
    ///
    /// Purely structural: guards never veto a transition in this model
    /// (they compute destinations), so this is exactly "would `transit`
    /// succeed for an entity in this state".
    pub fn allows(&self, state: &E::State, event: &str) -> bool {
        self.rules()
            .iter()
            .any(|rule| rule.from == *state && rule.event == event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::declaration::{EventArm, RuleDeclaration};
    use crate::builder::RuleTableBuilder;

    crate::state_enum! {
        enum DoorState {
            Locked,
            Unlocked,
            Opened,
        }
    }

    #[derive(Clone, PartialEq, Debug)]
    struct Door {
        state: DoorState,
    }

    crate::stateful!(Door, state: DoorState);

    fn door_table() -> crate::core::RuleTable<Door> {
        RuleTableBuilder::<Door>::new()
            .rule(DoorState::Locked, "unlock", DoorState::Unlocked)
            .rule(DoorState::Unlocked, "lock", DoorState::Locked)
            .rule(DoorState::Unlocked, "open", DoorState::Opened)
            .build()
            .unwrap()
    }

    #[test]
    fn transit_applies_the_matching_rule() {
        let table = door_table();
        let door = Door {
            state: DoorState::Locked,
        };

        let door = table.transit(&door, "unlock").unwrap();
        assert_eq!(door.state, DoorState::Unlocked);

        let door = table.transit(&door, "open").unwrap();
        assert_eq!(door.state, DoorState::Opened);
    }

    #[test]
    fn transit_rejects_unmatched_pairs_and_leaves_the_entity_alone() {
        let table = door_table();
        let door = Door {
            state: DoorState::Unlocked,
        };

        let err = table.transit(&door, "close").unwrap_err();
        assert_eq!(
            err,
            TransitionError::NotAllowed {
                state: "Unlocked".to_string(),
                event: "close".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "transition not allowed: no rule for event 'close' in state Unlocked"
        );
        assert_eq!(door.state, DoorState::Unlocked);
    }

    #[test]
    fn first_declared_rule_wins_on_duplicate_pairs() {
        let table = RuleTableBuilder::<Door>::new()
            .rule(DoorState::Locked, "force", DoorState::Opened)
            .rule(DoorState::Locked, "force", DoorState::Unlocked)
            .build()
            .unwrap();

        let door = Door {
            state: DoorState::Locked,
        };
        let door = table.transit(&door, "force").unwrap();
        assert_eq!(door.state, DoorState::Opened);
    }

    #[test]
    fn guarded_destination_is_computed_from_the_entity() {
        #[derive(Clone)]
        struct Alarm {
            state: DoorState,
            armed: bool,
        }

        crate::stateful!(Alarm, state: DoorState);

        let table = RuleTableBuilder::<Alarm>::new()
            .rule(DoorState::Locked, "unlock", DoorState::Unlocked)
            .declare(RuleDeclaration::guarded_event_group(
                "reset",
                |alarm: &Alarm| {
                    if alarm.armed {
                        DoorState::Locked
                    } else {
                        DoorState::Unlocked
                    }
                },
                vec![
                    EventArm::source(DoorState::Unlocked),
                    EventArm::source(DoorState::Opened),
                ],
            ))
            .build()
            .unwrap();

        let armed = Alarm {
            state: DoorState::Opened,
            armed: true,
        };
        assert_eq!(table.transit(&armed, "reset").unwrap().state, DoorState::Locked);

        let disarmed = Alarm {
            state: DoorState::Opened,
            armed: false,
        };
        assert_eq!(
            table.transit(&disarmed, "reset").unwrap().state,
            DoorState::Unlocked
        );
    }

    #[test]
    fn guard_supersedes_an_arm_literal_destination() {
        let table = RuleTableBuilder::<Door>::new()
            .declare(RuleDeclaration::guarded_event_group(
                "reset",
                |_: &Door| DoorState::Locked,
                // The arm says Opened, the guard says Locked: guard wins.
                vec![EventArm::source_to(DoorState::Unlocked, DoorState::Opened)],
            ))
            .build()
            .unwrap();

        let door = Door {
            state: DoorState::Unlocked,
        };
        assert_eq!(table.transit(&door, "reset").unwrap().state, DoorState::Locked);
    }

    #[test]
    fn guard_output_is_trusted_even_outside_the_catalog() {
        #[derive(Clone)]
        struct Counter {
            state: i32,
        }

        crate::stateful!(Counter, state: i32);

        let table = RuleTableBuilder::<Counter>::new()
            .declare(RuleDeclaration::guarded_event_group(
                "jump",
                |counter: &Counter| counter.state + 100,
                vec![EventArm::source(1)],
            ))
            .build()
            .unwrap();

        // 101 appears nowhere in the catalog; it is accepted as-is.
        let counter = Counter { state: 1 };
        assert_eq!(table.transit(&counter, "jump").unwrap().state, 101);
        assert_eq!(table.states(), &[1]);
    }

    #[test]
    fn transit_is_deterministic() {
        let table = door_table();
        let door = Door {
            state: DoorState::Locked,
        };

        let first = table.transit(&door, "unlock").unwrap();
        let second = table.transit(&door, "unlock").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn any_state_rules_do_not_cover_later_states() {
        let table = RuleTableBuilder::<Door>::new()
            .rule(DoorState::Locked, "unlock", DoorState::Unlocked)
            .any_state("panic", DoorState::Locked)
            .rule(DoorState::Unlocked, "open", DoorState::Opened)
            .build()
            .unwrap();

        // Known when the any-state rule was declared: covered.
        let unlocked = Door {
            state: DoorState::Unlocked,
        };
        assert_eq!(table.transit(&unlocked, "panic").unwrap().state, DoorState::Locked);

        // Introduced afterwards: not covered.
        let opened = Door {
            state: DoorState::Opened,
        };
        assert!(table.transit(&opened, "panic").is_err());
    }

    #[test]
    fn a_shared_table_resolves_from_multiple_threads() {
        let table = door_table();

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let door = Door {
                        state: DoorState::Locked,
                    };
                    let door = table.transit(&door, "unlock").unwrap();
                    assert_eq!(door.state, DoorState::Unlocked);
                });
            }
        });
    }

    #[test]
    fn allows_reports_structural_matches() {
        let table = door_table();
        assert!(table.allows(&DoorState::Locked, "unlock"));
        assert!(!table.allows(&DoorState::Locked, "open"));
        assert!(!table.allows(&DoorState::Opened, "unlock"));
    }
}
