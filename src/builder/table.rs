//! Builder that compiles rule declarations into a rule table.

use crate::builder::declaration::{EventArm, RuleDeclaration, Source, TargetArm};
use crate::builder::error::CompileError;
use crate::core::{Destination, RuleTable, Stateful, TransitionRule};

/// Builder for compiling an ordered sequence of declarations into an
/// immutable [`RuleTable`].
///
/// Declarations accumulate through the fluent API and are validated and
/// expanded by [`build`](RuleTableBuilder::build) in the order they were
/// declared. Order matters twice over: resolution applies the first
/// matching rule, and any-state declarations expand against the states
/// known at their position in the sequence.
///
/// # Example
///
/// ```rust
/// use turnstile::builder::RuleTableBuilder;
/// use serde::Serialize;
///
/// #[derive(Clone, PartialEq, Debug, Serialize)]
/// enum DoorState {
///     Locked,
///     Unlocked,
/// }
///
/// #[derive(Clone)]
/// struct Door {
///     state: DoorState,
/// }
///
/// turnstile::stateful!(Door, state: DoorState);
///
/// let table = RuleTableBuilder::<Door>::new()
///     .rule(DoorState::Locked, "unlock", DoorState::Unlocked)
///     .rule(DoorState::Unlocked, "lock", DoorState::Locked)
///     .build()
///     .unwrap();
///
/// assert_eq!(table.rules().len(), 2);
/// ```
pub struct RuleTableBuilder<E: Stateful> {
    declarations: Vec<RuleDeclaration<E>>,
}

impl<E: Stateful> RuleTableBuilder<E> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            declarations: Vec::new(),
        }
    }

    /// Create a builder over an already-assembled declaration sequence.
    pub fn from_declarations(declarations: Vec<RuleDeclaration<E>>) -> Self {
        Self { declarations }
    }

    /// Append one declaration.
    pub fn declare(mut self, declaration: RuleDeclaration<E>) -> Self {
        self.declarations.push(declaration);
        self
    }

    /// Append multiple declarations at once.
    pub fn declarations(mut self, declarations: Vec<RuleDeclaration<E>>) -> Self {
        self.declarations.extend(declarations);
        self
    }

    /// Append a simple rule declaration.
    pub fn rule(self, from: E::State, event: impl Into<String>, to: E::State) -> Self {
        self.declare(RuleDeclaration::simple(from, event, to))
    }

    /// Append an any-state rule declaration, covering every state known
    /// at this point in the sequence.
    pub fn any_state(self, event: impl Into<String>, to: E::State) -> Self {
        self.declare(RuleDeclaration::any_state(event, to))
    }

    /// Validate, expand, and normalize the declarations into a table.
    ///
    /// Fails on the first deprecated or malformed declaration; there is no
    /// partial table. Building is deterministic - the same declaration
    /// sequence always produces byte-identical rules and catalogs.
    pub fn build(self) -> Result<RuleTable<E>, CompileError> {
        let mut acc = Accumulator::new();

        for declaration in self.declarations {
            let rendered = declaration.to_string();
            match declaration {
                RuleDeclaration::Transition { from, event, to } => {
                    if to.is_guarded() {
                        return Err(CompileError::UnsupportedSyntax {
                            declaration: rendered,
                            suggestion: suggest_guarded_group(&render_source(&from), &event),
                        });
                    }
                    match from {
                        Source::State(state) => acc.push(state, event, to),
                        Source::Any => acc.push_any(event, to),
                    }
                }

                RuleDeclaration::FromGroup { from, arms } => {
                    if let Some(arm) = arms.iter().find(|arm| arm.to.is_guarded()) {
                        return Err(CompileError::UnsupportedSyntax {
                            declaration: rendered,
                            suggestion: suggest_guarded_group(&render_source(&from), &arm.event),
                        });
                    }
                    match from {
                        Source::State(state) => {
                            for arm in arms {
                                acc.push(state.clone(), arm.event, arm.to);
                            }
                        }
                        Source::Any => {
                            for arm in arms {
                                acc.push_any(arm.event, arm.to);
                            }
                        }
                    }
                }

                RuleDeclaration::EventGroup {
                    event,
                    guard: Some(derivation),
                    arms,
                } => {
                    for arm in arms {
                        match arm {
                            // The arm's literal destination, if any, is
                            // ignored: the guard decides.
                            EventArm::Source { from, to: _ } => acc.push(
                                from,
                                event.clone(),
                                Destination::Guarded(derivation.clone()),
                            ),
                            EventArm::Nested { from, arms } => {
                                return Err(CompileError::UnsupportedSyntax {
                                    declaration: rendered,
                                    suggestion: suggest_flat_event_group(
                                        &event, true, &from, &arms,
                                    ),
                                });
                            }
                        }
                    }
                }

                RuleDeclaration::EventGroup {
                    event,
                    guard: None,
                    arms,
                } => {
                    for arm in arms {
                        match arm {
                            EventArm::Source {
                                from,
                                to: Some(to @ Destination::Literal(_)),
                            } => acc.push(from, event.clone(), to),
                            EventArm::Source {
                                from,
                                to: Some(Destination::Guarded(_)),
                            } => {
                                return Err(CompileError::UnsupportedSyntax {
                                    declaration: rendered,
                                    suggestion: suggest_guarded_group(
                                        &format!("{from:?}"),
                                        &event,
                                    ),
                                });
                            }
                            EventArm::Source { from: _, to: None } => {
                                return Err(CompileError::MissingDestination {
                                    declaration: rendered,
                                });
                            }
                            EventArm::Nested { from, arms } => {
                                return Err(CompileError::UnsupportedSyntax {
                                    declaration: rendered,
                                    suggestion: suggest_flat_event_group(
                                        &event, false, &from, &arms,
                                    ),
                                });
                            }
                        }
                    }
                }
            }
        }

        tracing::debug!(
            rules = acc.rules.len(),
            states = acc.states.len(),
            events = acc.events.len(),
            "rule table compiled"
        );

        Ok(RuleTable::from_parts(acc.rules, acc.states, acc.events))
    }
}

impl<E: Stateful> Default for RuleTableBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Rules plus incrementally-maintained catalogs. The catalogs grow as
/// rules are pushed, which is what gives any-state expansion its
/// snapshot-at-declaration-time scoping.
struct Accumulator<E: Stateful> {
    rules: Vec<TransitionRule<E>>,
    states: Vec<E::State>,
    events: Vec<String>,
}

impl<E: Stateful> Accumulator<E> {
    fn new() -> Self {
        Self {
            rules: Vec::new(),
            states: Vec::new(),
            events: Vec::new(),
        }
    }

    fn note_state(&mut self, state: &E::State) {
        if !self.states.contains(state) {
            self.states.push(state.clone());
        }
    }

    fn push(&mut self, from: E::State, event: String, to: Destination<E>) {
        self.note_state(&from);
        if let Destination::Literal(state) = &to {
            self.note_state(state);
        }
        if !self.events.contains(&event) {
            self.events.push(event.clone());
        }
        self.rules.push(TransitionRule { from, event, to });
    }

    /// Expand an any-state rule against the states observed so far. The
    /// snapshot is taken before any expansion, so the rule's own literal
    /// destination does not widen its coverage.
    fn push_any(&mut self, event: String, to: Destination<E>) {
        let snapshot = self.states.clone();
        tracing::trace!(
            event = %event,
            expanded = snapshot.len(),
            "expanded any-state declaration against known states"
        );
        for state in snapshot {
            self.push(state, event.clone(), to.clone());
        }
    }
}

fn render_source<S: std::fmt::Debug>(source: &Source<S>) -> String {
    match source {
        Source::State(state) => format!("{state:?}"),
        Source::Any => "<each source state>".to_string(),
    }
}

fn suggest_guarded_group(from: &str, event: &str) -> String {
    format!("event({event:?}, guard: <derivation>) {{ from({from}) }}")
}

/// Render the flat grouped-by-event rewrite of a nested from-block.
fn suggest_flat_event_group<E: Stateful>(
    event: &str,
    guarded: bool,
    from: &E::State,
    arms: &[TargetArm<E>],
) -> String {
    if guarded {
        return format!("event({event:?}, guard: <derivation>) {{ from({from:?}) }}");
    }
    let flattened: Vec<String> = arms
        .iter()
        .map(|arm| match &arm.to {
            Destination::Literal(to) => format!("from({from:?}, to: {to:?})"),
            Destination::Guarded(_) => format!("from({from:?})"),
        })
        .collect();
    format!("event({event:?}) {{ {} }}", flattened.join("; "))
}
