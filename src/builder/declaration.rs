//! Rule declaration shapes.
//!
//! Declarations are what the host hands to the builder: simple rules,
//! source-grouped and event-grouped blocks, and any-state rules. They are
//! plain data - the builder validates, expands, and normalizes them into
//! [`TransitionRule`](crate::core::TransitionRule)s.
//!
//! Deprecated shapes (a `from`-block nested inside an `event`-block, a
//! derivation supplied as a plain `to`) are deliberately representable so
//! the builder can reject them with a rendered diagnostic instead of the
//! host failing to express them at all.
//!
//! Every shape renders through `Display` in a canonical declaration
//! syntax; compile diagnostics quote these renderings verbatim.

use crate::core::{Derivation, Destination, Stateful};
use std::fmt;

/// Source pattern of a declaration: a concrete state or the any-state
/// marker.
///
/// `Any` matches every state known at the point the declaration is
/// processed - it is expanded at build time against that snapshot, not
/// kept as a runtime wildcard. States introduced by later declarations are
/// not covered retroactively.
#[derive(Clone, Debug, PartialEq)]
pub enum Source<S> {
    /// A concrete source state.
    State(S),
    /// Every state already observed in the table so far.
    Any,
}

/// One `to(T, event: E)` arm of a source-grouped declaration.
pub struct TargetArm<E: Stateful> {
    /// Event identifier for this arm.
    pub event: String,
    /// Destination for this arm.
    pub to: Destination<E>,
}

impl<E: Stateful> TargetArm<E> {
    /// Arm with a literal destination.
    pub fn to(event: impl Into<String>, state: E::State) -> Self {
        TargetArm {
            event: event.into(),
            to: Destination::Literal(state),
        }
    }

    /// Arm with a derivation-computed destination.
    ///
    /// Only legal inside a guarded event-group; everywhere else the
    /// builder rejects it as unsupported syntax.
    pub fn derived<F>(event: impl Into<String>, f: F) -> Self
    where
        F: Fn(&E) -> E::State + Send + Sync + 'static,
    {
        TargetArm {
            event: event.into(),
            to: Destination::Guarded(Derivation::new(f)),
        }
    }
}

impl<E: Stateful> Clone for TargetArm<E> {
    fn clone(&self) -> Self {
        TargetArm {
            event: self.event.clone(),
            to: self.to.clone(),
        }
    }
}

impl<E: Stateful> fmt::Display for TargetArm<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "to(")?;
        fmt_destination(&self.to, f)?;
        write!(f, ", event: {:?})", self.event)
    }
}

impl<E: Stateful> fmt::Debug for TargetArm<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

/// One arm of an event-grouped declaration.
pub enum EventArm<E: Stateful> {
    /// `from(S)` or `from(S, to: T)`. The destination is required when
    /// the group has no guard, and ignored when it has one.
    Source {
        /// Source state of this arm.
        from: E::State,
        /// Optional literal destination.
        to: Option<Destination<E>>,
    },
    /// A `from`-block nested inside the event-block. Deprecated: the
    /// builder always rejects this shape with a suggested flat rewrite.
    Nested {
        /// Source state of the nested block.
        from: E::State,
        /// The nested block's arms.
        arms: Vec<TargetArm<E>>,
    },
}

impl<E: Stateful> EventArm<E> {
    /// Bare `from(S)` arm, for guarded groups.
    pub fn source(from: E::State) -> Self {
        EventArm::Source { from, to: None }
    }

    /// `from(S, to: T)` arm with a literal destination.
    pub fn source_to(from: E::State, to: E::State) -> Self {
        EventArm::Source {
            from,
            to: Some(Destination::Literal(to)),
        }
    }

    /// A nested `from`-block (deprecated shape, kept representable so the
    /// builder can diagnose it).
    pub fn nested(from: E::State, arms: Vec<TargetArm<E>>) -> Self {
        EventArm::Nested { from, arms }
    }
}

impl<E: Stateful> Clone for EventArm<E> {
    fn clone(&self) -> Self {
        match self {
            EventArm::Source { from, to } => EventArm::Source {
                from: from.clone(),
                to: to.clone(),
            },
            EventArm::Nested { from, arms } => EventArm::Nested {
                from: from.clone(),
                arms: arms.clone(),
            },
        }
    }
}

impl<E: Stateful> fmt::Display for EventArm<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventArm::Source { from, to: None } => write!(f, "from({from:?})"),
            EventArm::Source { from, to: Some(to) } => {
                write!(f, "from({from:?}, to: ")?;
                fmt_destination(to, f)?;
                write!(f, ")")
            }
            EventArm::Nested { from, arms } => {
                write!(f, "from({from:?}) {{ ")?;
                fmt_separated(arms, f)?;
                write!(f, " }}")
            }
        }
    }
}

impl<E: Stateful> fmt::Debug for EventArm<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

/// A single rule declaration, in one of the shapes the builder accepts
/// (or deliberately rejects).
pub enum RuleDeclaration<E: Stateful> {
    /// `from(S, to: T, event: E)` - one rule; `from(any, ...)` expands
    /// against the states known so far.
    Transition {
        /// Source pattern.
        from: Source<E::State>,
        /// Event identifier.
        event: String,
        /// Destination.
        to: Destination<E>,
    },
    /// `from(S) { to(T1, event: E1); ... }` - N rules sharing a source.
    FromGroup {
        /// Shared source pattern.
        from: Source<E::State>,
        /// The group's arms.
        arms: Vec<TargetArm<E>>,
    },
    /// `event(E) { from(S1, to: T1); ... }`, optionally with a guard that
    /// computes every destination: `event(E, guard: G) { from(S1); ... }`.
    EventGroup {
        /// Shared event identifier.
        event: String,
        /// Destination-computing guard shared by all arms.
        guard: Option<Derivation<E>>,
        /// The group's arms.
        arms: Vec<EventArm<E>>,
    },
}

impl<E: Stateful> RuleDeclaration<E> {
    /// Simple rule: `from(S, to: T, event: E)`.
    pub fn simple(from: E::State, event: impl Into<String>, to: E::State) -> Self {
        RuleDeclaration::Transition {
            from: Source::State(from),
            event: event.into(),
            to: Destination::Literal(to),
        }
    }

    /// Simple rule whose destination is a derivation function.
    ///
    /// This shape is deprecated - the builder rejects it and suggests the
    /// guarded event-group form, which keeps computed destinations tied to
    /// the triggering event.
    pub fn derived<F>(from: E::State, event: impl Into<String>, f: F) -> Self
    where
        F: Fn(&E) -> E::State + Send + Sync + 'static,
    {
        RuleDeclaration::Transition {
            from: Source::State(from),
            event: event.into(),
            to: Destination::Guarded(Derivation::new(f)),
        }
    }

    /// Any-state rule: `from(any, to: T, event: E)`.
    pub fn any_state(event: impl Into<String>, to: E::State) -> Self {
        RuleDeclaration::Transition {
            from: Source::Any,
            event: event.into(),
            to: Destination::Literal(to),
        }
    }

    /// Source-grouped declaration: `from(S) { to(T1, event: E1); ... }`.
    pub fn from_group(from: E::State, arms: Vec<TargetArm<E>>) -> Self {
        RuleDeclaration::FromGroup {
            from: Source::State(from),
            arms,
        }
    }

    /// Event-grouped declaration without a guard:
    /// `event(E) { from(S1, to: T1); ... }`.
    pub fn event_group(event: impl Into<String>, arms: Vec<EventArm<E>>) -> Self {
        RuleDeclaration::EventGroup {
            event: event.into(),
            guard: None,
            arms,
        }
    }

    /// Event-grouped declaration whose guard computes every destination:
    /// `event(E, guard: G) { from(S1); from(S2); ... }`.
    ///
    /// Any literal `to` in the arms is ignored; the guard's return value
    /// is the destination, unconditionally.
    pub fn guarded_event_group<F>(
        event: impl Into<String>,
        guard: F,
        arms: Vec<EventArm<E>>,
    ) -> Self
    where
        F: Fn(&E) -> E::State + Send + Sync + 'static,
    {
        RuleDeclaration::EventGroup {
            event: event.into(),
            guard: Some(Derivation::new(guard)),
            arms,
        }
    }
}

impl<E: Stateful> Clone for RuleDeclaration<E> {
    fn clone(&self) -> Self {
        match self {
            RuleDeclaration::Transition { from, event, to } => RuleDeclaration::Transition {
                from: from.clone(),
                event: event.clone(),
                to: to.clone(),
            },
            RuleDeclaration::FromGroup { from, arms } => RuleDeclaration::FromGroup {
                from: from.clone(),
                arms: arms.clone(),
            },
            RuleDeclaration::EventGroup { event, guard, arms } => RuleDeclaration::EventGroup {
                event: event.clone(),
                guard: guard.clone(),
                arms: arms.clone(),
            },
        }
    }
}

impl<E: Stateful> fmt::Display for RuleDeclaration<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleDeclaration::Transition { from, event, to } => {
                write!(f, "from(")?;
                fmt_source(from, f)?;
                write!(f, ", to: ")?;
                fmt_destination(to, f)?;
                write!(f, ", event: {event:?})")
            }
            RuleDeclaration::FromGroup { from, arms } => {
                write!(f, "from(")?;
                fmt_source(from, f)?;
                write!(f, ") {{ ")?;
                fmt_separated(arms, f)?;
                write!(f, " }}")
            }
            RuleDeclaration::EventGroup { event, guard, arms } => {
                write!(f, "event({event:?}")?;
                if guard.is_some() {
                    write!(f, ", guard: <derivation>")?;
                }
                write!(f, ") {{ ")?;
                fmt_separated(arms, f)?;
                write!(f, " }}")
            }
        }
    }
}

// Declarations debug-print as their canonical rendering; the structured
// form adds nothing the diagnostics do not already quote.
impl<E: Stateful> fmt::Debug for RuleDeclaration<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

pub(crate) fn fmt_source<S: fmt::Debug>(
    source: &Source<S>,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    match source {
        Source::State(state) => write!(f, "{state:?}"),
        Source::Any => f.write_str("any"),
    }
}

pub(crate) fn fmt_destination<E: Stateful>(
    to: &Destination<E>,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    match to {
        Destination::Literal(state) => write!(f, "{state:?}"),
        Destination::Guarded(_) => f.write_str("<derivation>"),
    }
}

fn fmt_separated<T: fmt::Display>(items: &[T], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str("; ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Clone, PartialEq, Debug, Serialize)]
    enum TestState {
        Locked,
        Unlocked,
        Opened,
    }

    #[derive(Clone)]
    struct Door {
        state: TestState,
    }

    impl Stateful for Door {
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
    fn simple_declaration_renders_canonically() {
        let decl = RuleDeclaration::<Door>::simple(TestState::Locked, "unlock", TestState::Unlocked);
        assert_eq!(
            decl.to_string(),
            "from(Locked, to: Unlocked, event: \"unlock\")"
        );
    }

    #[test]
    fn any_state_renders_the_marker() {
        let decl = RuleDeclaration::<Door>::any_state("reset", TestState::Locked);
        assert_eq!(decl.to_string(), "from(any, to: Locked, event: \"reset\")");
    }

    #[test]
    fn derived_destination_renders_opaquely() {
        let decl =
            RuleDeclaration::<Door>::derived(TestState::Locked, "unlock", |_| TestState::Unlocked);
        assert_eq!(
            decl.to_string(),
            "from(Locked, to: <derivation>, event: \"unlock\")"
        );
    }

    #[test]
    fn from_group_renders_arms_in_order() {
        let decl = RuleDeclaration::<Door>::from_group(
            TestState::Unlocked,
            vec![
                TargetArm::to("lock", TestState::Locked),
                TargetArm::to("open", TestState::Opened),
            ],
        );
        assert_eq!(
            decl.to_string(),
            "from(Unlocked) { to(Locked, event: \"lock\"); to(Opened, event: \"open\") }"
        );
    }

    #[test]
    fn guarded_event_group_renders_guard_and_bare_sources() {
        let decl = RuleDeclaration::<Door>::guarded_event_group(
            "reset",
            |_| TestState::Locked,
            vec![
                EventArm::source(TestState::Unlocked),
                EventArm::source(TestState::Opened),
            ],
        );
        assert_eq!(
            decl.to_string(),
            "event(\"reset\", guard: <derivation>) { from(Unlocked); from(Opened) }"
        );
    }

    #[test]
    fn nested_arm_renders_the_inner_block() {
        let decl = RuleDeclaration::<Door>::event_group(
            "reset",
            vec![EventArm::nested(
                TestState::Opened,
                vec![TargetArm::to("shut", TestState::Locked)],
            )],
        );
        assert_eq!(
            decl.to_string(),
            "event(\"reset\") { from(Opened) { to(Locked, event: \"shut\") } }"
        );
    }

    #[test]
    fn declarations_are_cloneable() {
        let decl = RuleDeclaration::<Door>::guarded_event_group(
            "reset",
            |_| TestState::Locked,
            vec![EventArm::source_to(TestState::Opened, TestState::Locked)],
        );
        assert_eq!(decl.clone().to_string(), decl.to_string());
    }
}
