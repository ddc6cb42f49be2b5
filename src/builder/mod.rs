//! Declaration surface and rule compiler.
//!
//! This module is the definition-time half of the crate: declaration
//! shapes, the builder that validates and expands them into a normalized
//! [`RuleTable`](crate::core::RuleTable), the compile-time diagnostics,
//! and declaration macros.

pub mod declaration;
pub mod error;
pub mod macros;
pub mod table;

pub use declaration::{EventArm, RuleDeclaration, Source, TargetArm};
pub use error::CompileError;
pub use table::RuleTableBuilder;

use crate::core::{RuleTable, Stateful};

/// Compile an ordered declaration sequence into a rule table.
///
/// Convenience for hosts that assemble declarations as data before
/// handing them over; equivalent to
/// `RuleTableBuilder::from_declarations(declarations).build()`.
///
/// # Example
///
/// ```
/// use turnstile::builder::{compile, RuleDeclaration};
/// use turnstile::{state_enum, stateful};
///
/// state_enum! {
///     enum LampState {
///         Off,
///         On,
///     }
/// }
///
/// #[derive(Clone)]
/// struct Lamp {
///     state: LampState,
/// }
///
/// stateful!(Lamp, state: LampState);
///
/// let table = compile::<Lamp>(vec![
///     RuleDeclaration::simple(LampState::Off, "flip", LampState::On),
///     RuleDeclaration::simple(LampState::On, "flip", LampState::Off),
/// ])
/// .unwrap();
///
/// assert_eq!(table.events(), &["flip"]);
/// ```
pub fn compile<E: Stateful>(
    declarations: Vec<RuleDeclaration<E>>,
) -> Result<RuleTable<E>, CompileError> {
    RuleTableBuilder::from_declarations(declarations).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::state_enum! {
        enum TestState {
            Idle,
            Busy,
        }
    }

    #[derive(Clone)]
    struct Worker {
        state: TestState,
    }

    crate::stateful!(Worker, state: TestState);

    #[test]
    fn compile_builds_from_a_declaration_vec() {
        let table = compile::<Worker>(vec![
            RuleDeclaration::simple(TestState::Idle, "start", TestState::Busy),
            RuleDeclaration::simple(TestState::Busy, "finish", TestState::Idle),
        ])
        .unwrap();

        assert_eq!(table.rules().len(), 2);
        assert_eq!(table.states(), &[TestState::Idle, TestState::Busy]);
    }

    #[test]
    fn compile_propagates_diagnostics() {
        let result = compile::<Worker>(vec![RuleDeclaration::derived(
            TestState::Idle,
            "start",
            |_| TestState::Busy,
        )]);

        assert!(matches!(
            result,
            Err(CompileError::UnsupportedSyntax { .. })
        ));
    }
}
