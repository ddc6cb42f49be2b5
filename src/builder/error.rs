//! Compile-time errors raised while building a rule table.

use thiserror::Error;

/// Errors raised by [`RuleTableBuilder::build`](crate::builder::RuleTableBuilder::build).
///
/// Every variant is fatal to the build - there is no partial or degraded
/// table, and retrying without changing the declarations is pointless
/// because building is deterministic. Diagnostics quote the offending
/// declaration in its canonical rendering so the host can find and fix it.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A deprecated declaration shape: a `from`-block nested inside an
    /// `event`-block, or a derivation function supplied as a plain `to`
    /// destination outside a guarded event-group.
    #[error("unsupported declaration syntax `{declaration}`. Rewrite it as `{suggestion}`")]
    UnsupportedSyntax {
        /// Canonical rendering of the offending declaration.
        declaration: String,
        /// Rendering of the recommended replacement shape.
        suggestion: String,
    },

    /// An arm of an unguarded event-group has no destination. Add a `to:`
    /// to the arm, or attach a guard to the event block.
    #[error("missing destination in `{declaration}`. Give the arm a to: destination or add a guard: to the event block")]
    MissingDestination {
        /// Canonical rendering of the offending declaration.
        declaration: String,
    },
}
