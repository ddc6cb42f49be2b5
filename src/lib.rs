//! Turnstile: a declarative transition-rule state machine library
//!
//! Turnstile lets an application declare, as data, the legal transitions
//! of a finite-state entity - "from state, on event, to state" rules -
//! and compiles them into an immutable rule table with one operation:
//! [`transit`](core::RuleTable::transit), which applies the first matching
//! rule to an entity or returns a structured rejection.
//!
//! # Core Concepts
//!
//! - **Rules as data**: declarations are expanded and normalized at
//!   definition time; resolution is an ordered scan, first match wins
//! - **Entities stay yours**: the resolver only reads the state field and
//!   returns an updated copy, via the [`Stateful`](core::Stateful) contract
//! - **Guards compute destinations**: an event-grouped declaration may
//!   carry a function that derives the destination from entity data
//! - **Introspection**: every table reports its distinct states, distinct
//!   events, and normalized transitions in declaration order
//!
//! # Example
//!
//! ```rust
//! use turnstile::builder::RuleTableBuilder;
//! use turnstile::core::Stateful;
//! use turnstile::{state_enum, stateful};
//!
//! state_enum! {
//!     enum DoorState {
//!         Locked,
//!         Unlocked,
//!         Opened,
//!     }
//! }
//!
//! #[derive(Clone)]
//! struct Door {
//!     state: DoorState,
//! }
//!
//! stateful!(Door, state: DoorState);
//!
//! let table = RuleTableBuilder::<Door>::new()
//!     .rule(DoorState::Locked, "unlock", DoorState::Unlocked)
//!     .rule(DoorState::Unlocked, "lock", DoorState::Locked)
//!     .rule(DoorState::Unlocked, "open", DoorState::Opened)
//!     .build()
//!     .unwrap();
//!
//! let door = Door { state: DoorState::Locked };
//! let door = table.transit(&door, "unlock").unwrap();
//! assert_eq!(*door.state(), DoorState::Unlocked);
//!
//! // No rule for "close" in Unlocked: a normal, branchable rejection.
//! assert!(table.transit(&door, "close").is_err());
//! ```

pub mod builder;
pub mod core;
pub mod resolver;

// Re-export commonly used types
pub use builder::{CompileError, RuleDeclaration, RuleTableBuilder};
pub use core::{Derivation, Destination, RuleTable, State, Stateful, TransitionRule};
pub use resolver::TransitionError;
