//! Macros for ergonomic state and entity declarations.

/// Declare a state enum with the derives the rule table needs.
///
/// Generates the enum with `Clone`, `PartialEq`, `Debug`, and serde
/// derives, which is everything required for the type to qualify as a
/// state value.
///
/// # Example
///
/// ```
/// use turnstile::state_enum;
///
/// state_enum! {
///     pub enum WorkflowState {
///         Draft,
///         Review,
///         Published,
///     }
/// }
///
/// assert_eq!(WorkflowState::Draft, WorkflowState::Draft);
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }
    };
}

/// Implement the entity accessor contract for a struct.
///
/// By default the state lives in a field named `state`; pass `field:` to
/// point at a different one. The generated impl reads that field and
/// replaces it copy-on-write, which is all the resolver ever does to an
/// entity.
///
/// # Example
///
/// ```
/// use turnstile::{state_enum, stateful};
/// use turnstile::core::Stateful;
///
/// state_enum! {
///     enum TaskState {
///         Pending,
///         Running,
///     }
/// }
///
/// #[derive(Clone)]
/// struct Task {
///     state: TaskState,
/// }
///
/// stateful!(Task, state: TaskState);
///
/// // An externally-chosen field name works too:
/// #[derive(Clone)]
/// struct Job {
///     phase: TaskState,
/// }
///
/// stateful!(Job, state: TaskState, field: phase);
///
/// let task = Task { state: TaskState::Pending };
/// assert_eq!(*task.state(), TaskState::Pending);
///
/// let job = Job { phase: TaskState::Pending }.with_state(TaskState::Running);
/// assert_eq!(*job.state(), TaskState::Running);
/// ```
#[macro_export]
macro_rules! stateful {
    ($entity:ty, state: $state:ty) => {
        $crate::stateful!($entity, state: $state, field: state);
    };
    ($entity:ty, state: $state:ty, field: $field:ident) => {
        impl $crate::core::Stateful for $entity {
            type State = $state;

            fn state(&self) -> &$state {
                &self.$field
            }

            fn with_state(mut self, next: $state) -> Self {
                self.$field = next;
                self
            }
        }
    };
}
