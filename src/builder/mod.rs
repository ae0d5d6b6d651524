//! Builder API for assembling tables and machines.
//!
//! This module provides fluent builders and macros for declaring machine
//! vocabularies and tables with minimal boilerplate while keeping every
//! construction-time invariant checked.

pub mod error;
pub mod machine;
pub mod macros;
pub mod table;

pub use error::BuildError;
pub use machine::MachineBuilder;
pub use table::TransitionTableBuilder;

use crate::core::{Action, State};

/// Cell factory for [`TransitionTableBuilder::on_each`] that runs `action`
/// and leaves the state unchanged.
///
/// # Example
///
/// ```
/// use hsm_dispatch::builder::{stay, TransitionTableBuilder};
/// use hsm_dispatch::{action_enum, event_enum, state_enum};
///
/// state_enum! {
///     enum LinkState { Down, Up }
/// }
/// event_enum! {
///     enum LinkEvent { Poll }
/// }
/// action_enum! {
///     enum LinkAction { NoAction }
/// }
///
/// let table = TransitionTableBuilder::<LinkState, LinkEvent, LinkAction>::new()
///     .on_each(LinkEvent::Poll, stay(LinkAction::NoAction))
///     .build()
///     .unwrap();
///
/// assert_eq!(table.cell(&LinkEvent::Poll, LinkState::Up).unwrap().next, LinkState::Up);
/// ```
pub fn stay<S: State, A: Action>(action: A) -> impl Fn(S) -> (A, S) {
    move |state| (action, state)
}

/// Cell factory for [`TransitionTableBuilder::on_each`] that runs `action`
/// and moves to `next` from every state.
pub fn goto<S: State, A: Action>(action: A, next: S) -> impl Fn(S) -> (A, S) {
    move |_| (action, next)
}
