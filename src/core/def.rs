//! Machine definitions.

use super::{Action, Event, State};

/// Binds together the vocabulary of one machine.
///
/// Implementors are usually empty marker types; the machine's runtime value
/// is a [`Machine`](crate::dispatch::Machine) parameterized by the marker.
///
/// `Shared` is the type of semantic events this machine may broadcast to its
/// peers. Machines that never broadcast use `()`.
pub trait MachineDef: 'static {
    type State: State;
    type Event: Event;
    type Action: Action;
    type Data: 'static;
    type Shared: 'static;
}
