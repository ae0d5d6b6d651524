//! Shared-event broadcast between peer machines.
//!
//! Broadcast is independent of table ownership: an action hands a semantic
//! event (for example "initialize" or "message received") to every peer, and
//! each peer translates it into one of its own events.

use crate::core::{Event, MachineDef};
use crate::dispatch::machine::Machine;
use std::any::Any;

/// Translation of a shared event into a receiving machine's namespace.
///
/// `accept` may also copy data carried by the shared event into the
/// receiver's machine-local data. Returning `None` ignores the event.
pub trait AcceptShared<X>: MachineDef {
    fn accept(data: &mut Self::Data, shared: &X) -> Option<Self::Event>;
}

/// A machine that can be the target of a broadcast.
pub trait SharedPeer<X> {
    fn name(&self) -> &str;

    /// Translate `shared` and run this machine to quiescence.
    fn receive_shared(&mut self, shared: &X);

    fn as_any(&self) -> &dyn Any;
}

impl<C, X> SharedPeer<X> for Machine<C>
where
    C: AcceptShared<X>,
{
    fn name(&self) -> &str {
        Machine::name(self)
    }

    fn receive_shared(&mut self, shared: &X) {
        let Some(event) = C::accept(self.data_mut(), shared) else {
            tracing::trace!(machine = Machine::name(self), "shared event ignored");
            return;
        };

        if let Some(escalated) = self.dispatch(event) {
            tracing::debug!(
                machine = Machine::name(self),
                event = escalated.name(),
                "broadcast target escalated an event, dropping it"
            );
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
