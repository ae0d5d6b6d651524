//! Action hooks and the context they run in.

use crate::core::{Action, MachineDef};
use crate::dispatch::broadcast::SharedPeer;
use std::rc::Rc;

/// Implementation bound to an action identifier.
///
/// A hook runs to completion, may mutate machine-local data, and returns the
/// next event for its machine (`None` for no further event).
pub type Hook<D> =
    Rc<dyn Fn(&mut ActionContext<'_, D>) -> Option<<D as MachineDef>::Event>>;

/// Everything an action may touch while it runs.
pub struct ActionContext<'a, D: MachineDef> {
    machine: &'a str,
    event: D::Event,
    state: D::State,
    data: &'a mut D::Data,
    peers: &'a mut [Box<dyn SharedPeer<D::Shared>>],
}

impl<'a, D: MachineDef> ActionContext<'a, D> {
    pub(crate) fn new(
        machine: &'a str,
        event: D::Event,
        state: D::State,
        data: &'a mut D::Data,
        peers: &'a mut [Box<dyn SharedPeer<D::Shared>>],
    ) -> Self {
        Self {
            machine,
            event,
            state,
            data,
            peers,
        }
    }

    /// Name of the machine running the action.
    pub fn machine(&self) -> &str {
        self.machine
    }

    /// The event that selected this action.
    pub fn event(&self) -> D::Event {
        self.event
    }

    /// The state the machine is leaving.
    pub fn state(&self) -> D::State {
        self.state
    }

    pub fn data(&self) -> &D::Data {
        &*self.data
    }

    pub fn data_mut(&mut self) -> &mut D::Data {
        &mut *self.data
    }

    /// Forward a shared event into every peer's dispatch loop.
    ///
    /// Each peer runs to quiescence before the next one is entered. The
    /// outcome has no influence on this machine's next event.
    pub fn broadcast(&mut self, shared: &D::Shared) {
        tracing::debug!(
            machine = self.machine,
            peers = self.peers.len(),
            "broadcasting shared event"
        );
        for peer in self.peers.iter_mut() {
            peer.receive_shared(shared);
        }
    }
}

/// Hook used for every action without a bound implementation.
///
/// Logs and returns no event, so the dispatch loop always terminates.
pub fn default_hook<D: MachineDef>(action: D::Action) -> Hook<D> {
    Rc::new(move |ctx: &mut ActionContext<'_, D>| -> Option<D::Event> {
        tracing::debug!(
            machine = ctx.machine(),
            action = action.name(),
            "no implementation bound, returning no event"
        );
        None
    })
}
