//! Machine instances and the run-to-completion dispatch loop.

use crate::config::{DispatchConfig, UnownedEventPolicy};
use crate::core::{Action, DispatchTrace, Event, MachineDef, State, TraceEntry};
use crate::dispatch::broadcast::SharedPeer;
use crate::dispatch::delegate::{Delegate, Handoff};
use crate::dispatch::error::DispatchError;
use crate::dispatch::hook::{ActionContext, Hook};
use crate::dispatch::table::TransitionTable;
use chrono::Utc;
use std::sync::Arc;

/// Trace type recorded by a machine defined by `D`.
pub type MachineTrace<D> =
    DispatchTrace<<D as MachineDef>::State, <D as MachineDef>::Event, <D as MachineDef>::Action>;

/// Table type used by a machine defined by `D`.
pub type MachineTable<D> =
    TransitionTable<<D as MachineDef>::State, <D as MachineDef>::Event, <D as MachineDef>::Action>;

/// Data translator for payload carried by an injected event.
///
/// Runs before dispatch starts, storing the payload into machine-local data
/// where the actions can read it.
pub trait AcceptPayload<P>: MachineDef {
    fn store(data: &mut Self::Data, event: &Self::Event, payload: P);
}

/// A running machine: current state, table, resolved hooks, and local data.
///
/// Machines are assembled once with
/// [`MachineBuilder`](crate::builder::MachineBuilder) and owned by the caller
/// that assembled them; sub-machines and peers are owned by their parent.
pub struct Machine<D: MachineDef> {
    name: String,
    state: D::State,
    table: Arc<MachineTable<D>>,
    hooks: Vec<Hook<D>>,
    data: D::Data,
    sub_machines: Vec<Box<dyn Delegate<D::Event>>>,
    peers: Vec<Box<dyn SharedPeer<D::Shared>>>,
    config: DispatchConfig,
    trace: MachineTrace<D>,
}

impl<D: MachineDef> Machine<D> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn assemble(
        name: String,
        initial: D::State,
        table: Arc<MachineTable<D>>,
        hooks: Vec<Hook<D>>,
        data: D::Data,
        sub_machines: Vec<Box<dyn Delegate<D::Event>>>,
        peers: Vec<Box<dyn SharedPeer<D::Shared>>>,
        config: DispatchConfig,
    ) -> Self {
        Self {
            name,
            state: initial,
            table,
            hooks,
            data,
            sub_machines,
            peers,
            trace: DispatchTrace::new(config.trace_limit),
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn current_state(&self) -> D::State {
        self.state
    }

    pub fn table(&self) -> &MachineTable<D> {
        &self.table
    }

    pub fn data(&self) -> &D::Data {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut D::Data {
        &mut self.data
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn trace(&self) -> &MachineTrace<D> {
        &self.trace
    }

    pub fn clear_trace(&mut self) {
        self.trace.clear();
    }

    pub fn sub_machine_count(&self) -> usize {
        self.sub_machines.len()
    }

    pub fn peer_count(&self) -> usize {
        self.peers.len()
    }

    /// Registered sub-machine `name`, if it is a machine defined by `C`.
    pub fn sub_machine<C: MachineDef>(&self, name: &str) -> Option<&Machine<C>> {
        self.sub_machines
            .iter()
            .find(|sub| sub.name() == name)
            .and_then(|sub| sub.machine_any().downcast_ref::<Machine<C>>())
    }

    /// Broadcast peer `name`, if it is a machine defined by `C`.
    pub fn peer<C: MachineDef>(&self, name: &str) -> Option<&Machine<C>> {
        self.peers
            .iter()
            .find(|peer| peer.name() == name)
            .and_then(|peer| peer.as_any().downcast_ref::<Machine<C>>())
    }

    /// Drive `event` to quiescence.
    ///
    /// Local events are looked up in the table, their action runs, and the
    /// state advances; the action's result becomes the next event. Events
    /// claimed by a sub-machine run in that sub-machine, and whatever it
    /// hands back is routed again here, unless it would only return to a
    /// sub-machine that has no route for it. Returns `None` once no event is
    /// pending, or the first event this machine cannot route, for the caller.
    pub fn dispatch(&mut self, event: D::Event) -> Option<D::Event> {
        let mut pending = Some(event);

        while let Some(event) = pending {
            pending = match event.row() {
                Some(row) => self.step(row, event),
                None => match self.sub_machines.iter_mut().find(|sub| sub.owns(&event)) {
                    Some(sub) => match sub.delegate(event) {
                        Handoff::Settled => None,
                        Handoff::Reroute(lifted) => Some(lifted),
                        Handoff::PassThrough(lifted) => return Some(lifted),
                    },
                    None => {
                        tracing::trace!(
                            machine = %self.name,
                            event = event.name(),
                            "event not owned here, escalating"
                        );
                        return Some(event);
                    }
                },
            };
        }

        None
    }

    /// Whether `event` has a row here or is claimed by a sub-machine.
    pub fn routes(&self, event: &D::Event) -> bool {
        event.row().is_some() || self.sub_machines.iter().any(|sub| sub.owns(event))
    }

    /// Top-level entry point: dispatch `event` and settle any escalation.
    ///
    /// With [`UnownedEventPolicy::Drop`] an event that escalates out of the
    /// hierarchy is logged and discarded; with
    /// [`UnownedEventPolicy::Reject`] it is returned as an error.
    pub fn inject(&mut self, event: D::Event) -> Result<(), DispatchError> {
        tracing::debug!(machine = %self.name, event = event.name(), "injecting event");

        let Some(unowned) = self.dispatch(event) else {
            return Ok(());
        };

        match self.config.unowned_events {
            UnownedEventPolicy::Drop => {
                tracing::warn!(
                    machine = %self.name,
                    event = unowned.name(),
                    "no machine owns event, dropping it"
                );
                Ok(())
            }
            UnownedEventPolicy::Reject => Err(DispatchError::Unowned {
                machine: self.name.clone(),
                event: unowned.name().to_string(),
            }),
        }
    }

    /// Store `payload` into machine data, then inject `event`.
    pub fn inject_with<P>(&mut self, event: D::Event, payload: P) -> Result<(), DispatchError>
    where
        D: AcceptPayload<P>,
    {
        D::store(&mut self.data, &event, payload);
        self.inject(event)
    }

    fn step(&mut self, row: usize, event: D::Event) -> Option<D::Event> {
        let from = self.state;
        let slot = MachineTable::<D>::slot(row, from);
        let cell = self.table.cells()[slot];

        tracing::trace!(
            machine = %self.name,
            event = event.name(),
            state = from.name(),
            action = cell.action.name(),
            "dispatching"
        );

        let hook = &self.hooks[slot];
        let mut ctx = ActionContext::new(&self.name, event, from, &mut self.data, &mut self.peers);
        let next_event = hook(&mut ctx);

        self.state = cell.next;
        self.trace.record(TraceEntry {
            event,
            action: cell.action,
            from,
            to: cell.next,
            timestamp: Utc::now(),
        });

        next_event
    }
}
