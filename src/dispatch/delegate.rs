//! Sub-machine delegation.
//!
//! A parent reserves part of its event namespace for a child. Events the
//! descriptor claims are lowered into the child's namespace and dispatched
//! there; whatever the child cannot resolve is lifted back into the parent's
//! namespace for the parent to route. A lifted event that lowers straight
//! back to something the child has no route for is escalated past the
//! parent instead.

use crate::core::{Event, MachineDef};
use crate::dispatch::machine::Machine;
use std::any::Any;

/// Registration record for one sub-machine.
///
/// `lower` is the ownership classification: it returns the child event for
/// every parent event the child owns and `None` for everything else. `lift`
/// maps anything the child hands back into the parent's namespace, either to
/// a continuation event of the parent or to an event the parent escalates.
pub struct SubMachineDescriptor<CE, PE> {
    pub name: &'static str,
    pub lower: fn(&PE) -> Option<CE>,
    pub lift: fn(CE) -> PE,
}

impl<CE, PE> Clone for SubMachineDescriptor<CE, PE> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<CE, PE> Copy for SubMachineDescriptor<CE, PE> {}

/// What a parent does with the outcome of a delegated event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handoff<PE> {
    /// The child consumed the whole chain.
    Settled,
    /// The lifted event is routed again in the parent.
    Reroute(PE),
    /// The lifted event would land back in the child, which has no route
    /// for it, so the parent escalates it unchanged.
    PassThrough(PE),
}

/// A child machine as seen from its parent's dispatch loop.
pub trait Delegate<PE> {
    fn name(&self) -> &str;

    /// Whether `event` belongs to this sub-machine.
    fn owns(&self, event: &PE) -> bool;

    /// Whether `event` lowers to a row of the child's own table.
    fn routes_to_table(&self, event: &PE) -> bool;

    /// Run the child to quiescence on `event` and lift what it hands back.
    fn delegate(&mut self, event: PE) -> Handoff<PE>;

    /// The child machine, for inspection.
    fn machine_any(&self) -> &dyn Any;
}

/// A child machine bound to its descriptor.
pub struct SubMachine<C: MachineDef, PE> {
    descriptor: SubMachineDescriptor<C::Event, PE>,
    machine: Machine<C>,
}

impl<C: MachineDef, PE> SubMachine<C, PE> {
    pub fn new(descriptor: SubMachineDescriptor<C::Event, PE>, machine: Machine<C>) -> Self {
        Self {
            descriptor,
            machine,
        }
    }

    pub fn machine(&self) -> &Machine<C> {
        &self.machine
    }
}

impl<C: MachineDef, PE: Event> Delegate<PE> for SubMachine<C, PE> {
    fn name(&self) -> &str {
        self.descriptor.name
    }

    fn owns(&self, event: &PE) -> bool {
        (self.descriptor.lower)(event).is_some()
    }

    fn routes_to_table(&self, event: &PE) -> bool {
        (self.descriptor.lower)(event).is_some_and(|lowered| lowered.row().is_some())
    }

    fn delegate(&mut self, event: PE) -> Handoff<PE> {
        let Some(lowered) = (self.descriptor.lower)(&event) else {
            return Handoff::PassThrough(event);
        };

        tracing::trace!(
            sub_machine = self.descriptor.name,
            event = lowered.name(),
            "delegating to sub-machine"
        );

        let Some(unresolved) = self.machine.dispatch(lowered) else {
            return Handoff::Settled;
        };
        let lifted = (self.descriptor.lift)(unresolved);

        if (self.descriptor.lower)(&lifted).is_some_and(|again| !self.machine.routes(&again)) {
            tracing::trace!(
                sub_machine = self.descriptor.name,
                from = unresolved.name(),
                to = lifted.name(),
                "sub-machine escalation passes through parent"
            );
            return Handoff::PassThrough(lifted);
        }

        tracing::trace!(
            sub_machine = self.descriptor.name,
            from = unresolved.name(),
            to = lifted.name(),
            "sub-machine handed event back"
        );
        Handoff::Reroute(lifted)
    }

    fn machine_any(&self) -> &dyn Any {
        &self.machine
    }
}
