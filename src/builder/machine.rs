//! Builder for assembling machines.

use crate::builder::error::BuildError;
use crate::config::DispatchConfig;
use crate::core::{Action, MachineDef, State};
use crate::dispatch::{
    default_hook, AcceptShared, ActionContext, Delegate, Hook, Machine, MachineTable, SharedPeer,
    SubMachine, SubMachineDescriptor,
};
use crate::invariants::check_ownership;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;
use stillwater::validation::Validation;

/// Builder for assembling a machine with a fluent API.
///
/// The builder is where action identifiers are bound to implementations.
/// Every action the table refers to but that was never bound with
/// [`action`](Self::action) resolves to [`default_hook`] when the machine is
/// built.
pub struct MachineBuilder<D: MachineDef> {
    name: Option<String>,
    initial: Option<D::State>,
    table: Option<Arc<MachineTable<D>>>,
    data: Option<D::Data>,
    hooks: HashMap<D::Action, Hook<D>>,
    sub_machines: Vec<Box<dyn Delegate<D::Event>>>,
    peers: Vec<Box<dyn SharedPeer<D::Shared>>>,
    config: DispatchConfig,
}

impl<D: MachineDef> MachineBuilder<D> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            name: None,
            initial: None,
            table: None,
            data: None,
            hooks: HashMap::new(),
            sub_machines: Vec::new(),
            peers: Vec::new(),
            config: DispatchConfig::default(),
        }
    }

    /// Set the machine name used in logs and lookups (required).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: D::State) -> Self {
        self.initial = Some(state);
        self
    }

    /// Set the transition table (required).
    pub fn table(mut self, table: impl Into<Arc<MachineTable<D>>>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Set the machine-local data (required).
    pub fn data(mut self, data: D::Data) -> Self {
        self.data = Some(data);
        self
    }

    /// Bind an implementation to an action identifier.
    /// Binding the same identifier twice keeps the last implementation.
    pub fn action<F>(mut self, action: D::Action, hook: F) -> Self
    where
        F: Fn(&mut ActionContext<'_, D>) -> Option<D::Event> + 'static,
    {
        self.hooks.insert(action, Rc::new(hook));
        self
    }

    /// Register a sub-machine owning the events its descriptor claims.
    pub fn sub_machine<C: MachineDef>(
        mut self,
        descriptor: SubMachineDescriptor<C::Event, D::Event>,
        machine: Machine<C>,
    ) -> Self {
        self.sub_machines.push(Box::new(SubMachine::new(descriptor, machine)));
        self
    }

    /// Register a peer that receives this machine's broadcasts.
    pub fn peer<C>(mut self, machine: Machine<C>) -> Self
    where
        C: AcceptShared<D::Shared>,
    {
        self.peers.push(Box::new(machine));
        self
    }

    /// Set dispatch configuration (defaults to `DispatchConfig::default()`).
    pub fn config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the machine.
    /// Returns an error if required fields are missing or sub-machine
    /// ownership is ambiguous.
    pub fn build(self) -> Result<Machine<D>, BuildError> {
        let name = self.name.ok_or(BuildError::MissingName)?;
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        let table = self.table.ok_or(BuildError::MissingTable)?;
        let data = self.data.ok_or(BuildError::MissingData)?;

        if let Validation::Failure(conflicts) = check_ownership(&self.sub_machines) {
            return Err(BuildError::OwnershipConflict(conflicts.iter().cloned().collect()));
        }

        let hooks = resolve_hooks(&name, &table, self.hooks);

        tracing::debug!(
            machine = %name,
            initial = initial.name(),
            sub_machines = self.sub_machines.len(),
            peers = self.peers.len(),
            "machine assembled"
        );

        Ok(Machine::assemble(
            name,
            initial,
            table,
            hooks,
            data,
            self.sub_machines,
            self.peers,
            self.config,
        ))
    }
}

impl<D: MachineDef> Default for MachineBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve one hook per table cell, falling back to the default hook.
fn resolve_hooks<D: MachineDef>(
    machine: &str,
    table: &MachineTable<D>,
    mut bound: HashMap<D::Action, Hook<D>>,
) -> Vec<Hook<D>> {
    let mut resolved: HashMap<D::Action, Hook<D>> = HashMap::new();
    for action in table.actions() {
        let hook = bound.remove(&action).unwrap_or_else(|| default_hook::<D>(action));
        resolved.insert(action, hook);
    }

    for action in bound.keys() {
        tracing::debug!(
            machine,
            action = action.name(),
            "bound action is not used by the table"
        );
    }

    table
        .cells()
        .iter()
        .map(|cell| Rc::clone(&resolved[&cell.action]))
        .collect()
}
