//! The dispatch runtime.
//!
//! One generic engine, instantiated per machine:
//!
//! - **Tables**: total `[event][state]` grids of `(action, next state)`
//! - **Hooks**: action implementations resolved once, when a machine is built,
//!   with a logging default for every identifier left unbound
//! - **Dispatch loop**: run-to-completion processing of a machine's own
//!   event chain, delegating to sub-machines and escalating what nobody owns
//! - **Broadcast**: explicit forwarding of shared events to peer machines
//!
//! Dispatch is single-threaded. An action never blocks, and a machine must
//! not be re-entered from one of its own actions.

mod broadcast;
mod delegate;
mod error;
mod hook;
mod machine;
mod table;

pub use broadcast::{AcceptShared, SharedPeer};
pub use delegate::{Delegate, Handoff, SubMachine, SubMachineDescriptor};
pub use error::DispatchError;
pub use hook::{default_hook, ActionContext, Hook};
pub use machine::{AcceptPayload, Machine, MachineTable, MachineTrace};
pub use table::{TransitionCell, TransitionTable};
