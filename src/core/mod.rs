//! Core vocabulary shared by every machine.
//!
//! This module contains the typed building blocks of a hierarchy:
//! - States, events, and action identifiers via the `State`, `Event`, and
//!   `Action` traits
//! - `MachineDef`, which ties one machine's vocabulary together
//! - The shared `QueueCounter` resource
//! - Bounded dispatch traces

mod action;
mod def;
mod event;
mod queue;
mod state;
mod trace;

pub use action::Action;
pub use def::MachineDef;
pub use event::Event;
pub use queue::QueueCounter;
pub use state::State;
pub use trace::{DispatchTrace, TraceEntry};
