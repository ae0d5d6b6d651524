//! hsm-dispatch: a table-driven hierarchical state machine runtime
//!
//! Each machine is a total `[event][state]` table of `(action, next state)`
//! cells. Actions are identifiers in the table and get their implementation
//! when the machine is built; any identifier left unbound falls back to a
//! logging default. Dispatch is run-to-completion: the event returned by an
//! action is processed next, until none is left.
//!
//! # Core Concepts
//!
//! - **Vocabulary**: `State`, `Event` and `Action` types tied together by a
//!   `MachineDef`
//! - **Delegation**: a parent reserves part of its event namespace for a
//!   sub-machine and routes whatever the child hands back
//! - **Broadcast**: actions forward shared events to peer machines
//! - **Validation**: tables must be total and ownership unambiguous before a
//!   machine can be built
//!
//! # Example
//!
//! ```rust
//! use hsm_dispatch::core::MachineDef;
//! use hsm_dispatch::{action_enum, event_enum, state_enum};
//! use hsm_dispatch::{DispatchConfig, MachineBuilder, TransitionTableBuilder};
//!
//! state_enum! {
//!     enum DoorState { Closed, Open }
//! }
//! event_enum! {
//!     enum DoorEvent { Push, Pull }
//! }
//! action_enum! {
//!     enum DoorAction { Swing, NoAction }
//! }
//!
//! struct Door;
//!
//! impl MachineDef for Door {
//!     type State = DoorState;
//!     type Event = DoorEvent;
//!     type Action = DoorAction;
//!     type Data = u32;
//!     type Shared = ();
//! }
//!
//! let table = TransitionTableBuilder::new()
//!     .on(DoorEvent::Push, DoorState::Closed, DoorAction::Swing, DoorState::Open)
//!     .on(DoorEvent::Push, DoorState::Open, DoorAction::NoAction, DoorState::Open)
//!     .on(DoorEvent::Pull, DoorState::Closed, DoorAction::NoAction, DoorState::Closed)
//!     .on(DoorEvent::Pull, DoorState::Open, DoorAction::Swing, DoorState::Closed)
//!     .build()
//!     .unwrap();
//!
//! let mut door = MachineBuilder::<Door>::new()
//!     .name("door")
//!     .initial(DoorState::Closed)
//!     .table(table)
//!     .data(0)
//!     .action(DoorAction::Swing, |ctx| {
//!         *ctx.data_mut() += 1;
//!         None
//!     })
//!     .config(DispatchConfig::default())
//!     .build()
//!     .unwrap();
//!
//! door.inject(DoorEvent::Push).unwrap();
//! door.inject(DoorEvent::Pull).unwrap();
//!
//! assert_eq!(door.current_state(), DoorState::Closed);
//! assert_eq!(*door.data(), 2);
//! ```

pub mod builder;
pub mod communicator;
pub mod config;
pub mod core;
pub mod dispatch;
pub mod invariants;

// Re-export commonly used types
pub use builder::{BuildError, MachineBuilder, TransitionTableBuilder};
pub use config::{ConfigError, DispatchConfig, UnownedEventPolicy};
pub use core::{Action, Event, MachineDef, QueueCounter, State};
pub use dispatch::{DispatchError, Machine};
