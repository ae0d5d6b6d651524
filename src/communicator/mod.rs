//! A worked hierarchy: a communicator that establishes a session with a
//! remote peer before sending queued messages.
//!
//! - [`hsm`]: the top level, which queues outbound messages
//! - [`establish_session`]: sub-machine running the session handshake
//! - [`send_message`]: broadcast peer draining the queue
//! - [`simple`]: a flat variant with every action left at its default
//!
//! ```
//! use hsm_dispatch::communicator::{self, HsmEvent, Message};
//! use hsm_dispatch::DispatchConfig;
//!
//! let mut hsm = communicator::assemble(DispatchConfig::default()).unwrap();
//! hsm.inject(HsmEvent::Init).unwrap();
//! hsm.inject(HsmEvent::SendMessage).unwrap();
//!
//! assert_eq!(hsm.data().outbox.sent(), vec![Message::Step0Request]);
//! assert_eq!(hsm.data().queue.count(), 1);
//! ```

pub mod establish_session;
pub mod hsm;
pub mod message;
pub mod send_message;
pub mod simple;

pub use establish_session::{EstablishSession, SessionAction, SessionEvent, SessionState};
pub use hsm::{HsmAction, HsmCommunicator, HsmData, HsmEvent, HsmShared, HsmState};
pub use message::{Message, Outbox};
pub use send_message::{MessageSender, SendAction, SendEvent, SendState};

use crate::builder::BuildError;
use crate::config::DispatchConfig;
use crate::core::QueueCounter;
use crate::dispatch::Machine;

/// Build the whole communicator hierarchy.
///
/// The queue counter and outbox are created here and shared by every
/// machine that uses them.
pub fn assemble(config: DispatchConfig) -> Result<Machine<HsmCommunicator>, BuildError> {
    let queue = QueueCounter::new();
    let outbox = Outbox::new();

    let session = establish_session::machine(outbox.share(), config)?;
    let sender = send_message::machine(queue.share(), outbox.share(), config)?;

    tracing::info!(machine = hsm::NAME, "assembling communicator");
    hsm::machine(HsmData::new(queue, outbox), session, sender, config)
}
