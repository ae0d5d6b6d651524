//! Hierarchical Communicator
//!
//! This example replays a full exchange against the communicator hierarchy.
//!
//! Key concepts:
//! - A top-level machine delegating session events to a sub-machine
//! - Shared events broadcast to a peer that drains the message queue
//! - Payload stored into machine data before dispatch
//!
//! Run with: RUST_LOG=debug cargo run --example communicator

use hsm_dispatch::communicator::{self, establish_session, send_message, EstablishSession};
use hsm_dispatch::communicator::{HsmEvent, Message, MessageSender};
use hsm_dispatch::{DispatchConfig, State};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Hierarchical Communicator Example ===\n");

    let config = DispatchConfig::from_env()?;
    let mut hsm = communicator::assemble(config)?;

    let steps: [(HsmEvent, Option<Message>); 7] = [
        (HsmEvent::Init, None),
        (HsmEvent::SendMessage, None),
        (HsmEvent::MessageReceived, Some(Message::Step0Response)),
        (HsmEvent::SendMessage, None),
        (HsmEvent::MessageReceived, Some(Message::Step1Response)),
        (HsmEvent::MessageReceived, Some(Message::Ack)),
        (HsmEvent::MessageReceived, Some(Message::Ack)),
    ];

    for (event, payload) in steps {
        match payload {
            Some(message) => {
                println!("-> {event:?}({message:?})");
                hsm.inject_with(event, message)?;
            }
            None => {
                println!("-> {event:?}");
                hsm.inject(event)?;
            }
        }

        let session = hsm
            .sub_machine::<EstablishSession>(establish_session::NAME)
            .map(|machine| machine.current_state().name().to_string())
            .unwrap_or_default();
        let sender = hsm
            .peer::<MessageSender>(send_message::NAME)
            .map(|machine| machine.current_state().name().to_string())
            .unwrap_or_default();

        println!(
            "   top: {:<20} session: {:<17} sender: {:<12} queued: {}",
            hsm.current_state().name(),
            session,
            sender,
            hsm.data().queue.count()
        );
    }

    println!("\nMessages sent:");
    for message in hsm.data().outbox.sent() {
        println!("  {message:?}");
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
