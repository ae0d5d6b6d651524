//! Simple Communicator
//!
//! This example runs a flat machine with no bound actions.
//!
//! Key concepts:
//! - Every action falls back to the default hook
//! - The dispatch trace shows which actions ran
//!
//! Run with: RUST_LOG=debug cargo run --example simple_communicator

use hsm_dispatch::communicator::simple::{self, SimpleEvent};
use hsm_dispatch::{Action, DispatchConfig, State};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Simple Communicator Example ===\n");

    let mut machine = simple::machine(DispatchConfig::default())?;

    for event in [SimpleEvent::SendMessage, SimpleEvent::Ack] {
        machine.inject(event)?;
        println!("-> {event:?}: now {}", machine.current_state().name());
    }

    println!("\nActions run:");
    for entry in machine.trace().transitions() {
        println!(
            "  {} -> {} via {}",
            entry.from.name(),
            entry.to.name(),
            entry.action.name()
        );
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
