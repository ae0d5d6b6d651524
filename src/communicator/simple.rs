//! Flat communicator with no bound actions.
//!
//! Every action runs the default hook, which makes this the smallest
//! machine the runtime can execute.

use crate::builder::{BuildError, MachineBuilder, TransitionTableBuilder};
use crate::config::DispatchConfig;
use crate::core::MachineDef;
use crate::dispatch::{Machine, MachineTable};
use crate::{action_enum, event_enum, state_enum};

pub const NAME: &str = "simpleCommunicator";

state_enum! {
    pub enum SimpleState {
        Idle,
        AwaitingAck,
    }
}

event_enum! {
    pub enum SimpleEvent {
        SendMessage,
        Ack,
    }
}

action_enum! {
    pub enum SimpleAction {
        SendMessage,
        QueueMessage,
        CheckQueue,
        NoAction,
    }
}

pub struct SimpleCommunicator;

impl MachineDef for SimpleCommunicator {
    type State = SimpleState;
    type Event = SimpleEvent;
    type Action = SimpleAction;
    type Data = ();
    type Shared = ();
}

pub fn table() -> Result<MachineTable<SimpleCommunicator>, BuildError> {
    use SimpleState::*;

    TransitionTableBuilder::new()
        .on(SimpleEvent::SendMessage, Idle, SimpleAction::SendMessage, AwaitingAck)
        .on(SimpleEvent::SendMessage, AwaitingAck, SimpleAction::QueueMessage, AwaitingAck)
        .on(SimpleEvent::Ack, Idle, SimpleAction::NoAction, Idle)
        .on(SimpleEvent::Ack, AwaitingAck, SimpleAction::CheckQueue, Idle)
        .build()
}

pub fn machine(config: DispatchConfig) -> Result<Machine<SimpleCommunicator>, BuildError> {
    MachineBuilder::<SimpleCommunicator>::new()
        .name(NAME)
        .initial(SimpleState::Idle)
        .table(table()?)
        .data(())
        .config(config)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_then_ack_returns_to_idle() {
        let mut machine = machine(DispatchConfig::default()).unwrap();

        assert_eq!(machine.dispatch(SimpleEvent::SendMessage), None);
        assert_eq!(machine.current_state(), SimpleState::AwaitingAck);

        assert_eq!(machine.dispatch(SimpleEvent::Ack), None);
        assert_eq!(machine.current_state(), SimpleState::Idle);

        assert_eq!(
            machine.trace().actions(),
            vec![SimpleAction::SendMessage, SimpleAction::CheckQueue]
        );
    }

    #[test]
    fn second_send_is_queued() {
        let mut machine = machine(DispatchConfig::default()).unwrap();
        machine.dispatch(SimpleEvent::SendMessage);
        machine.dispatch(SimpleEvent::SendMessage);

        assert_eq!(machine.current_state(), SimpleState::AwaitingAck);
        assert_eq!(machine.trace().last().map(|entry| entry.action), Some(SimpleAction::QueueMessage));
    }
}
