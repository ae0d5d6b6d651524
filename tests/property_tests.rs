//! Property-based tests for the dispatch runtime.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use hsm_dispatch::communicator::{
    self, establish_session, hsm, send_message, HsmEvent, Message, SessionEvent,
};
use hsm_dispatch::core::{Event, QueueCounter, State};
use hsm_dispatch::dispatch::MachineTable;
use hsm_dispatch::{DispatchConfig, MachineDef, UnownedEventPolicy};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum QueueOp {
    Enqueue,
    Dequeue,
}

#[derive(Debug, Clone, Copy)]
enum Input {
    Init,
    SendMessage,
    Received(Message),
}

prop_compose! {
    fn arbitrary_queue_op()(enqueue in any::<bool>()) -> QueueOp {
        if enqueue { QueueOp::Enqueue } else { QueueOp::Dequeue }
    }
}

fn arbitrary_message() -> impl Strategy<Value = Message> {
    prop::sample::select(vec![
        Message::Step0Request,
        Message::Step0Response,
        Message::Step1Request,
        Message::Step1Response,
        Message::Payload,
        Message::Ack,
    ])
}

fn arbitrary_input() -> impl Strategy<Value = Input> {
    prop_oneof![
        Just(Input::Init),
        Just(Input::SendMessage),
        arbitrary_message().prop_map(Input::Received),
    ]
}

fn assert_total<D: MachineDef>(table: &MachineTable<D>) {
    for event in D::Event::local_events() {
        for state in D::State::all() {
            assert!(table.cell(event, *state).is_some());
        }
    }
}

#[test]
fn communicator_tables_are_total() {
    assert_total::<communicator::HsmCommunicator>(&hsm::table().unwrap());
    assert_total::<communicator::EstablishSession>(&establish_session::table().unwrap());
    assert_total::<communicator::MessageSender>(&send_message::table().unwrap());
}

#[test]
fn every_event_has_exactly_one_owner() {
    for event in HsmEvent::event_space() {
        let local = event.row().is_some();
        let delegated = (hsm::ESTABLISH_SESSION.lower)(&event).is_some();
        assert!(local != delegated, "{event:?} has ambiguous ownership");
    }
}

proptest! {
    #[test]
    fn queue_count_matches_balanced_model(
        ops in prop::collection::vec(arbitrary_queue_op(), 0..64)
    ) {
        let queue = QueueCounter::new();
        let observer = queue.share();
        let mut expected: u32 = 0;

        for op in ops {
            match op {
                QueueOp::Enqueue => {
                    expected += 1;
                    prop_assert_eq!(queue.enqueue(), expected);
                }
                QueueOp::Dequeue if expected == 0 => {
                    prop_assert_eq!(queue.dequeue(), None);
                }
                QueueOp::Dequeue => {
                    expected -= 1;
                    prop_assert_eq!(queue.dequeue(), Some(expected));
                }
            }
            prop_assert_eq!(observer.count(), expected);
        }
    }

    #[test]
    fn injections_terminate_and_account_for_every_message(
        inputs in prop::collection::vec(arbitrary_input(), 0..40)
    ) {
        let config = DispatchConfig::new().with_unowned_events(UnownedEventPolicy::Reject);
        let mut machine = communicator::assemble(config).unwrap();
        let mut requested: u32 = 0;

        for input in inputs {
            let result = match input {
                Input::Init => machine.inject(HsmEvent::Init),
                Input::SendMessage => {
                    requested += 1;
                    machine.inject(HsmEvent::SendMessage)
                }
                Input::Received(message) => {
                    machine.inject_with(HsmEvent::MessageReceived, message)
                }
            };
            prop_assert!(result.is_ok());

            let data = machine.data();
            let transmitted = data
                .outbox
                .sent()
                .iter()
                .filter(|message| **message == Message::Payload)
                .count() as u32;
            prop_assert_eq!(transmitted + data.queue.count(), requested);
        }
    }

    #[test]
    fn trace_never_exceeds_limit(
        limit in 0usize..8,
        inputs in prop::collection::vec(arbitrary_input(), 0..40)
    ) {
        let mut machine = communicator::assemble(DispatchConfig::new().with_trace_limit(limit)).unwrap();

        for input in inputs {
            let _ = match input {
                Input::Init => machine.inject(HsmEvent::Init),
                Input::SendMessage => machine.inject(HsmEvent::SendMessage),
                Input::Received(message) => machine.inject_with(HsmEvent::MessageReceived, message),
            };
            prop_assert!(machine.trace().len() <= limit);
        }
    }

    #[test]
    fn each_notification_follows_a_handshake_start(
        events in prop::collection::vec(
            prop::sample::select(SessionEvent::local_events().to_vec()),
            0..20
        )
    ) {
        let outbox = communicator::Outbox::new();
        let mut session = establish_session::machine(outbox.share(), DispatchConfig::default()).unwrap();
        let mut notifications = 0;

        for event in events {
            if let Some(escalated) = session.dispatch(event) {
                prop_assert_eq!(escalated, SessionEvent::SessionEstablished);
                notifications += 1;
            }
        }

        let handshakes = outbox
            .sent()
            .iter()
            .filter(|message| **message == Message::Step0Request)
            .count();
        prop_assert!(notifications <= handshakes);
    }

    #[test]
    fn state_roundtrip_serialization(
        state in prop::sample::select(communicator::HsmState::all().to_vec())
    ) {
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: communicator::HsmState = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(state, deserialized);
    }
}
