//! End-to-end runs of the communicator hierarchy.

use hsm_dispatch::communicator::{
    self, establish_session, send_message, EstablishSession, HsmEvent, HsmState, Message,
    MessageSender, SendState, SessionAction, SessionEvent, SessionState,
};
use hsm_dispatch::core::QueueCounter;
use hsm_dispatch::{DispatchConfig, State, UnownedEventPolicy};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn send_with_empty_queue_is_a_no_op() {
    init_logging();
    let queue = QueueCounter::new();
    let outbox = communicator::Outbox::new();
    let mut sender =
        send_message::machine(queue.share(), outbox.share(), DispatchConfig::default()).unwrap();

    assert_eq!(sender.dispatch(communicator::SendEvent::SendMessage), None);

    assert_eq!(sender.current_state(), SendState::Idle);
    assert!(queue.is_empty());
    assert!(outbox.is_empty());
}

#[test]
fn send_with_queued_message_dequeues_one() {
    init_logging();
    let queue = QueueCounter::new();
    let outbox = communicator::Outbox::new();
    let mut sender =
        send_message::machine(queue.share(), outbox.share(), DispatchConfig::default()).unwrap();
    queue.enqueue();

    assert_eq!(sender.dispatch(communicator::SendEvent::SendMessage), None);

    assert_eq!(queue.count(), 0);
    assert_eq!(sender.current_state(), SendState::AwaitingAck);
    assert_eq!(outbox.sent(), vec![Message::Payload]);
}

#[test]
fn handshake_notifies_parent_exactly_once() {
    init_logging();
    let outbox = communicator::Outbox::new();
    let mut session = establish_session::machine(outbox.share(), DispatchConfig::default()).unwrap();

    let results = [
        session.dispatch(SessionEvent::EstablishSessionRequest),
        session.dispatch(SessionEvent::Step0Response),
        session.dispatch(SessionEvent::Step1Response),
    ];

    assert_eq!(results, [None, None, Some(SessionEvent::SessionEstablished)]);
    assert_eq!(
        session.trace().get_path(),
        vec![
            &SessionState::Idle,
            &SessionState::AwaitingResponse,
            &SessionState::AwaitingResponse,
            &SessionState::Idle,
        ]
    );
    assert_eq!(
        session
            .trace()
            .actions()
            .iter()
            .filter(|action| **action == SessionAction::NotifyParent)
            .count(),
        1
    );
}

#[test]
fn full_exchange_sends_both_messages_once_the_session_is_up() {
    init_logging();
    let config = DispatchConfig::new().with_unowned_events(UnownedEventPolicy::Reject);
    let mut hsm = communicator::assemble(config).unwrap();

    hsm.inject(HsmEvent::Init).unwrap();
    hsm.inject(HsmEvent::SendMessage).unwrap();
    assert_eq!(hsm.current_state(), HsmState::EstablishingSession);

    hsm.inject_with(HsmEvent::MessageReceived, Message::Step0Response)
        .unwrap();
    hsm.inject(HsmEvent::SendMessage).unwrap();
    assert_eq!(hsm.data().queue.count(), 2);

    hsm.inject_with(HsmEvent::MessageReceived, Message::Step1Response)
        .unwrap();
    assert_eq!(hsm.current_state(), HsmState::InSession);
    assert_eq!(hsm.data().queue.count(), 1);

    hsm.inject_with(HsmEvent::MessageReceived, Message::Ack).unwrap();
    hsm.inject_with(HsmEvent::MessageReceived, Message::Ack).unwrap();

    assert_eq!(
        hsm.data().outbox.sent(),
        vec![
            Message::Step0Request,
            Message::Step1Request,
            Message::Payload,
            Message::Payload,
        ]
    );
    assert!(hsm.data().queue.is_empty());
    assert_eq!(hsm.current_state(), HsmState::InSession);

    let session = hsm
        .sub_machine::<EstablishSession>(establish_session::NAME)
        .unwrap();
    assert_eq!(session.current_state(), SessionState::Idle);

    let sender = hsm.peer::<MessageSender>(send_message::NAME).unwrap();
    assert_eq!(sender.current_state(), SendState::Idle);
    assert_eq!(sender.data().current_msg, Some(Message::Ack));
}

#[test]
fn send_in_session_transmits_immediately() {
    let mut hsm = communicator::assemble(DispatchConfig::default()).unwrap();
    hsm.inject(HsmEvent::SendMessage).unwrap();
    hsm.inject_with(HsmEvent::MessageReceived, Message::Step0Response)
        .unwrap();
    hsm.inject_with(HsmEvent::MessageReceived, Message::Step1Response)
        .unwrap();
    hsm.inject_with(HsmEvent::MessageReceived, Message::Ack).unwrap();
    hsm.data().outbox.drain();

    hsm.inject(HsmEvent::SendMessage).unwrap();

    assert_eq!(hsm.data().outbox.sent(), vec![Message::Payload]);
    let sender = hsm.peer::<MessageSender>(send_message::NAME).unwrap();
    assert_eq!(sender.current_state().name(), "AwaitingAck");
}

#[test]
fn unexpected_message_during_handshake_is_ignored() {
    let mut hsm = communicator::assemble(DispatchConfig::default()).unwrap();
    hsm.inject(HsmEvent::SendMessage).unwrap();

    hsm.inject_with(HsmEvent::MessageReceived, Message::Ack)
        .unwrap();

    assert_eq!(hsm.current_state(), HsmState::EstablishingSession);
    let session = hsm
        .sub_machine::<EstablishSession>(establish_session::NAME)
        .unwrap();
    assert_eq!(session.current_state(), SessionState::AwaitingResponse);
    assert_eq!(hsm.data().outbox.len(), 1);
}

#[test]
fn trace_records_top_level_steps() {
    let mut hsm = communicator::assemble(DispatchConfig::default()).unwrap();
    hsm.inject(HsmEvent::Init).unwrap();
    hsm.inject(HsmEvent::SendMessage).unwrap();

    let events: Vec<HsmEvent> = hsm
        .trace()
        .transitions()
        .iter()
        .map(|entry| entry.event)
        .collect();
    assert_eq!(events, vec![HsmEvent::Init, HsmEvent::SendMessage]);

    hsm.clear_trace();
    assert!(hsm.trace().is_empty());
}
