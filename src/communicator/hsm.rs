//! Top-level communicator.
//!
//! Owns the session establishment sub-machine and broadcasts to the
//! transmission peer. Outbound messages are queued until a session exists.

use crate::builder::{BuildError, MachineBuilder, TransitionTableBuilder};
use crate::communicator::establish_session::{self, EstablishSession, SessionEvent};
use crate::communicator::message::{Message, Outbox};
use crate::communicator::send_message::MessageSender;
use crate::config::DispatchConfig;
use crate::core::{Event, MachineDef, QueueCounter};
use crate::dispatch::{AcceptPayload, ActionContext, Machine, MachineTable, SubMachineDescriptor};
use crate::{action_enum, state_enum};
use serde::{Deserialize, Serialize};

/// Name of the top-level machine.
pub const NAME: &str = "hsmCommunicator";

state_enum! {
    pub enum HsmState {
        Idle,
        EstablishingSession,
        InSession,
    }
}

/// Events of the top-level namespace.
///
/// `EstablishSession` carries the events owned by the session sub-machine.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum HsmEvent {
    Init,
    SendMessage,
    MessageReceived,
    SessionEstablished,
    EstablishSession(SessionEvent),
}

impl Event for HsmEvent {
    fn name(&self) -> &str {
        match self {
            Self::Init => "Init",
            Self::SendMessage => "SendMessage",
            Self::MessageReceived => "MessageReceived",
            Self::SessionEstablished => "SessionEstablished",
            Self::EstablishSession(event) => event.name(),
        }
    }

    fn local_events() -> &'static [Self] {
        &[
            Self::Init,
            Self::SendMessage,
            Self::MessageReceived,
            Self::SessionEstablished,
        ]
    }

    fn event_space() -> Vec<Self> {
        let mut space = Self::local_events().to_vec();
        space.extend(
            SessionEvent::local_events()
                .iter()
                .copied()
                .map(Self::EstablishSession),
        );
        space
    }
}

action_enum! {
    pub enum HsmAction {
        Initialize,
        StartSessionEstablishment,
        PassSessionResponse,
        CompleteSessionStart,
        PassMessageReceived,
        QueueMessage,
        RequestMessageTransmission,
        NoAction,
    }
}

/// Semantic events broadcast to peers.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HsmShared {
    Init,
    SendMessage,
    MessageReceived(Message),
}

pub struct HsmData {
    pub queue: QueueCounter,
    pub outbox: Outbox,
    /// Payload of the last `MessageReceived` injection
    pub current_msg: Option<Message>,
}

impl HsmData {
    pub fn new(queue: QueueCounter, outbox: Outbox) -> Self {
        Self {
            queue,
            outbox,
            current_msg: None,
        }
    }
}

/// Definition of the top-level communicator.
pub struct HsmCommunicator;

impl MachineDef for HsmCommunicator {
    type State = HsmState;
    type Event = HsmEvent;
    type Action = HsmAction;
    type Data = HsmData;
    type Shared = HsmShared;
}

impl AcceptPayload<Message> for HsmCommunicator {
    fn store(data: &mut HsmData, event: &HsmEvent, payload: Message) {
        tracing::trace!(event = event.name(), message = ?payload, "storing message");
        data.current_msg = Some(payload);
    }
}

/// Routing of the session establishment namespace.
pub const ESTABLISH_SESSION: SubMachineDescriptor<SessionEvent, HsmEvent> = SubMachineDescriptor {
    name: establish_session::NAME,
    lower: lower_session,
    lift: lift_session,
};

fn lower_session(event: &HsmEvent) -> Option<SessionEvent> {
    match event {
        HsmEvent::EstablishSession(event) => Some(*event),
        _ => None,
    }
}

fn lift_session(event: SessionEvent) -> HsmEvent {
    match event {
        SessionEvent::SessionEstablished => HsmEvent::SessionEstablished,
        other => HsmEvent::EstablishSession(other),
    }
}

pub fn table() -> Result<MachineTable<HsmCommunicator>, BuildError> {
    use HsmAction::*;
    use HsmState::*;

    TransitionTableBuilder::new()
        .on(HsmEvent::Init, Idle, Initialize, Idle)
        .on(HsmEvent::Init, EstablishingSession, NoAction, EstablishingSession)
        .on(HsmEvent::Init, InSession, NoAction, InSession)
        .on(HsmEvent::SendMessage, Idle, StartSessionEstablishment, EstablishingSession)
        .on(HsmEvent::SendMessage, EstablishingSession, QueueMessage, EstablishingSession)
        .on(HsmEvent::SendMessage, InSession, RequestMessageTransmission, InSession)
        .on(HsmEvent::MessageReceived, Idle, NoAction, Idle)
        .on(HsmEvent::MessageReceived, EstablishingSession, PassSessionResponse, EstablishingSession)
        .on(HsmEvent::MessageReceived, InSession, PassMessageReceived, InSession)
        .on(HsmEvent::SessionEstablished, Idle, NoAction, Idle)
        .on(HsmEvent::SessionEstablished, EstablishingSession, CompleteSessionStart, InSession)
        .on(HsmEvent::SessionEstablished, InSession, NoAction, InSession)
        .build()
}

/// Build the top level in `Idle` around an already built sub-machine and peer.
pub fn machine(
    data: HsmData,
    session: Machine<EstablishSession>,
    sender: Machine<MessageSender>,
    config: DispatchConfig,
) -> Result<Machine<HsmCommunicator>, BuildError> {
    MachineBuilder::<HsmCommunicator>::new()
        .name(NAME)
        .initial(HsmState::Idle)
        .table(table()?)
        .data(data)
        .sub_machine(ESTABLISH_SESSION, session)
        .peer(sender)
        .action(HsmAction::Initialize, initialize)
        .action(HsmAction::StartSessionEstablishment, start_session_establishment)
        .action(HsmAction::PassSessionResponse, pass_session_response)
        .action(HsmAction::CompleteSessionStart, complete_session_start)
        .action(HsmAction::PassMessageReceived, pass_message_received)
        .action(HsmAction::QueueMessage, queue_message)
        .action(HsmAction::RequestMessageTransmission, request_message_transmission)
        .config(config)
        .build()
}

fn initialize(ctx: &mut ActionContext<'_, HsmCommunicator>) -> Option<HsmEvent> {
    ctx.broadcast(&HsmShared::Init);
    None
}

fn start_session_establishment(ctx: &mut ActionContext<'_, HsmCommunicator>) -> Option<HsmEvent> {
    ctx.data().queue.enqueue();
    Some(HsmEvent::EstablishSession(SessionEvent::EstablishSessionRequest))
}

fn pass_session_response(ctx: &mut ActionContext<'_, HsmCommunicator>) -> Option<HsmEvent> {
    match ctx.data().current_msg {
        Some(Message::Step0Response) => Some(HsmEvent::EstablishSession(SessionEvent::Step0Response)),
        Some(Message::Step1Response) => Some(HsmEvent::EstablishSession(SessionEvent::Step1Response)),
        other => {
            tracing::debug!(
                machine = ctx.machine(),
                message = ?other,
                "message is not a session response"
            );
            None
        }
    }
}

fn complete_session_start(ctx: &mut ActionContext<'_, HsmCommunicator>) -> Option<HsmEvent> {
    ctx.broadcast(&HsmShared::SendMessage);
    None
}

fn pass_message_received(ctx: &mut ActionContext<'_, HsmCommunicator>) -> Option<HsmEvent> {
    let Some(message) = ctx.data().current_msg else {
        tracing::warn!(machine = ctx.machine(), "message received without a payload");
        return None;
    };
    ctx.broadcast(&HsmShared::MessageReceived(message));
    None
}

fn queue_message(ctx: &mut ActionContext<'_, HsmCommunicator>) -> Option<HsmEvent> {
    ctx.data().queue.enqueue();
    None
}

fn request_message_transmission(ctx: &mut ActionContext<'_, HsmCommunicator>) -> Option<HsmEvent> {
    ctx.data().queue.enqueue();
    ctx.broadcast(&HsmShared::SendMessage);
    None
}
