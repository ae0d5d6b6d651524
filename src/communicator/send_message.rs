//! Message transmission peer.
//!
//! Drains the shared queue one message at a time, waiting for the remote
//! peer to acknowledge each one before sending the next. The top level
//! drives it by broadcast.

use crate::builder::{goto, BuildError, MachineBuilder, TransitionTableBuilder};
use crate::communicator::hsm::HsmShared;
use crate::communicator::message::{Message, Outbox};
use crate::config::DispatchConfig;
use crate::core::{MachineDef, QueueCounter};
use crate::dispatch::{AcceptShared, ActionContext, Machine, MachineTable};
use crate::{action_enum, event_enum, state_enum};

/// Name the peer is registered under.
pub const NAME: &str = "sendMessage";

state_enum! {
    pub enum SendState {
        Idle,
        AwaitingAck,
    }
}

event_enum! {
    pub enum SendEvent {
        Init,
        SendMessage,
        Transmit,
        MessageReceived,
        Ack,
    }
}

action_enum! {
    pub enum SendAction {
        Initialize,
        CheckQueue,
        SendMessage,
        ParseMessage,
        NoAction,
    }
}

pub struct SendData {
    pub queue: QueueCounter,
    pub outbox: Outbox,
    /// Last message handed over by the top level
    pub current_msg: Option<Message>,
}

/// Definition of the transmission machine.
pub struct MessageSender;

impl MachineDef for MessageSender {
    type State = SendState;
    type Event = SendEvent;
    type Action = SendAction;
    type Data = SendData;
    type Shared = ();
}

impl AcceptShared<HsmShared> for MessageSender {
    fn accept(data: &mut SendData, shared: &HsmShared) -> Option<SendEvent> {
        match shared {
            HsmShared::Init => Some(SendEvent::Init),
            HsmShared::SendMessage => Some(SendEvent::SendMessage),
            HsmShared::MessageReceived(message) => {
                data.current_msg = Some(*message);
                Some(SendEvent::MessageReceived)
            }
        }
    }
}

pub fn table() -> Result<MachineTable<MessageSender>, BuildError> {
    use SendState::*;

    TransitionTableBuilder::new()
        .on_each(SendEvent::Init, goto(SendAction::Initialize, Idle))
        .on(SendEvent::SendMessage, Idle, SendAction::CheckQueue, Idle)
        .on(SendEvent::SendMessage, AwaitingAck, SendAction::NoAction, AwaitingAck)
        .on(SendEvent::Transmit, Idle, SendAction::SendMessage, AwaitingAck)
        .on(SendEvent::Transmit, AwaitingAck, SendAction::NoAction, AwaitingAck)
        .on(SendEvent::MessageReceived, Idle, SendAction::NoAction, Idle)
        .on(SendEvent::MessageReceived, AwaitingAck, SendAction::ParseMessage, AwaitingAck)
        .on(SendEvent::Ack, Idle, SendAction::NoAction, Idle)
        .on(SendEvent::Ack, AwaitingAck, SendAction::CheckQueue, Idle)
        .build()
}

/// Build the machine in `Idle`, draining `queue` into `outbox`.
pub fn machine(
    queue: QueueCounter,
    outbox: Outbox,
    config: DispatchConfig,
) -> Result<Machine<MessageSender>, BuildError> {
    MachineBuilder::<MessageSender>::new()
        .name(NAME)
        .initial(SendState::Idle)
        .table(table()?)
        .data(SendData {
            queue,
            outbox,
            current_msg: None,
        })
        .action(SendAction::Initialize, initialize)
        .action(SendAction::CheckQueue, check_queue)
        .action(SendAction::SendMessage, send_message)
        .action(SendAction::ParseMessage, parse_message)
        .config(config)
        .build()
}

fn initialize(ctx: &mut ActionContext<'_, MessageSender>) -> Option<SendEvent> {
    ctx.data_mut().current_msg = None;
    None
}

fn check_queue(ctx: &mut ActionContext<'_, MessageSender>) -> Option<SendEvent> {
    (!ctx.data().queue.is_empty()).then_some(SendEvent::Transmit)
}

fn send_message(ctx: &mut ActionContext<'_, MessageSender>) -> Option<SendEvent> {
    let data = ctx.data();
    if let Some(remaining) = data.queue.dequeue() {
        data.outbox.send(Message::Payload);
        tracing::debug!(machine = ctx.machine(), remaining, "message transmitted");
    }
    None
}

fn parse_message(ctx: &mut ActionContext<'_, MessageSender>) -> Option<SendEvent> {
    match ctx.data().current_msg {
        Some(Message::Ack) => Some(SendEvent::Ack),
        other => {
            tracing::debug!(machine = ctx.machine(), message = ?other, "not an acknowledgement");
            None
        }
    }
}
