//! Session establishment sub-machine.
//!
//! Runs the two-step handshake with the remote peer and tells its parent
//! once the session is up.

use crate::builder::{BuildError, MachineBuilder, TransitionTableBuilder};
use crate::communicator::message::{Message, Outbox};
use crate::config::DispatchConfig;
use crate::core::MachineDef;
use crate::dispatch::{ActionContext, Machine, MachineTable};
use crate::{action_enum, event_enum, state_enum};

/// Name the sub-machine is registered under.
pub const NAME: &str = "establishSession";

state_enum! {
    pub enum SessionState {
        Idle,
        AwaitingResponse,
    }
}

event_enum! {
    pub enum SessionEvent {
        EstablishSessionRequest,
        Step0Response,
        Step1Response,
    }

    escalates: [SessionEstablished]
}

action_enum! {
    pub enum SessionAction {
        SendStep0Message,
        SendStep1Message,
        NotifyParent,
        NoAction,
    }
}

pub struct SessionData {
    pub outbox: Outbox,
}

/// Definition of the session establishment machine.
pub struct EstablishSession;

impl MachineDef for EstablishSession {
    type State = SessionState;
    type Event = SessionEvent;
    type Action = SessionAction;
    type Data = SessionData;
    type Shared = ();
}

pub fn table() -> Result<MachineTable<EstablishSession>, BuildError> {
    use SessionAction::*;
    use SessionEvent::*;
    use SessionState::*;

    TransitionTableBuilder::new()
        .on(EstablishSessionRequest, Idle, SendStep0Message, AwaitingResponse)
        .on(EstablishSessionRequest, AwaitingResponse, NoAction, AwaitingResponse)
        .on(Step0Response, Idle, NoAction, Idle)
        .on(Step0Response, AwaitingResponse, SendStep1Message, AwaitingResponse)
        .on(Step1Response, Idle, NoAction, Idle)
        .on(Step1Response, AwaitingResponse, NotifyParent, Idle)
        .build()
}

/// Build the machine in `Idle`, sending through `outbox`.
pub fn machine(
    outbox: Outbox,
    config: DispatchConfig,
) -> Result<Machine<EstablishSession>, BuildError> {
    MachineBuilder::<EstablishSession>::new()
        .name(NAME)
        .initial(SessionState::Idle)
        .table(table()?)
        .data(SessionData { outbox })
        .action(SessionAction::SendStep0Message, send_step0_message)
        .action(SessionAction::SendStep1Message, send_step1_message)
        .action(SessionAction::NotifyParent, notify_parent)
        .config(config)
        .build()
}

fn send_step0_message(ctx: &mut ActionContext<'_, EstablishSession>) -> Option<SessionEvent> {
    ctx.data().outbox.send(Message::Step0Request);
    None
}

fn send_step1_message(ctx: &mut ActionContext<'_, EstablishSession>) -> Option<SessionEvent> {
    ctx.data().outbox.send(Message::Step1Request);
    None
}

fn notify_parent(ctx: &mut ActionContext<'_, EstablishSession>) -> Option<SessionEvent> {
    tracing::info!(machine = ctx.machine(), "session established");
    Some(SessionEvent::SessionEstablished)
}
