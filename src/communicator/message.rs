//! Messages exchanged with the remote peer.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// A message on the wire between the communicator and its remote peer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Message {
    Step0Request,
    Step0Response,
    Step1Request,
    Step1Response,
    Payload,
    Ack,
}

/// Outbound side of the link.
///
/// Stands in for the transport: every message an action sends is recorded in
/// order so callers can inspect what left the hierarchy.
#[derive(Debug, Default)]
pub struct Outbox {
    sent: Rc<RefCell<Vec<Message>>>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Another handle onto the same outbox.
    pub fn share(&self) -> Self {
        Self {
            sent: Rc::clone(&self.sent),
        }
    }

    pub fn send(&self, message: Message) {
        tracing::debug!(message = ?message, "sending message");
        self.sent.borrow_mut().push(message);
    }

    /// Messages sent so far, oldest first.
    pub fn sent(&self) -> Vec<Message> {
        self.sent.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.sent.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.borrow().is_empty()
    }

    /// Remove and return everything sent so far.
    pub fn drain(&self) -> Vec<Message> {
        std::mem::take(&mut *self.sent.borrow_mut())
    }
}
