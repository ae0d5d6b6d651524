//! Event trait and ownership classification.
//!
//! Every machine has its own event type. Events a machine's table can
//! address are its *local* events; any other value of the type belongs to a
//! sub-machine or has to be handed back to the caller. `noEvent` is
//! `Option::None` throughout the crate.

use serde::Serialize;
use std::fmt::Debug;

/// Trait for machine events.
///
/// The table rows of a machine are given by [`Event::local_events`]. An
/// event whose [`Event::row`] is `None` is never looked up in the machine's
/// own table: the dispatch loop offers it to the registered sub-machines and
/// escalates it to the caller when none of them claims it.
///
/// # Example
///
/// ```rust
/// use hsm_dispatch::core::Event;
/// use serde::Serialize;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
/// enum PumpEvent {
///     Start,
///     Stop,
///     Overheated,
/// }
///
/// impl Event for PumpEvent {
///     fn name(&self) -> &str {
///         match self {
///             Self::Start => "Start",
///             Self::Stop => "Stop",
///             Self::Overheated => "Overheated",
///         }
///     }
///
///     fn local_events() -> &'static [Self] {
///         &[Self::Start, Self::Stop]
///     }
/// }
///
/// assert_eq!(PumpEvent::Stop.row(), Some(1));
/// assert_eq!(PumpEvent::Overheated.row(), None);
/// ```
pub trait Event: Copy + Eq + Debug + Serialize + Send + Sync + 'static {
    /// Get the event's name for display/logging.
    fn name(&self) -> &str;

    /// Events addressable by this machine's own table, in row order.
    fn local_events() -> &'static [Self];

    /// Row of this event in the machine's table, or `None` when the event is
    /// not owned by the table.
    fn row(&self) -> Option<usize> {
        Self::local_events().iter().position(|event| event == self)
    }

    /// Every value of this machine's event namespace: local events, events
    /// delegated to sub-machines, and events handed back to a parent.
    ///
    /// Used to check that event ownership is unambiguous when a machine is
    /// assembled.
    fn event_space() -> Vec<Self> {
        Self::local_events().to_vec()
    }
}
