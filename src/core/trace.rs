//! Dispatch trace recording.
//!
//! Every table lookup a machine performs can be recorded as a
//! [`TraceEntry`]. The trace is bounded; once the limit is reached the oldest
//! entries are discarded.

use super::{Action, Event, State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;

/// Record of a single executed transition cell.
///
/// # Example
///
/// ```rust
/// use hsm_dispatch::core::TraceEntry;
/// use hsm_dispatch::{action_enum, event_enum, state_enum};
/// use chrono::Utc;
///
/// state_enum! {
///     enum Door { Closed, Open }
/// }
/// event_enum! {
///     enum DoorEvent { Push }
/// }
/// action_enum! {
///     enum DoorAction { Swing }
/// }
///
/// let entry = TraceEntry {
///     event: DoorEvent::Push,
///     action: DoorAction::Swing,
///     from: Door::Closed,
///     to: Door::Open,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(entry.to, Door::Open);
/// ```
#[derive(Clone, Debug, Serialize)]
pub struct TraceEntry<S: State, E: Event, A: Action> {
    /// The event that selected the cell
    pub event: E,
    /// The action that ran
    pub action: A,
    /// State before the transition
    pub from: S,
    /// State after the transition
    pub to: S,
    /// When the action completed
    pub timestamp: DateTime<Utc>,
}

/// Ordered, bounded record of transitions executed by one machine.
///
/// A limit of zero disables recording.
#[derive(Clone, Debug, Serialize)]
pub struct DispatchTrace<S: State, E: Event, A: Action> {
    entries: VecDeque<TraceEntry<S, E, A>>,
    limit: usize,
}

impl<S: State, E: Event, A: Action> DispatchTrace<S, E, A> {
    /// Create an empty trace keeping at most `limit` entries.
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit,
        }
    }

    /// Append an entry, discarding the oldest ones beyond the limit.
    pub fn record(&mut self, entry: TraceEntry<S, E, A>) {
        if self.limit == 0 {
            return;
        }
        while self.entries.len() >= self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the first retained entry followed by the
    /// `to` state of every entry.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.entries.front() {
            path.push(&first.from);
        }
        for entry in &self.entries {
            path.push(&entry.to);
        }
        path
    }

    /// Actions in the order they ran.
    pub fn actions(&self) -> Vec<A> {
        self.entries.iter().map(|entry| entry.action).collect()
    }

    /// Retained entries, oldest first.
    pub fn transitions(&self) -> &VecDeque<TraceEntry<S, E, A>> {
        &self.entries
    }

    pub fn last(&self) -> Option<&TraceEntry<S, E, A>> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
