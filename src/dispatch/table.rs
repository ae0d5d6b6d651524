//! Total transition tables.

use crate::core::{Action, Event, State};
use serde::Serialize;
use std::marker::PhantomData;

/// One `(action, next state)` pair of a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TransitionCell<S, A> {
    pub action: A,
    pub next: S,
}

/// Complete `[event][state]` grid for one machine.
///
/// Tables can only be obtained from
/// [`TransitionTableBuilder`](crate::builder::TransitionTableBuilder), which
/// rejects partial definitions, so a lookup for a local event never misses.
#[derive(Clone, Debug)]
pub struct TransitionTable<S: State, E: Event, A: Action> {
    cells: Vec<TransitionCell<S, A>>,
    _events: PhantomData<fn() -> E>,
}

impl<S: State, E: Event, A: Action> TransitionTable<S, E, A> {
    pub(crate) fn from_cells(cells: Vec<TransitionCell<S, A>>) -> Self {
        Self {
            cells,
            _events: PhantomData,
        }
    }

    pub fn num_events() -> usize {
        E::local_events().len()
    }

    pub fn num_states() -> usize {
        S::all().len()
    }

    /// Position of `(row, state)` in [`cells`](Self::cells).
    pub fn slot(row: usize, state: S) -> usize {
        row * Self::num_states() + state.index()
    }

    /// Cell for `event` in `state`, or `None` when `event` is not local.
    pub fn cell(&self, event: &E, state: S) -> Option<&TransitionCell<S, A>> {
        event.row().map(|row| &self.cells[Self::slot(row, state)])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[TransitionCell<S, A>] {
        &self.cells
    }

    /// Distinct actions referenced by the table, in first-use order.
    pub fn actions(&self) -> Vec<A> {
        let mut actions: Vec<A> = Vec::new();
        for cell in &self.cells {
            if !actions.contains(&cell.action) {
                actions.push(cell.action);
            }
        }
        actions
    }
}
