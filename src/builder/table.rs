//! Builder for constructing total transition tables.

use crate::builder::error::BuildError;
use crate::core::{Action, Event, State};
use crate::dispatch::{TransitionCell, TransitionTable};
use crate::invariants::{check_totality, Violation};
use stillwater::validation::Validation;

/// Builder for constructing transition tables with a fluent API.
///
/// Cells are collected in any order; [`build`](Self::build) succeeds only
/// when every (local event, state) pair is defined exactly once.
pub struct TransitionTableBuilder<S: State, E: Event, A: Action> {
    cells: Vec<Option<TransitionCell<S, A>>>,
    violations: Vec<Violation>,
    _events: std::marker::PhantomData<fn() -> E>,
}

impl<S: State, E: Event, A: Action> TransitionTableBuilder<S, E, A> {
    /// Create a new, empty table builder.
    pub fn new() -> Self {
        Self {
            cells: vec![None; E::local_events().len() * S::all().len()],
            violations: Vec::new(),
            _events: std::marker::PhantomData,
        }
    }

    /// Define the cell for `event` in `state`.
    pub fn on(mut self, event: E, state: S, action: A, next: S) -> Self {
        let Some(row) = event.row() else {
            self.violations.push(Violation::NotLocal {
                event: event.name().to_string(),
            });
            return self;
        };

        let slot = (state.index() < S::all().len())
            .then(|| TransitionTable::<S, E, A>::slot(row, state));
        let Some(cell) = slot.and_then(|slot| self.cells.get_mut(slot)) else {
            self.violations.push(Violation::StateOutOfRange {
                state: state.name().to_string(),
                index: state.index(),
            });
            return self;
        };

        if cell.is_some() {
            self.violations.push(Violation::DuplicateCell {
                event: event.name().to_string(),
                state: state.name().to_string(),
            });
            return self;
        }

        *cell = Some(TransitionCell { action, next });
        self
    }

    /// Define the cell for `event` in every state.
    pub fn on_each<F>(self, event: E, cell: F) -> Self
    where
        F: Fn(S) -> (A, S),
    {
        S::all().iter().fold(self, |builder, &state| {
            let (action, next) = cell(state);
            builder.on(event, state, action, next)
        })
    }

    /// Build the table.
    /// Returns an error listing every violation if the table is not total.
    pub fn build(self) -> Result<TransitionTable<S, E, A>, BuildError> {
        let mut violations = self.violations;

        match check_totality::<S, E, A>(&self.cells) {
            Validation::Success(cells) if violations.is_empty() => {
                Ok(TransitionTable::from_cells(cells))
            }
            Validation::Success(_) => Err(BuildError::InvalidTable(violations)),
            Validation::Failure(missing) => {
                violations.extend(missing.iter().cloned());
                Err(BuildError::InvalidTable(violations))
            }
        }
    }
}

impl<S: State, E: Event, A: Action> Default for TransitionTableBuilder<S, E, A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{action_enum, event_enum, state_enum};
    use serde::{Deserialize, Serialize};

    state_enum! {
        enum TestState {
            Idle,
            Busy,
        }
    }

    event_enum! {
        enum TestEvent {
            Start,
            Finish,
        }
        escalates: [Done]
    }

    action_enum! {
        enum TestAction {
            Begin,
            End,
            Ignore,
        }
    }

    #[test]
    fn fluent_api_builds_total_table() {
        let table = TransitionTableBuilder::new()
            .on(TestEvent::Start, TestState::Idle, TestAction::Begin, TestState::Busy)
            .on(TestEvent::Start, TestState::Busy, TestAction::Ignore, TestState::Busy)
            .on(TestEvent::Finish, TestState::Idle, TestAction::Ignore, TestState::Idle)
            .on(TestEvent::Finish, TestState::Busy, TestAction::End, TestState::Idle)
            .build();

        assert!(table.is_ok());
        let table = table.unwrap();
        assert_eq!(table.cells().len(), 4);
    }

    #[test]
    fn missing_cells_are_all_reported() {
        let result = TransitionTableBuilder::<TestState, TestEvent, TestAction>::new()
            .on(TestEvent::Start, TestState::Idle, TestAction::Begin, TestState::Busy)
            .build();

        match result {
            Err(BuildError::InvalidTable(violations)) => {
                assert_eq!(violations.len(), 3);
                assert!(violations
                    .iter()
                    .all(|v| matches!(v, Violation::MissingCell { .. })));
            }
            other => panic!("Expected InvalidTable, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn duplicate_cells_are_rejected() {
        let result = TransitionTableBuilder::new()
            .on_each(TestEvent::Start, |state| (TestAction::Ignore, state))
            .on_each(TestEvent::Finish, |state| (TestAction::Ignore, state))
            .on(TestEvent::Start, TestState::Idle, TestAction::Begin, TestState::Busy)
            .build();

        let err = result.err().unwrap();
        assert_eq!(
            err.violations(),
            &[Violation::DuplicateCell {
                event: "Start".to_string(),
                state: "Idle".to_string(),
            }]
        );
    }

    #[test]
    fn escalation_events_cannot_have_cells() {
        let result = TransitionTableBuilder::new()
            .on_each(TestEvent::Start, |state| (TestAction::Ignore, state))
            .on_each(TestEvent::Finish, |state| (TestAction::Ignore, state))
            .on(TestEvent::Done, TestState::Idle, TestAction::End, TestState::Idle)
            .build();

        let err = result.err().unwrap();
        assert!(matches!(err.violations(), [Violation::NotLocal { .. }]));
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum SkewedState {
        Low,
        High,
    }

    impl State for SkewedState {
        fn name(&self) -> &str {
            match self {
                Self::Low => "Low",
                Self::High => "High",
            }
        }

        // High claims a column past the end of the table.
        fn index(&self) -> usize {
            match self {
                Self::Low => 0,
                Self::High => 5,
            }
        }

        fn all() -> &'static [Self] {
            &[Self::Low, Self::High]
        }
    }

    #[test]
    fn out_of_range_state_index_is_reported() {
        let result = TransitionTableBuilder::<SkewedState, TestEvent, TestAction>::new()
            .on_each(TestEvent::Start, |state| (TestAction::Ignore, state))
            .on_each(TestEvent::Finish, |state| (TestAction::Ignore, state))
            .build();

        let err = result.err().unwrap();
        let expected = Violation::StateOutOfRange {
            state: "High".to_string(),
            index: 5,
        };
        let out_of_range: Vec<&Violation> = err
            .violations()
            .iter()
            .filter(|v| matches!(v, Violation::StateOutOfRange { .. }))
            .collect();
        assert_eq!(out_of_range, vec![&expected, &expected]);
    }

    #[test]
    fn on_each_fills_every_state() {
        let table = TransitionTableBuilder::new()
            .on_each(TestEvent::Start, |_| (TestAction::Begin, TestState::Busy))
            .on_each(TestEvent::Finish, |state| (TestAction::Ignore, state))
            .build()
            .unwrap();

        let cell = table.cell(&TestEvent::Finish, TestState::Busy).unwrap();
        assert_eq!(cell.next, TestState::Busy);
        assert_eq!(table.actions(), vec![TestAction::Begin, TestAction::Ignore]);
    }
}
