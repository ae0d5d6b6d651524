//! Construction-time checks for tables and machine graphs.

use crate::core::{Action, Event, State};
use crate::dispatch::{Delegate, TransitionCell};
use crate::invariants::violations::Violation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Claimant name used for a machine's own table in ownership findings.
pub const OWN_TABLE: &str = "own table";

/// Check that every (local event, state) pair has a cell.
///
/// `cells` is laid out row-major: `cells[row * S::all().len() + state.index()]`.
/// Returns the completed cells in the same layout, or ALL missing pairs.
pub fn check_totality<S: State, E: Event, A: Action>(
    cells: &[Option<TransitionCell<S, A>>],
) -> Validation<Vec<TransitionCell<S, A>>, NonEmptyVec<Violation>> {
    let states = S::all();
    let mut checks = Vec::with_capacity(E::local_events().len() * states.len());

    for (row, event) in E::local_events().iter().enumerate() {
        for state in states {
            let cell = cells.get(row * states.len() + state.index()).copied().flatten();
            let check = match cell {
                Some(cell) => Validation::success(cell),
                None => Validation::fail(Violation::MissingCell {
                    event: event.name().to_string(),
                    state: state.name().to_string(),
                }),
            };
            checks.push(check);
        }
    }

    Validation::all_vec(checks)
}

/// Check that no event of the namespace has more than one owner.
///
/// Owners are the machine's own table (events with a row) and every
/// sub-machine whose descriptor claims the event. A sub-machine must also be
/// able to address every event it claims in its own table.
pub fn check_ownership<E: Event>(
    sub_machines: &[Box<dyn Delegate<E>>],
) -> Validation<(), NonEmptyVec<Violation>> {
    let mut checks: Vec<Validation<(), NonEmptyVec<Violation>>> = Vec::new();

    for event in E::event_space() {
        let mut owners: Vec<&str> = Vec::new();
        if event.row().is_some() {
            owners.push(OWN_TABLE);
        }

        for sub_machine in sub_machines.iter().filter(|s| s.owns(&event)) {
            if !sub_machine.routes_to_table(&event) {
                checks.push(Validation::fail(Violation::UnroutableClaim {
                    event: event.name().to_string(),
                    sub_machine: sub_machine.name().to_string(),
                }));
            }
            owners.push(sub_machine.name());
        }

        if let [first, second, ..] = owners.as_slice() {
            checks.push(Validation::fail(Violation::OverlappingOwners {
                event: event.name().to_string(),
                first: first.to_string(),
                second: second.to_string(),
            }));
        }
    }

    Validation::all_vec(checks).map(|_| ())
}
