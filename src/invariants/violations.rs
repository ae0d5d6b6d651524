//! Individual invariant violations.

use thiserror::Error;

/// A single finding reported while validating a table or a machine graph.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Violation {
    #[error("no transition defined for event '{event}' in state '{state}'")]
    MissingCell { event: String, state: String },

    #[error("transition for event '{event}' in state '{state}' defined more than once")]
    DuplicateCell { event: String, state: String },

    #[error("state '{state}' has index {index}, outside the table's columns")]
    StateOutOfRange { state: String, index: usize },

    #[error("event '{event}' is not a row of this table")]
    NotLocal { event: String },

    #[error("event '{event}' is claimed by both '{first}' and '{second}'")]
    OverlappingOwners {
        event: String,
        first: String,
        second: String,
    },

    #[error("sub-machine '{sub_machine}' claims event '{event}' but has no table row for it")]
    UnroutableClaim { event: String, sub_machine: String },
}
