//! Build errors for table and machine builders.

use crate::invariants::Violation;
use thiserror::Error;

/// Errors that can occur when building transition tables and machines.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Machine name not specified. Call .name(name) before .build()")]
    MissingName,

    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Transition table not specified. Call .table(table) before .build()")]
    MissingTable,

    #[error("Machine data not specified. Call .data(data) before .build()")]
    MissingData,

    #[error("Transition table is invalid ({} violation(s)): {}", .0.len(), describe(.0))]
    InvalidTable(Vec<Violation>),

    #[error("Event ownership is ambiguous ({} violation(s)): {}", .0.len(), describe(.0))]
    OwnershipConflict(Vec<Violation>),
}

impl BuildError {
    /// Individual findings behind a validation failure.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::InvalidTable(violations) | Self::OwnershipConflict(violations) => violations,
            _ => &[],
        }
    }
}

fn describe(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
