//! Errors reported by top-level event injection.

use thiserror::Error;

/// Errors that can occur when injecting an event into a hierarchy.
///
/// The dispatch loop itself has no error channel; this is only produced at
/// the top level, under [`UnownedEventPolicy::Reject`](crate::config::UnownedEventPolicy::Reject).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("No machine under '{machine}' owns event '{event}'")]
    Unowned { machine: String, event: String },
}
