//! Action identifiers.
//!
//! Tables refer to actions by identifier only. The code that runs for an
//! identifier is bound when a machine is built (see
//! [`MachineBuilder::action`](crate::builder::MachineBuilder::action)).

use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;

/// Identifier of an action hook.
pub trait Action: Copy + Eq + Hash + Debug + Serialize + Send + Sync + 'static {
    /// Get the action's name for display/logging.
    fn name(&self) -> &str;
}
