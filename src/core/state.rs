//! Core State trait for machine states.
//!
//! A state is an enumerant scoped to exactly one machine. States are never
//! shared between machines, so each machine declares its own state enum.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for machine states.
///
/// States index the columns of a machine's transition table, so every
/// implementation must provide a dense, zero-based `index` and the full list
/// of states in index order.
///
/// # Required Traits
///
/// - `Copy`: States are small enumerants copied in and out of table cells
/// - `Eq` + `Hash`: States are comparable and usable as map keys
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: States appear in serialized dispatch traces
///
/// # Example
///
/// ```rust
/// use hsm_dispatch::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum LinkState {
///     Down,
///     Up,
/// }
///
/// impl State for LinkState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Down => "Down",
///             Self::Up => "Up",
///         }
///     }
///
///     fn index(&self) -> usize {
///         *self as usize
///     }
///
///     fn all() -> &'static [Self] {
///         &[Self::Down, Self::Up]
///     }
/// }
///
/// assert_eq!(LinkState::Up.index(), 1);
/// assert_eq!(LinkState::all().len(), 2);
/// ```
pub trait State:
    Copy + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Column of this state in the transition table.
    ///
    /// Must be unique per state and lie in `0..Self::all().len()`.
    fn index(&self) -> usize;

    /// Every state of the machine, ordered by `index`.
    fn all() -> &'static [Self];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Idle,
        Busy,
        Draining,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Busy => "Busy",
                Self::Draining => "Draining",
            }
        }

        fn index(&self) -> usize {
            *self as usize
        }

        fn all() -> &'static [Self] {
            &[Self::Idle, Self::Busy, Self::Draining]
        }
    }

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(TestState::Idle.name(), "Idle");
        assert_eq!(TestState::Busy.name(), "Busy");
        assert_eq!(TestState::Draining.name(), "Draining");
    }

    #[test]
    fn all_is_ordered_by_index() {
        for (position, state) in TestState::all().iter().enumerate() {
            assert_eq!(state.index(), position);
        }
    }

    #[test]
    fn state_serializes_correctly() {
        let state = TestState::Busy;
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
