//! Construction-time invariants for transition tables and machine graphs.
//!
//! Failure modes of the dispatch core are structural, so they are checked
//! once, while tables and machines are assembled, never during dispatch.
//! Checks use Stillwater's `Validation` type to report every violation in a
//! single pass instead of stopping at the first one.
//!
//! - **Totality**: every (local event, state) pair has exactly one cell
//! - **Ownership**: each event of a namespace has at most one owner, and a
//!   sub-machine can address every event it claims

pub mod rules;
pub mod violations;

pub use rules::{check_ownership, check_totality, OWN_TABLE};
pub use violations::Violation;
