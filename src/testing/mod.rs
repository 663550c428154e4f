//! Testing infrastructure for correctness verification.
//!
//! Provides event capture for directory operations and an invariant
//! checking framework that replays captured histories:
//!
//! - **InsertedContactFindable**: live contacts are found by lookup
//! - **DeletedContactNotFindable**: deleted contacts stay gone
//! - **PrefixReflectsDirectory**: prefix results match live state
//! - **SortedListingOrdered**: listings are sorted and complete
//!
//! Wrap a directory in [`crate::directory::InstrumentedDirectory`] to
//! capture events automatically, then check invariants over the log.

pub mod events;
pub mod history;
pub mod invariants;

pub use events::{Event, OperationId, OperationResult, OperationType, Timestamp};
pub use history::EventLog;
pub use invariants::{
    check_all_invariants, default_invariants, DeletedContactNotFindable, InsertedContactFindable,
    Invariant, PrefixReflectsDirectory, SortedListingOrdered, Violation,
};

/// Prelude for easy imports
pub mod prelude {
    pub use super::events::*;
    pub use super::history::EventLog;
    pub use super::invariants::{check_all_invariants, default_invariants, Invariant, Violation};
}
