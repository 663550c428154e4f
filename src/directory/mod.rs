//! Dual-index orchestration.
//!
//! Every mutation fans out to both the prefix trie and the exact-match
//! index; delete and update use stage-then-commit so the two can never
//! silently diverge.

pub mod instrumented;
pub mod service;

pub use instrumented::InstrumentedDirectory;
pub use service::DirectoryService;
