pub mod config;
pub mod directory;
pub mod error;
pub mod exact;
pub mod models;
pub mod report;
pub mod testing;
pub mod trie;

pub use config::{DirectorySettings, ReportSettings};
pub use directory::{DirectoryService, InstrumentedDirectory};
pub use error::{Error, Result};
pub use exact::{ExactIndex, HashIndex};
pub use models::Contact;
pub use trie::PrefixIndex;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
