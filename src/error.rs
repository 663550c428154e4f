use thiserror::Error;

/// Main error type for rolodex operations.
///
/// Expected outcomes (not found, no matches, precondition failed) are
/// represented as `bool`/`Option` return values on the operations
/// themselves; only genuinely exceptional conditions land here.
#[derive(Error, Debug)]
pub enum Error {
    #[error("contact name must not be empty")]
    EmptyName,

    #[error("directory is full: capacity {capacity} reached")]
    CapacityExceeded { capacity: usize },

    #[error("index divergence on '{name}': {detail}")]
    IndexDivergence { name: String, detail: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for rolodex operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for errors that indicate the two indexes no longer agree.
    ///
    /// These are unrecoverable consistency faults, not ordinary "not
    /// found" outcomes, and callers should surface them loudly.
    pub fn is_consistency_fault(&self) -> bool {
        matches!(self, Error::IndexDivergence { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::CapacityExceeded { capacity: 8 };
        assert_eq!(err.to_string(), "directory is full: capacity 8 reached");
    }

    #[test]
    fn test_consistency_faults() {
        let diverged = Error::IndexDivergence {
            name: "ann".to_string(),
            detail: "present in trie only".to_string(),
        };
        assert!(diverged.is_consistency_fault());
        assert!(!Error::EmptyName.is_consistency_fault());
    }
}
