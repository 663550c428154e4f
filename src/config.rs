use serde::{Deserialize, Serialize};

/// Directory-wide settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DirectorySettings {
    /// Maximum number of live contacts; `None` means unbounded.
    /// Upserting an existing name never counts against the limit.
    pub capacity: Option<usize>,
    pub report: ReportSettings,
}

impl Default for DirectorySettings {
    fn default() -> Self {
        Self {
            capacity: None,
            report: ReportSettings::default(),
        }
    }
}

impl DirectorySettings {
    /// Settings with a fixed contact capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }
}

/// Markdown report configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Spaces of indentation per trie depth level
    pub indent_width: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self { indent_width: 2 }
    }
}
