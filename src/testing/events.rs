//! Event types for capturing directory operations
//!
//! Events pair an invocation with its eventual result and carry timing
//! information, so histories can be replayed and verified.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationId(pub u64);

impl OperationId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Type of directory operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OperationType {
    /// Insert or overwrite a contact
    Insert { name: String, phone: String },
    /// Exact lookup by name
    Lookup { name: String },
    /// Prefix search
    PrefixSearch { prefix: String },
    /// Guarded update / rename
    Update {
        current_name: String,
        current_phone: String,
        new_name: String,
        new_phone: String,
    },
    /// Delete by name
    Delete { name: String },
    /// Sorted listing of the whole directory
    ListSorted,
}

/// Result of a directory operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OperationResult {
    InsertOk { name: String },
    LookupOk { name: String, found: bool },
    PrefixOk { names: Vec<String> },
    UpdateOk { name: String, applied: bool },
    DeleteOk { name: String, removed: bool },
    ListOk { names: Vec<String> },
    /// Operation failed (empty name, capacity, divergence)
    Error { message: String },
}

/// Timestamp wrapper for consistent time handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp_nanos_opt().unwrap_or(0))
    }

    pub fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    pub fn as_nanos(&self) -> i64 {
        self.0
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.0)
    }
}

/// A recorded event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub op_id: OperationId,
    pub op_type: OperationType,
    pub invoke_time: Timestamp,
    /// When the operation returned (None if still pending)
    pub return_time: Option<Timestamp>,
    /// Result of the operation (None if still pending)
    pub result: Option<OperationResult>,
}

impl Event {
    /// Create a new event at invocation time
    pub fn invoke(op_id: OperationId, op_type: OperationType) -> Self {
        Self {
            op_id,
            op_type,
            invoke_time: Timestamp::now(),
            return_time: None,
            result: None,
        }
    }

    /// Mark event as completed
    pub fn complete(&mut self, result: OperationResult) {
        self.return_time = Some(Timestamp::now());
        self.result = Some(result);
    }

    pub fn is_complete(&self) -> bool {
        self.return_time.is_some() && self.result.is_some()
    }

    /// Duration of the operation in nanoseconds
    pub fn duration_nanos(&self) -> Option<i64> {
        self.return_time.map(|rt| rt.0 - self.invoke_time.0)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Op({:?}) {:?} @ {} -> ",
            self.op_id, self.op_type, self.invoke_time.0
        )?;
        match &self.result {
            Some(result) => write!(f, "{:?} @ {:?}", result, self.return_time),
            None => write!(f, "<pending>"),
        }
    }
}
