//! Event history capture
//!
//! Thread-safe log of directory operations, suitable for replaying
//! against invariants and for JSON export.

use super::events::{Event, OperationId, OperationResult, OperationType};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Thread-safe event log for capturing operation history
#[derive(Clone)]
pub struct EventLog {
    inner: Arc<RwLock<EventLogInner>>,
    next_op_id: Arc<AtomicU64>,
}

struct EventLogInner {
    events: Vec<Event>,
    pending: HashMap<OperationId, usize>, // Maps op_id to index in events
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(EventLogInner {
                events: Vec::new(),
                pending: HashMap::new(),
            })),
            next_op_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Record a new operation invocation
    pub fn record_invoke(&self, op_type: OperationType) -> OperationId {
        let op_id = OperationId::new(self.next_op_id.fetch_add(1, Ordering::SeqCst));
        let event = Event::invoke(op_id, op_type);

        let mut inner = self.inner.write();
        let index = inner.events.len();
        inner.events.push(event);
        inner.pending.insert(op_id, index);

        op_id
    }

    /// Record operation completion
    pub fn record_return(&self, op_id: OperationId, result: OperationResult) {
        let mut inner = self.inner.write();

        if let Some(&index) = inner.pending.get(&op_id) {
            if let Some(event) = inner.events.get_mut(index) {
                event.complete(result);
            }
            inner.pending.remove(&op_id);
        }
    }

    /// Get all events
    pub fn events(&self) -> Vec<Event> {
        self.inner.read().events.clone()
    }

    /// Get completed events only
    pub fn completed_events(&self) -> Vec<Event> {
        self.inner
            .read()
            .events
            .iter()
            .filter(|e| e.is_complete())
            .cloned()
            .collect()
    }

    /// Get pending events
    pub fn pending_events(&self) -> Vec<Event> {
        self.inner
            .read()
            .events
            .iter()
            .filter(|e| !e.is_complete())
            .cloned()
            .collect()
    }

    /// Number of recorded events
    pub fn len(&self) -> usize {
        self.inner.read().events.len()
    }

    /// Check if log is empty
    pub fn is_empty(&self) -> bool {
        self.inner.read().events.is_empty()
    }

    /// Clear all events
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.events.clear();
        inner.pending.clear();
    }

    /// Export to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let events = self.events();
        serde_json::to_string_pretty(&events)
    }

    /// Import from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let events: Vec<Event> = serde_json::from_str(json)?;
        let log = Self::new();

        let mut max_op_id = 0u64;
        let mut pending_entries = Vec::new();
        for (idx, event) in events.iter().enumerate() {
            max_op_id = max_op_id.max(event.op_id.0);
            if !event.is_complete() {
                pending_entries.push((event.op_id, idx));
            }
        }

        let mut inner = log.inner.write();
        inner.events = events;
        for (op_id, idx) in pending_entries {
            inner.pending.insert(op_id, idx);
        }
        drop(inner);

        log.next_op_id.store(max_op_id + 1, Ordering::SeqCst);

        Ok(log)
    }

    /// Get events by operation type
    pub fn events_by_type(&self, filter: impl Fn(&OperationType) -> bool) -> Vec<Event> {
        self.inner
            .read()
            .events
            .iter()
            .filter(|e| filter(&e.op_type))
            .cloned()
            .collect()
    }

    /// Get insert operations
    pub fn insert_operations(&self) -> Vec<Event> {
        self.events_by_type(|op| matches!(op, OperationType::Insert { .. }))
    }

    /// Get delete operations
    pub fn delete_operations(&self) -> Vec<Event> {
        self.events_by_type(|op| matches!(op, OperationType::Delete { .. }))
    }

    /// Get prefix search operations
    pub fn search_operations(&self) -> Vec<Event> {
        self.events_by_type(|op| matches!(op, OperationType::PrefixSearch { .. }))
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}
