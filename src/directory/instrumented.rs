//! Instrumented directory wrapper for testing
//!
//! Wraps a [`DirectoryService`] and captures every operation into an
//! [`EventLog`] so histories can be checked against invariants.

use crate::directory::DirectoryService;
use crate::error::Result;
use crate::exact::ExactIndex;
use crate::models::Contact;
use crate::testing::prelude::*;

/// Wrapper around DirectoryService that captures events for testing
pub struct InstrumentedDirectory<E: ExactIndex> {
    inner: DirectoryService<E>,
    event_log: EventLog,
}

impl<E: ExactIndex> InstrumentedDirectory<E> {
    /// Wrap a directory with a fresh event log
    pub fn new(inner: DirectoryService<E>) -> Self {
        Self {
            inner,
            event_log: EventLog::new(),
        }
    }

    /// Wrap with a pre-existing event log (for continuation testing)
    pub fn with_event_log(inner: DirectoryService<E>, event_log: EventLog) -> Self {
        Self { inner, event_log }
    }

    /// Get the event log for inspection
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Access the wrapped directory
    pub fn inner(&self) -> &DirectoryService<E> {
        &self.inner
    }

    /// Insert with event capture
    pub fn insert(&mut self, name: &str, phone: &str) -> Result<OperationId> {
        let op_id = self.event_log.record_invoke(OperationType::Insert {
            name: name.to_string(),
            phone: phone.to_string(),
        });

        match self.inner.insert(name, phone) {
            Ok(()) => {
                self.event_log.record_return(
                    op_id,
                    OperationResult::InsertOk {
                        name: name.to_string(),
                    },
                );
                Ok(op_id)
            }
            Err(e) => {
                self.event_log.record_return(
                    op_id,
                    OperationResult::Error {
                        message: e.to_string(),
                    },
                );
                Err(e)
            }
        }
    }

    /// Lookup with event capture
    pub fn lookup(&mut self, name: &str) -> (OperationId, Option<Contact>) {
        let op_id = self.event_log.record_invoke(OperationType::Lookup {
            name: name.to_string(),
        });

        let contact = self.inner.lookup(name).cloned();
        self.event_log.record_return(
            op_id,
            OperationResult::LookupOk {
                name: name.to_string(),
                found: contact.is_some(),
            },
        );

        (op_id, contact)
    }

    /// Prefix search with event capture
    pub fn search_by_prefix(&mut self, prefix: &str) -> (OperationId, Vec<Contact>) {
        let op_id = self.event_log.record_invoke(OperationType::PrefixSearch {
            prefix: prefix.to_string(),
        });

        let contacts = self.inner.search_by_prefix(prefix);
        let names = contacts.iter().map(|c| c.name.clone()).collect();
        self.event_log
            .record_return(op_id, OperationResult::PrefixOk { names });

        (op_id, contacts)
    }

    /// Update with event capture
    pub fn update(
        &mut self,
        current_name: &str,
        current_phone: &str,
        new_name: &str,
        new_phone: &str,
    ) -> Result<bool> {
        let op_id = self.event_log.record_invoke(OperationType::Update {
            current_name: current_name.to_string(),
            current_phone: current_phone.to_string(),
            new_name: new_name.to_string(),
            new_phone: new_phone.to_string(),
        });

        match self.inner.update(current_name, current_phone, new_name, new_phone) {
            Ok(applied) => {
                self.event_log.record_return(
                    op_id,
                    OperationResult::UpdateOk {
                        name: current_name.to_string(),
                        applied,
                    },
                );
                Ok(applied)
            }
            Err(e) => {
                self.event_log.record_return(
                    op_id,
                    OperationResult::Error {
                        message: e.to_string(),
                    },
                );
                Err(e)
            }
        }
    }

    /// Delete with event capture
    pub fn delete(&mut self, name: &str) -> Result<bool> {
        let op_id = self.event_log.record_invoke(OperationType::Delete {
            name: name.to_string(),
        });

        match self.inner.delete(name) {
            Ok(removed) => {
                self.event_log.record_return(
                    op_id,
                    OperationResult::DeleteOk {
                        name: name.to_string(),
                        removed,
                    },
                );
                Ok(removed)
            }
            Err(e) => {
                self.event_log.record_return(
                    op_id,
                    OperationResult::Error {
                        message: e.to_string(),
                    },
                );
                Err(e)
            }
        }
    }

    /// Sorted listing with event capture
    pub fn list_sorted(&mut self) -> (OperationId, Vec<Contact>) {
        let op_id = self.event_log.record_invoke(OperationType::ListSorted);

        let contacts = self.inner.list_sorted();
        let names = contacts.iter().map(|c| c.name.clone()).collect();
        self.event_log
            .record_return(op_id, OperationResult::ListOk { names });

        (op_id, contacts)
    }

    /// Check a set of invariants against the captured history
    pub fn check_invariants(&self, invariants: &[Box<dyn Invariant>]) -> Vec<Violation> {
        check_all_invariants(&self.event_log, invariants)
    }
}
