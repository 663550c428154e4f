//! Invariant checking framework
//!
//! Replays captured event histories and verifies that observed results
//! are consistent with the live contact set implied by the mutations.

use super::events::{Event, OperationResult, OperationType};
use super::history::EventLog;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

/// A violation of an invariant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    pub invariant: String,
    pub description: String,
    pub violating_events: Vec<usize>, // Indices into event log
    pub context: HashMap<String, String>,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "INVARIANT VIOLATION: {}", self.invariant)?;
        writeln!(f, "  Description: {}", self.description)?;
        writeln!(f, "  Violating events: {:?}", self.violating_events)?;
        if !self.context.is_empty() {
            writeln!(f, "  Context:")?;
            for (key, value) in &self.context {
                writeln!(f, "    {}: {}", key, value)?;
            }
        }
        Ok(())
    }
}

/// Trait for invariant checkers
pub trait Invariant: Send + Sync {
    /// Name of the invariant
    fn name(&self) -> &str;

    /// Check the invariant against an event log
    fn check(&self, log: &EventLog) -> Result<(), Violation>;

    /// Human-readable description
    fn description(&self) -> &str {
        "No description provided"
    }
}

/// Check all invariants and return violations
pub fn check_all_invariants(log: &EventLog, invariants: &[Box<dyn Invariant>]) -> Vec<Violation> {
    let mut violations = Vec::new();

    for invariant in invariants {
        if let Err(violation) = invariant.check(log) {
            violations.push(violation);
        }
    }

    violations
}

/// Apply one completed mutation event to the live name->phone map
fn apply_mutation(event: &Event, live: &mut BTreeMap<String, String>) {
    match (&event.op_type, &event.result) {
        (OperationType::Insert { name, phone }, Some(OperationResult::InsertOk { .. })) => {
            live.insert(name.clone(), phone.clone());
        }
        (
            OperationType::Update {
                current_name,
                new_name,
                new_phone,
                ..
            },
            Some(OperationResult::UpdateOk { applied: true, .. }),
        ) => {
            live.remove(current_name);
            live.insert(new_name.clone(), new_phone.clone());
        }
        (OperationType::Delete { name }, Some(OperationResult::DeleteOk { removed: true, .. })) => {
            live.remove(name);
        }
        _ => {}
    }
}

fn violation(
    invariant: &dyn Invariant,
    description: String,
    violating_events: Vec<usize>,
    context: HashMap<String, String>,
) -> Violation {
    Violation {
        invariant: invariant.name().to_string(),
        description,
        violating_events,
        context,
    }
}

// ============================================================================
// CONCRETE INVARIANTS FOR THE CONTACT DIRECTORY
// ============================================================================

/// Invariant: live contacts are findable
///
/// A lookup that reports "not found" for a name the mutation history
/// says is live is a violation.
pub struct InsertedContactFindable;

impl Invariant for InsertedContactFindable {
    fn name(&self) -> &str {
        "InsertedContactFindable"
    }

    fn description(&self) -> &str {
        "Every live contact should be found by an exact lookup"
    }

    fn check(&self, log: &EventLog) -> Result<(), Violation> {
        let events = log.completed_events();
        let mut live = BTreeMap::new();

        for (idx, event) in events.iter().enumerate() {
            if let (
                OperationType::Lookup { name },
                Some(OperationResult::LookupOk { found: false, .. }),
            ) = (&event.op_type, &event.result)
            {
                if live.contains_key(name) {
                    let mut context = HashMap::new();
                    context.insert("name".to_string(), name.clone());
                    context.insert("event_index".to_string(), idx.to_string());

                    return Err(violation(
                        self,
                        format!("Live contact '{}' was not found by lookup", name),
                        vec![idx],
                        context,
                    ));
                }
            }
            apply_mutation(event, &mut live);
        }

        Ok(())
    }
}

/// Invariant: deleted contacts are not findable
///
/// Once a contact is deleted (or renamed away) and not re-inserted,
/// lookups must not find it.
pub struct DeletedContactNotFindable;

impl Invariant for DeletedContactNotFindable {
    fn name(&self) -> &str {
        "DeletedContactNotFindable"
    }

    fn description(&self) -> &str {
        "Deleted contacts should not be findable"
    }

    fn check(&self, log: &EventLog) -> Result<(), Violation> {
        let events = log.completed_events();
        let mut live: BTreeMap<String, String> = BTreeMap::new();
        let mut deleted: HashSet<String> = HashSet::new();

        for (idx, event) in events.iter().enumerate() {
            if let (
                OperationType::Lookup { name },
                Some(OperationResult::LookupOk { found: true, .. }),
            ) = (&event.op_type, &event.result)
            {
                if deleted.contains(name) {
                    let mut context = HashMap::new();
                    context.insert("name".to_string(), name.clone());
                    context.insert("event_index".to_string(), idx.to_string());

                    return Err(violation(
                        self,
                        format!("Contact '{}' was found after deletion", name),
                        vec![idx],
                        context,
                    ));
                }
            }

            let before: HashSet<String> = live.keys().cloned().collect();
            apply_mutation(event, &mut live);
            for name in before {
                if !live.contains_key(&name) {
                    deleted.insert(name);
                }
            }
            // Re-insertion clears the tombstone
            deleted.retain(|name| !live.contains_key(name));
        }

        Ok(())
    }
}

/// Invariant: prefix results reflect the directory
///
/// Prefix search must return exactly the live names that start with the
/// prefix, and the empty prefix must return nothing.
pub struct PrefixReflectsDirectory;

impl Invariant for PrefixReflectsDirectory {
    fn name(&self) -> &str {
        "PrefixReflectsDirectory"
    }

    fn description(&self) -> &str {
        "Prefix search results should match the live contacts under that prefix"
    }

    fn check(&self, log: &EventLog) -> Result<(), Violation> {
        let events = log.completed_events();
        let mut live: BTreeMap<String, String> = BTreeMap::new();

        for (idx, event) in events.iter().enumerate() {
            if let (
                OperationType::PrefixSearch { prefix },
                Some(OperationResult::PrefixOk { names }),
            ) = (&event.op_type, &event.result)
            {
                let expected: HashSet<&String> = if prefix.is_empty() {
                    HashSet::new()
                } else {
                    live.keys().filter(|name| name.starts_with(prefix.as_str())).collect()
                };
                let returned: HashSet<&String> = names.iter().collect();

                if expected != returned {
                    let mut context = HashMap::new();
                    context.insert("prefix".to_string(), prefix.clone());
                    context.insert("expected".to_string(), format!("{:?}", expected));
                    context.insert("returned".to_string(), format!("{:?}", returned));

                    return Err(violation(
                        self,
                        format!("Prefix search for '{}' disagrees with live state", prefix),
                        vec![idx],
                        context,
                    ));
                }
            }
            apply_mutation(event, &mut live);
        }

        Ok(())
    }
}

/// Invariant: listings are sorted and complete
///
/// Every sorted listing must contain exactly the live names, in
/// ascending ordinal order.
pub struct SortedListingOrdered;

impl Invariant for SortedListingOrdered {
    fn name(&self) -> &str {
        "SortedListingOrdered"
    }

    fn description(&self) -> &str {
        "Sorted listings should contain all live contacts in ordinal name order"
    }

    fn check(&self, log: &EventLog) -> Result<(), Violation> {
        let events = log.completed_events();
        let mut live: BTreeMap<String, String> = BTreeMap::new();

        for (idx, event) in events.iter().enumerate() {
            if let (OperationType::ListSorted, Some(OperationResult::ListOk { names })) =
                (&event.op_type, &event.result)
            {
                // BTreeMap keys iterate in ordinal order already
                let expected: Vec<&String> = live.keys().collect();
                let returned: Vec<&String> = names.iter().collect();

                if expected != returned {
                    let mut context = HashMap::new();
                    context.insert("expected".to_string(), format!("{:?}", expected));
                    context.insert("returned".to_string(), format!("{:?}", returned));

                    return Err(violation(
                        self,
                        "Sorted listing disagrees with live state or ordering".to_string(),
                        vec![idx],
                        context,
                    ));
                }
            }
            apply_mutation(event, &mut live);
        }

        Ok(())
    }
}

/// Create the default set of invariants for the directory
pub fn default_invariants() -> Vec<Box<dyn Invariant>> {
    vec![
        Box::new(InsertedContactFindable),
        Box::new(DeletedContactNotFindable),
        Box::new(PrefixReflectsDirectory),
        Box::new(SortedListingOrdered),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(log: &EventLog, name: &str, phone: &str) {
        let op = log.record_invoke(OperationType::Insert {
            name: name.to_string(),
            phone: phone.to_string(),
        });
        log.record_return(op, OperationResult::InsertOk { name: name.to_string() });
    }

    fn lookup(log: &EventLog, name: &str, found: bool) {
        let op = log.record_invoke(OperationType::Lookup {
            name: name.to_string(),
        });
        log.record_return(
            op,
            OperationResult::LookupOk {
                name: name.to_string(),
                found,
            },
        );
    }

    fn delete(log: &EventLog, name: &str, removed: bool) {
        let op = log.record_invoke(OperationType::Delete {
            name: name.to_string(),
        });
        log.record_return(
            op,
            OperationResult::DeleteOk {
                name: name.to_string(),
                removed,
            },
        );
    }

    #[test]
    fn test_inserted_contact_findable_pass() {
        let log = EventLog::new();
        insert(&log, "ann", "111");
        lookup(&log, "ann", true);

        assert!(InsertedContactFindable.check(&log).is_ok());
    }

    #[test]
    fn test_inserted_contact_findable_fail() {
        let log = EventLog::new();
        insert(&log, "ann", "111");
        lookup(&log, "ann", false); // live contact reported missing

        let result = InsertedContactFindable.check(&log);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().invariant, "InsertedContactFindable");
    }

    #[test]
    fn test_deleted_contact_not_findable_pass() {
        let log = EventLog::new();
        insert(&log, "ann", "111");
        delete(&log, "ann", true);
        lookup(&log, "ann", false);

        assert!(DeletedContactNotFindable.check(&log).is_ok());
    }

    #[test]
    fn test_deleted_contact_not_findable_fail() {
        let log = EventLog::new();
        insert(&log, "ann", "111");
        delete(&log, "ann", true);
        lookup(&log, "ann", true); // ghost contact

        let result = DeletedContactNotFindable.check(&log);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().invariant, "DeletedContactNotFindable");
    }

    #[test]
    fn test_reinsert_clears_tombstone() {
        let log = EventLog::new();
        insert(&log, "ann", "111");
        delete(&log, "ann", true);
        insert(&log, "ann", "222");
        lookup(&log, "ann", true);

        assert!(DeletedContactNotFindable.check(&log).is_ok());
    }

    #[test]
    fn test_prefix_reflects_directory_pass() {
        let log = EventLog::new();
        insert(&log, "ann", "111");
        insert(&log, "anna", "444");
        insert(&log, "bob", "222");

        let op = log.record_invoke(OperationType::PrefixSearch {
            prefix: "an".to_string(),
        });
        log.record_return(
            op,
            OperationResult::PrefixOk {
                names: vec!["ann".to_string(), "anna".to_string()],
            },
        );

        assert!(PrefixReflectsDirectory.check(&log).is_ok());
    }

    #[test]
    fn test_prefix_reflects_directory_fail_on_stale_result() {
        let log = EventLog::new();
        insert(&log, "ann", "111");
        delete(&log, "ann", true);

        let op = log.record_invoke(OperationType::PrefixSearch {
            prefix: "an".to_string(),
        });
        log.record_return(
            op,
            OperationResult::PrefixOk {
                names: vec!["ann".to_string()], // deleted name still returned
            },
        );

        let result = PrefixReflectsDirectory.check(&log);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_prefix_must_return_nothing() {
        let log = EventLog::new();
        insert(&log, "ann", "111");

        let op = log.record_invoke(OperationType::PrefixSearch {
            prefix: String::new(),
        });
        log.record_return(
            op,
            OperationResult::PrefixOk {
                names: vec!["ann".to_string()],
            },
        );

        assert!(PrefixReflectsDirectory.check(&log).is_err());
    }

    #[test]
    fn test_sorted_listing_ordered() {
        let log = EventLog::new();
        insert(&log, "bob", "2");
        insert(&log, "amy", "1");

        let op = log.record_invoke(OperationType::ListSorted);
        log.record_return(
            op,
            OperationResult::ListOk {
                names: vec!["amy".to_string(), "bob".to_string()],
            },
        );
        assert!(SortedListingOrdered.check(&log).is_ok());

        let op = log.record_invoke(OperationType::ListSorted);
        log.record_return(
            op,
            OperationResult::ListOk {
                names: vec!["bob".to_string(), "amy".to_string()], // out of order
            },
        );
        assert!(SortedListingOrdered.check(&log).is_err());
    }

    #[test]
    fn test_check_all_invariants() {
        let log = EventLog::new();
        insert(&log, "ann", "111");
        lookup(&log, "ann", true);

        let invariants = default_invariants();
        let violations = check_all_invariants(&log, &invariants);

        assert!(violations.is_empty());
    }

    #[test]
    fn test_violation_display() {
        let mut context = HashMap::new();
        context.insert("name".to_string(), "ann".to_string());

        let violation = Violation {
            invariant: "TestInvariant".to_string(),
            description: "Something went wrong".to_string(),
            violating_events: vec![1, 2, 3],
            context,
        };

        let display = format!("{}", violation);
        assert!(display.contains("TestInvariant"));
        assert!(display.contains("Something went wrong"));
        assert!(display.contains("ann"));
    }
}
