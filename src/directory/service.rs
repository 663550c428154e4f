use tracing::{debug, error};

use crate::config::DirectorySettings;
use crate::error::{Error, Result};
use crate::exact::{ExactIndex, HashIndex};
use crate::models::Contact;
use crate::report;
use crate::trie::PrefixIndex;

/// The contact directory: a prefix trie and an exact-match index kept
/// in lockstep over the same logical record set.
///
/// All mutation goes through this type. The trie is authoritative for
/// reads; the exact index is the redundant structural partner. Delete
/// and update verify their preconditions against *both* sides before
/// mutating either (stage-then-commit), so a one-sided state is always
/// reported as [`Error::IndexDivergence`] instead of papered over.
///
/// Single-threaded by design. A concurrent host must treat the whole
/// service as one resource behind a single lock; finer locking cannot
/// keep a two-structure mutation atomic for readers.
pub struct DirectoryService<E: ExactIndex = HashIndex> {
    prefix: PrefixIndex,
    exact: E,
    settings: DirectorySettings,
}

impl DirectoryService<HashIndex> {
    pub fn new() -> Self {
        Self::with_settings(DirectorySettings::default())
    }

    pub fn with_settings(settings: DirectorySettings) -> Self {
        Self::with_exact_index(HashIndex::new(), settings)
    }
}

impl Default for DirectoryService<HashIndex> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ExactIndex> DirectoryService<E> {
    /// Build a directory over a caller-supplied exact index
    pub fn with_exact_index(exact: E, settings: DirectorySettings) -> Self {
        Self {
            prefix: PrefixIndex::new(),
            exact,
            settings,
        }
    }

    /// Insert (or overwrite) a contact in both indexes.
    ///
    /// Rejects empty names: an empty name would make the trie root
    /// terminal, which the rest of the structure assumes never happens.
    /// With a configured capacity, inserts of new names beyond the
    /// limit are rejected; upserts of existing names always pass.
    pub fn insert(&mut self, name: &str, phone: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        if let Some(capacity) = self.settings.capacity {
            if self.prefix.len() >= capacity && self.prefix.lookup(name).is_none() {
                return Err(Error::CapacityExceeded { capacity });
            }
        }

        self.prefix.insert(Contact::new(name, phone));
        self.exact.insert(name, phone);
        debug!(name, "contact inserted");
        Ok(())
    }

    /// Exact lookup. The trie is authoritative for reads.
    pub fn lookup(&self, name: &str) -> Option<&Contact> {
        self.prefix.lookup(name)
    }

    /// All contacts whose name starts with `prefix`; empty result is a
    /// valid "no matches" outcome, and the empty prefix matches nothing.
    pub fn search_by_prefix(&self, prefix: &str) -> Vec<Contact> {
        self.prefix.find_by_prefix(prefix)
    }

    /// Delete from both indexes, stage-then-commit.
    ///
    /// `Ok(false)` when the name is absent from both sides. Presence on
    /// exactly one side means the indexes already diverged; that is a
    /// fatal consistency fault, not a "not found".
    pub fn delete(&mut self, name: &str) -> Result<bool> {
        let in_prefix = self.prefix.lookup(name).is_some();
        let in_exact = self.exact.lookup(name).is_some();
        match (in_prefix, in_exact) {
            (false, false) => return Ok(false),
            (true, true) => {}
            (in_prefix, _) => return Err(self.divergence(name, one_sided(in_prefix))),
        }

        let prefix_removed = self.prefix.delete(name);
        let exact_removed = self.exact.delete(name);
        if !prefix_removed || !exact_removed {
            return Err(self.divergence(name, "delete commit failed on one index"));
        }
        debug!(name, "contact deleted");
        Ok(true)
    }

    /// Update in both indexes, stage-then-commit.
    ///
    /// The exists-and-phone-matches precondition is checked against both
    /// sides before either mutates. A consistent miss is `Ok(false)`; a
    /// one-sided miss is divergence. Renames compose the exact side as
    /// delete + insert, since its update contract has no new-key slot.
    pub fn update(
        &mut self,
        current_name: &str,
        current_phone: &str,
        new_name: &str,
        new_phone: &str,
    ) -> Result<bool> {
        if new_name.is_empty() {
            return Err(Error::EmptyName);
        }

        let prefix_ready = self
            .prefix
            .lookup(current_name)
            .is_some_and(|c| c.phone == current_phone);
        let exact_ready = self
            .exact
            .lookup(current_name)
            .is_some_and(|p| p == current_phone);
        match (prefix_ready, exact_ready) {
            (false, false) => return Ok(false),
            (true, true) => {}
            (prefix_ready, _) => {
                return Err(self.divergence(current_name, one_sided(prefix_ready)))
            }
        }

        let prefix_applied = self
            .prefix
            .update(current_name, current_phone, new_name, new_phone);
        let exact_applied = if current_name == new_name {
            self.exact.update(current_name, current_phone, new_phone)
        } else {
            // Structural move on the exact side as well
            let removed = self.exact.delete(current_name);
            self.exact.insert(new_name, new_phone);
            removed
        };
        if !prefix_applied || !exact_applied {
            return Err(self.divergence(current_name, "update commit failed on one index"));
        }
        debug!(current_name, new_name, "contact updated");
        Ok(true)
    }

    /// Every contact in ascending name order (ordinal comparison).
    ///
    /// Trie traversal already yields sorted output; the explicit stable
    /// re-sort is a deliberate belt-and-suspenders step so a future
    /// change to traversal order cannot silently break the guarantee.
    pub fn list_sorted(&self) -> Vec<Contact> {
        let mut contacts = self.prefix.all_in_order();
        contacts.sort_by(|a, b| a.name.cmp(&b.name));
        contacts
    }

    /// Reconciliation sweep: verify full parity between the two indexes.
    ///
    /// Under stage-then-commit this never fails; it exists as a cheap
    /// standing check for embedders and tests.
    pub fn verify_parity(&self) -> Result<()> {
        for contact in self.prefix.all_in_order() {
            match self.exact.lookup(&contact.name) {
                Some(phone) if phone == contact.phone => {}
                Some(phone) => {
                    return Err(self.divergence(
                        &contact.name,
                        &format!("phone mismatch: trie has {}, exact has {}", contact.phone, phone),
                    ))
                }
                None => return Err(self.divergence(&contact.name, one_sided(true))),
            }
        }
        if self.exact.len() != self.prefix.len() {
            return Err(Error::IndexDivergence {
                name: String::new(),
                detail: format!(
                    "size mismatch: trie holds {}, exact holds {}",
                    self.prefix.len(),
                    self.exact.len()
                ),
            });
        }
        Ok(())
    }

    /// Markdown rendering of the trie's current shape
    pub fn markdown_report(&self) -> String {
        report::render(&self.prefix, &self.settings.report)
    }

    /// Write all contacts to `writer` as pretty-printed JSON, sorted by name
    pub fn export_json<W: std::io::Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, &self.list_sorted())?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.prefix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty()
    }

    pub fn settings(&self) -> &DirectorySettings {
        &self.settings
    }

    pub fn prefix_index(&self) -> &PrefixIndex {
        &self.prefix
    }

    pub fn exact_index(&self) -> &E {
        &self.exact
    }

    fn divergence(&self, name: &str, detail: &str) -> Error {
        error!(name, detail, "index divergence detected");
        Error::IndexDivergence {
            name: name.to_string(),
            detail: detail.to_string(),
        }
    }
}

fn one_sided(in_prefix: bool) -> &'static str {
    if in_prefix {
        "present in prefix index only"
    } else {
        "present in exact index only"
    }
}
