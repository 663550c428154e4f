use crate::models::Contact;
use crate::trie::node::TrieNode;

/// Trie-backed prefix index over contacts.
///
/// Owns the root node exclusively; every descendant is owned by its
/// parent, so the structure is a strict tree. All entry points are
/// total: absence and precondition failures come back as `None`/`false`,
/// never as errors or panics.
#[derive(Debug, Default)]
pub struct PrefixIndex {
    root: TrieNode,
    len: usize,
}

impl PrefixIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live contacts
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Insert a contact, creating one edge per character of its name.
    ///
    /// Upsert semantics: a contact already stored under the same name is
    /// displaced and returned. Never fails; grows the tree by at most
    /// `name.chars().count()` nodes.
    pub fn insert(&mut self, contact: Contact) -> Option<Contact> {
        let mut node = &mut self.root;
        for ch in contact.name.chars() {
            node = node.children.entry(ch).or_insert_with(TrieNode::new);
        }
        let displaced = node.record.replace(contact);
        if displaced.is_none() {
            self.len += 1;
        }
        displaced
    }

    /// Exact lookup by full name.
    ///
    /// A name that is only a strict prefix of stored names (the walk
    /// completes but the final node is not terminal) yields `None`.
    pub fn lookup(&self, name: &str) -> Option<&Contact> {
        self.walk(name).and_then(TrieNode::record)
    }

    /// All contacts whose name starts with `prefix`.
    ///
    /// The empty prefix returns an empty vec by policy: prefix search
    /// requires at least one character so a blank query cannot dump the
    /// whole directory. Result ordering is not part of this contract.
    pub fn find_by_prefix(&self, prefix: &str) -> Vec<Contact> {
        let mut results = Vec::new();
        if prefix.is_empty() {
            return results;
        }
        if let Some(node) = self.walk(prefix) {
            Self::collect(node, &mut results);
        }
        results
    }

    /// Every contact, in lexicographic name order.
    ///
    /// Depth-first with children visited in ascending character order;
    /// sorted output falls out of the traversal itself.
    pub fn all_in_order(&self) -> Vec<Contact> {
        let mut results = Vec::new();
        Self::collect(&self.root, &mut results);
        results
    }

    /// Remove the contact stored under `name`.
    ///
    /// Returns true iff a record was removed. Unwinding from the
    /// terminal node, each ancestor drops its child edge iff that child
    /// became childless and non-terminal, so no dead chain survives a
    /// deletion. An absent name leaves the tree untouched. The root is
    /// never removed.
    pub fn delete(&mut self, name: &str) -> bool {
        let path: Vec<char> = name.chars().collect();
        let (removed, _) = Self::delete_at(&mut self.root, &path, 0);
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Guarded update.
    ///
    /// Succeeds only if `current_name` is stored with exactly
    /// `current_phone` (optimistic precondition, not a lock). Same name:
    /// the phone is mutated in place. Different name: delete + insert,
    /// because a renamed contact lives on a different path entirely.
    pub fn update(
        &mut self,
        current_name: &str,
        current_phone: &str,
        new_name: &str,
        new_phone: &str,
    ) -> bool {
        match self.lookup(current_name) {
            Some(contact) if contact.phone == current_phone => {}
            _ => return false,
        }

        if current_name == new_name {
            let mut node = &mut self.root;
            for ch in current_name.chars() {
                node = match node.children.get_mut(&ch) {
                    Some(child) => child,
                    None => return false,
                };
            }
            if let Some(record) = node.record.as_mut() {
                record.phone = new_phone.to_string();
                return true;
            }
            false
        } else {
            self.delete(current_name);
            self.insert(Contact::new(new_name, new_phone));
            true
        }
    }

    fn walk(&self, path: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for ch in path.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }

    fn collect(node: &TrieNode, results: &mut Vec<Contact>) {
        if let Some(record) = node.record() {
            results.push(record.clone());
        }
        for (_, child) in node.children() {
            Self::collect(child, results);
        }
    }

    /// Post-order delete. Returns `(record_removed, prune_me)`: the
    /// second flag tells the parent to drop its edge to this node, and
    /// propagates one level at a time until a node that must be retained
    /// (terminal, or still branching) is reached.
    fn delete_at(node: &mut TrieNode, path: &[char], depth: usize) -> (bool, bool) {
        if depth == path.len() {
            if node.record.take().is_some() {
                return (true, node.is_prunable());
            }
            return (false, false);
        }

        let ch = path[depth];
        let Some(child) = node.children.get_mut(&ch) else {
            return (false, false);
        };
        let (removed, prune_child) = Self::delete_at(child, path, depth + 1);
        if prune_child {
            node.children.remove(&ch);
        }
        (removed, removed && node.is_prunable())
    }
}
