use std::collections::BTreeMap;

use crate::models::Contact;

/// A single trie node.
///
/// There is no separate terminal flag: a node is terminal iff it holds
/// a record. Children live in a `BTreeMap` so
/// iteration is in ascending character order, which is what makes
/// in-order traversal lexicographic.
#[derive(Debug, Default)]
pub struct TrieNode {
    pub(crate) children: BTreeMap<char, TrieNode>,
    pub(crate) record: Option<Contact>,
}

impl TrieNode {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Whether this node's path spells a complete stored name
    pub fn is_terminal(&self) -> bool {
        self.record.is_some()
    }

    pub fn record(&self) -> Option<&Contact> {
        self.record.as_ref()
    }

    /// Child edges in ascending character order
    pub fn children(&self) -> impl Iterator<Item = (char, &TrieNode)> {
        self.children.iter().map(|(ch, node)| (*ch, node))
    }

    /// A childless non-terminal node is dead weight; the pruning
    /// invariant says it must not exist anywhere except the root.
    pub(crate) fn is_prunable(&self) -> bool {
        self.children.is_empty() && !self.is_terminal()
    }
}
