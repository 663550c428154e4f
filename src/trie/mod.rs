//! Character-trie prefix index.
//!
//! One edge per `char`, full records stored at terminal nodes. The
//! root-to-terminal path spells the stored name exactly, so in-order
//! traversal yields contacts in lexicographic name order with no
//! separate sort step.

pub mod index;
pub mod node;

pub use index::PrefixIndex;
pub use node::TrieNode;
