//! Markdown rendering of the trie's structure.
//!
//! Read-only presentation: one bullet per edge character, nested by
//! depth, with terminal nodes annotated with the full contact they
//! complete. Children render in ascending character order.

use std::fmt::Write;

use crate::config::ReportSettings;
use crate::trie::{PrefixIndex, TrieNode};

/// Render the trie as a nested markdown bullet list
pub fn render(index: &PrefixIndex, settings: &ReportSettings) -> String {
    let mut out = String::new();
    render_node(index.root(), settings, 0, &mut out);
    out
}

fn render_node(node: &TrieNode, settings: &ReportSettings, depth: usize, out: &mut String) {
    for (ch, child) in node.children() {
        for _ in 0..depth * settings.indent_width {
            out.push(' ');
        }
        out.push_str("- ");
        out.push(ch);
        if let Some(contact) = child.record() {
            // String sink: write! cannot fail here
            let _ = write!(out, " (end of \"{}\", phone {})", contact.name, contact.phone);
        }
        out.push('\n');
        render_node(child, settings, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Contact;

    #[test]
    fn test_render_nested_branches() {
        let mut index = PrefixIndex::new();
        index.insert(Contact::new("an", "1"));
        index.insert(Contact::new("ann", "2"));
        index.insert(Contact::new("bo", "3"));

        let markdown = render(&index, &ReportSettings::default());
        let expected = "- a\n  - n (end of \"an\", phone 1)\n    - n (end of \"ann\", phone 2)\n- b\n  - o (end of \"bo\", phone 3)\n";
        assert_eq!(markdown, expected);
    }

    #[test]
    fn test_render_empty_trie() {
        let index = PrefixIndex::new();
        assert!(render(&index, &ReportSettings::default()).is_empty());
    }

    #[test]
    fn test_indent_width_is_respected() {
        let mut index = PrefixIndex::new();
        index.insert(Contact::new("ab", "1"));

        let markdown = render(&index, &ReportSettings { indent_width: 4 });
        assert!(markdown.contains("\n    - b"));
    }
}
