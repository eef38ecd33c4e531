//! Debug tree printer
//!
//! Readable, indented dump of a node tree for diagnostics.

use crate::ast::types::Node;
use std::fmt::Write;

/// Render `node` and its descendants, one node per line.
///
/// ```
/// let tree = shparse::parse("ls");
/// let dump = shparse::format_tree(&tree);
/// assert!(dump.starts_with("program [0..2]"));
/// ```
pub fn format_tree(node: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, node, 0);
    out
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    let _ = write!(
        out,
        "{:indent$}{} [{}..{}] {:?}",
        "",
        node.kind,
        node.start_index,
        node.end_index,
        node.text,
        indent = depth * 2
    );
    if node.inner_text != node.text {
        let _ = write!(out, " => {:?}", node.inner_text);
    }
    if !node.complete {
        out.push_str(" (incomplete)");
    }
    out.push('\n');
    for child in &node.children {
        write_node(out, child, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_format_tree_nesting() {
        let dump = format_tree(&parse("echo \"hi"));
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines[0], "program [0..8] \"echo \\\"hi\"");
        assert!(lines[1].starts_with("  command [0..8]"));
        assert!(lines[2].starts_with("    word [0..4]"));
        assert!(lines[3].starts_with("    string [5..8]"));
        assert!(lines[3].ends_with("=> \"hi\" (incomplete)"));
    }
}
