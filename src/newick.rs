use alloc::string::String;
use alloc::vec::Vec;

use crate::tree::{Tree, TreeNode};

/// Render a tree to Newick text.
///
/// - Leaf: `<name>:<height>` with the leaf's own height fixed at 0. The
///   name is the annotated display symbol (or `taxon_<index>` for an
///   unannotated tree), sanitized by replacing spaces and the Newick
///   structural characters `( ) , : ;` with `_`.
/// - Internal: `(<left>,<right>)[<support>]:<height>`; the bracketed
///   support segment (rounded to an integer percentage) is omitted when
///   absent.
/// - The full output is terminated with `;`.
///
/// Branch lengths are formatted to six decimal places with trailing
/// zeros (and a then-dangling decimal point) trimmed, so output is
/// byte-reproducible across runs: `0 -> "0"`, `0.75 -> "0.75"`.
pub fn to_newick(tree: &Tree) -> String {
    let mut out = String::new();
    write_node(&tree.root, &mut out);
    out.push(';');
    out
}

fn write_node(node: &TreeNode, out: &mut String) {
    match node {
        TreeNode::Leaf { taxon, annotation } => {
            let name = match annotation {
                Some(ann) => sanitize_label(&ann.symbol),
                None => TreeNode::leaf_identifier(*taxon, None),
            };
            out.push_str(&name);
            out.push(':');
            out.push_str(&format_height(0.0));
        }
        TreeNode::Internal {
            left,
            right,
            height,
            support,
        } => {
            out.push('(');
            write_node(left, out);
            out.push(',');
            write_node(right, out);
            out.push(')');
            if let Some(s) = support {
                out.push('[');
                out.push_str(&alloc::format!("{:.0}", s));
                out.push(']');
            }
            out.push(':');
            out.push_str(&format_height(*height));
        }
    }
}

/// Replace spaces and Newick structural characters with `_`.
pub fn sanitize_label(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            ' ' | '(' | ')' | ',' | ':' | ';' => '_',
            other => other,
        })
        .collect()
}

/// Fixed-precision branch length formatting: six decimal places, trailing
/// zeros trimmed.
fn format_height(height: f64) -> String {
    let mut s = alloc::format!("{:.6}", height);
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

/// Convenience wrapper collecting the sanitized leaf names in traversal
/// order, useful for debugging and tests.
pub fn leaf_names(tree: &Tree) -> Vec<String> {
    let mut out = Vec::with_capacity(tree.leaf_count());
    collect(&tree.root, &mut out);
    out
}

fn collect(node: &TreeNode, out: &mut Vec<String>) {
    match node {
        TreeNode::Leaf { taxon, annotation } => out.push(match annotation {
            Some(ann) => sanitize_label(&ann.symbol),
            None => TreeNode::leaf_identifier(*taxon, None),
        }),
        TreeNode::Internal { left, right, .. } => {
            collect(left, out);
            collect(right, out);
        }
    }
}
