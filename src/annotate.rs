use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

use crate::compare::bipartitions;
use crate::taxon::Taxon;
use crate::tree::{LeafAnnotation, Tree, TreeNode};

/// Attach taxon metadata to every leaf of a built tree.
///
/// Each leaf's annotation is looked up by its taxon position in the input
/// list — the builder preserves positions, so no re-derivation happens
/// here. Leaves whose position falls outside the list (possible only for
/// hand-built trees) are left unannotated.
pub fn annotate(tree: &mut Tree, taxa: &[Taxon]) {
    annotate_node(&mut tree.root, taxa);
}

fn annotate_node(node: &mut TreeNode, taxa: &[Taxon]) {
    match node {
        TreeNode::Leaf { taxon, annotation } => {
            if let Some(t) = taxa.get(*taxon) {
                *annotation = Some(LeafAnnotation {
                    id: t.id.clone(),
                    symbol: t.symbol.clone(),
                    species: t.species.clone(),
                });
            }
        }
        TreeNode::Internal { left, right, .. } => {
            annotate_node(left, taxa);
            annotate_node(right, taxa);
        }
    }
}

/// Attach clade-recovery support values to every internal node.
///
/// The support of an internal node is the percentage (0–100) of
/// `replicates` whose bipartition sets contain that node's clade. The
/// replicate trees are expected to come from the caller's own resampling
/// procedure (e.g. trees built from resampled distance inputs); this
/// crate never resamples data itself and never invents support values.
/// With an empty replicate slice every support value is cleared.
pub fn annotate_support(tree: &mut Tree, replicates: &[Tree]) {
    let replicate_sets: Vec<_> = replicates.iter().map(bipartitions).collect();
    support_node(&mut tree.root, &replicate_sets);
}

/// Recursively assign support, returning the clade below `node`.
fn support_node(
    node: &mut TreeNode,
    replicate_sets: &[BTreeSet<BTreeSet<String>>],
) -> BTreeSet<String> {
    match node {
        TreeNode::Leaf { taxon, annotation } => {
            let mut clade = BTreeSet::new();
            clade.insert(TreeNode::leaf_identifier(*taxon, annotation.as_ref()));
            clade
        }
        TreeNode::Internal {
            left,
            right,
            support,
            ..
        } => {
            let mut clade = support_node(left, replicate_sets);
            clade.extend(support_node(right, replicate_sets));
            *support = if replicate_sets.is_empty() {
                None
            } else {
                let recovered = replicate_sets
                    .iter()
                    .filter(|set| set.contains(&clade))
                    .count();
                Some(100.0 * recovered as f64 / replicate_sets.len() as f64)
            };
            clade
        }
    }
}
