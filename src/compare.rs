use alloc::collections::BTreeSet;
use alloc::string::String;

use crate::tree::{Tree, TreeNode};

/// Robinson-Foulds distance and similarity between two trees.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeComparison {
    /// Symmetric-difference cardinality of the two bipartition sets.
    pub robinson_foulds: usize,
    /// `|A ∩ B| / |A ∪ B|`, in `0.0..=1.0`.
    pub similarity: f64,
}

/// The bipartition (clade) set of a tree: for every internal node, the
/// set of leaf identifiers reachable beneath it.
///
/// Leaves are keyed by annotated taxon id, falling back to
/// `taxon_<index>` for unannotated trees — so two unannotated trees are
/// only comparable when they were built over the same taxon order.
pub fn bipartitions(tree: &Tree) -> BTreeSet<BTreeSet<String>> {
    let mut out = BTreeSet::new();
    clades(&tree.root, &mut out);
    out
}

fn clades(node: &TreeNode, out: &mut BTreeSet<BTreeSet<String>>) -> BTreeSet<String> {
    match node {
        TreeNode::Leaf { taxon, annotation } => {
            let mut leaf = BTreeSet::new();
            leaf.insert(TreeNode::leaf_identifier(*taxon, annotation.as_ref()));
            leaf
        }
        TreeNode::Internal { left, right, .. } => {
            let mut clade = clades(left, out);
            clade.extend(clades(right, out));
            out.insert(clade.clone());
            clade
        }
    }
}

/// Compare two trees by their bipartition sets.
///
/// `RF = |A ∪ B| - |A ∩ B|`; `similarity = |A ∩ B| / |A ∪ B|`. The two
/// trees need not share a leaf set — unmatched clades simply fail to
/// intersect, and fully disjoint leaf sets yield similarity 0.0.
/// Comparing a tree with itself yields RF 0 and similarity 1.0; two
/// trees without any internal node (both bipartition sets empty) also
/// compare as identical.
pub fn compare_trees(a: &Tree, b: &Tree) -> TreeComparison {
    let set_a = bipartitions(a);
    let set_b = bipartitions(b);

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.len() + set_b.len() - intersection;

    TreeComparison {
        robinson_foulds: union - intersection,
        similarity: if union == 0 {
            1.0
        } else {
            intersection as f64 / union as f64
        },
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::annotate::annotate;
    use crate::taxon::Taxon;

    fn taxa(ids: &[&str]) -> Vec<Taxon> {
        ids.iter()
            .map(|id| Taxon::new(*id, *id, "sp"))
            .collect()
    }

    fn annotated(root: TreeNode, ids: &[&str]) -> Tree {
        let mut tree = Tree::new(root);
        annotate(&mut tree, &taxa(ids));
        tree
    }

    fn caterpillar() -> TreeNode {
        // ((0, 1), 2)
        let cherry = TreeNode::internal(TreeNode::leaf(0), TreeNode::leaf(1), 1.0);
        TreeNode::internal(cherry, TreeNode::leaf(2), 2.0)
    }

    #[test]
    fn bipartitions_list_every_internal_clade() {
        let tree = annotated(caterpillar(), &["a", "b", "c"]);
        let sets = bipartitions(&tree);
        assert_eq!(sets.len(), 2);
        let cherry: BTreeSet<String> = ["a", "b"].iter().map(|s| String::from(*s)).collect();
        let all: BTreeSet<String> =
            ["a", "b", "c"].iter().map(|s| String::from(*s)).collect();
        assert!(sets.contains(&cherry));
        assert!(sets.contains(&all));
    }

    #[test]
    fn self_comparison_is_identity() {
        let tree = annotated(caterpillar(), &["a", "b", "c"]);
        let cmp = compare_trees(&tree, &tree);
        assert_eq!(cmp.robinson_foulds, 0);
        assert_eq!(cmp.similarity, 1.0);
    }

    #[test]
    fn different_topologies_share_only_the_full_clade() {
        let a = annotated(caterpillar(), &["a", "b", "c"]);
        // ((0, 2), 1): different cherry, same leaf set.
        let other = TreeNode::internal(
            TreeNode::internal(TreeNode::leaf(0), TreeNode::leaf(2), 1.0),
            TreeNode::leaf(1),
            2.0,
        );
        let b = annotated(other, &["a", "b", "c"]);
        let cmp = compare_trees(&a, &b);
        // Clade sets: {ab, abc} vs {ac, abc} -> union 3, intersection 1.
        assert_eq!(cmp.robinson_foulds, 2);
        assert!((cmp.similarity - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn disjoint_leaf_sets_have_zero_similarity() {
        let a = annotated(caterpillar(), &["a", "b", "c"]);
        let b = annotated(caterpillar(), &["x", "y", "z"]);
        let cmp = compare_trees(&a, &b);
        assert_eq!(cmp.similarity, 0.0);
        assert_eq!(cmp.robinson_foulds, 4);
    }

    #[test]
    fn leafless_bipartition_sets_compare_as_identical() {
        let a = annotated(TreeNode::leaf(0), &["a"]);
        let b = annotated(TreeNode::leaf(0), &["b"]);
        let cmp = compare_trees(&a, &b);
        assert_eq!(cmp.robinson_foulds, 0);
        assert_eq!(cmp.similarity, 1.0);
    }

    #[test]
    fn unannotated_trees_compare_by_position() {
        let a = Tree::new(caterpillar());
        let b = Tree::new(caterpillar());
        let cmp = compare_trees(&a, &b);
        assert_eq!(cmp.robinson_foulds, 0);
        assert_eq!(cmp.similarity, 1.0);
    }
}
