use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// Per-leaf metadata attached by the annotator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeafAnnotation {
    /// Stable taxon identifier; also keys bipartitions during comparison.
    pub id: String,
    /// Display symbol used for Newick output.
    pub symbol: String,
    /// Species label.
    pub species: String,
}

/// A node in a built tree.
///
/// The two variants are an explicit sum type so every consumer
/// pattern-matches exhaustively. Ownership is strictly hierarchical —
/// each node is owned by exactly one parent (or is the root), so the
/// structure is a binary tree, never a graph with shared or cyclic
/// references.
#[derive(Clone, Debug, PartialEq)]
pub enum TreeNode {
    /// References exactly one taxon by its position in the input list.
    Leaf {
        taxon: usize,
        annotation: Option<LeafAnnotation>,
    },
    /// Owns exactly two children.
    Internal {
        left: Box<TreeNode>,
        right: Box<TreeNode>,
        /// Merge height assigned by the clustering algorithm
        /// (`d(i*, j*) / 2`); non-negative.
        height: f64,
        /// Clade-recovery support percentage in `0..=100`, present only
        /// after [`annotate_support`](crate::annotate::annotate_support).
        support: Option<f64>,
    },
}

impl TreeNode {
    pub fn leaf(taxon: usize) -> Self {
        Self::Leaf {
            taxon,
            annotation: None,
        }
    }

    pub fn internal(left: TreeNode, right: TreeNode, height: f64) -> Self {
        Self::Internal {
            left: Box::new(left),
            right: Box::new(right),
            height,
            support: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Number of leaves in the subtree rooted at this node.
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = alloc::vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Self::Leaf { .. } => count += 1,
                Self::Internal { left, right, .. } => {
                    stack.push(left);
                    stack.push(right);
                }
            }
        }
        count
    }

    /// Number of internal nodes in the subtree rooted at this node.
    pub fn internal_count(&self) -> usize {
        let mut count = 0;
        let mut stack = alloc::vec![self];
        while let Some(node) = stack.pop() {
            if let Self::Internal { left, right, .. } = node {
                count += 1;
                stack.push(left);
                stack.push(right);
            }
        }
        count
    }

    /// Identifier used for this leaf in Newick output and bipartition
    /// comparison: the annotated taxon id, or `taxon_<index>` for an
    /// unannotated tree.
    pub fn leaf_identifier(taxon: usize, annotation: Option<&LeafAnnotation>) -> String {
        match annotation {
            Some(ann) => ann.id.clone(),
            None => format!("taxon_{}", taxon),
        }
    }
}

/// A built tree: a single root node plus its derived leaf count.
///
/// A tree built from `n >= 2` taxa has exactly `n` leaves and `n - 1`
/// internal nodes. For `n = 2` the tree degenerates to one internal root
/// joining two leaves; for `n = 1` the root is itself a leaf.
#[derive(Clone, Debug, PartialEq)]
pub struct Tree {
    pub root: TreeNode,
    leaf_count: usize,
}

impl Tree {
    pub fn new(root: TreeNode) -> Self {
        let leaf_count = root.leaf_count();
        Self { root, leaf_count }
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Taxon positions of all leaves, in traversal order (left before
    /// right), which for a freshly built tree reflects merge structure
    /// rather than input order.
    pub fn leaf_indices(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.leaf_count);
        collect_leaves(&self.root, &mut out);
        out
    }
}

fn collect_leaves(node: &TreeNode, out: &mut Vec<usize>) {
    match node {
        TreeNode::Leaf { taxon, .. } => out.push(*taxon),
        TreeNode::Internal { left, right, .. } => {
            collect_leaves(left, out);
            collect_leaves(right, out);
        }
    }
}
