use alloc::vec::Vec;

use crate::tree::{Tree, TreeNode};

/// Summary metrics derived from a single traversal of a built tree.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeStatistics {
    /// Number of leaves.
    pub leaf_count: usize,
    /// Sum of all internal-node heights.
    pub total_branch_length: f64,
    /// Maximum root-to-leaf depth in edges.
    pub max_depth: usize,
    /// `total_branch_length / leaf_count`.
    pub average_branch_length: f64,
}

impl TreeStatistics {
    /// Compute statistics by one explicit-stack traversal. Pure: no side
    /// effects, no caching.
    pub fn from_tree(tree: &Tree) -> Self {
        let mut leaf_count = 0;
        let mut total = 0.0;
        let mut max_depth = 0;

        let mut stack: Vec<(&TreeNode, usize)> = alloc::vec![(&tree.root, 0)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                TreeNode::Leaf { .. } => {
                    leaf_count += 1;
                    if depth > max_depth {
                        max_depth = depth;
                    }
                }
                TreeNode::Internal {
                    left,
                    right,
                    height,
                    ..
                } => {
                    total += height;
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
            }
        }

        Self {
            leaf_count,
            total_branch_length: total,
            max_depth,
            average_branch_length: total / leaf_count as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_leaf() {
        let stats = TreeStatistics::from_tree(&Tree::new(TreeNode::leaf(0)));
        assert_eq!(stats.leaf_count, 1);
        assert_eq!(stats.total_branch_length, 0.0);
        assert_eq!(stats.max_depth, 0);
        assert_eq!(stats.average_branch_length, 0.0);
    }

    #[test]
    fn caterpillar_metrics() {
        // (((0, 1), 2), 3) with heights 0.5, 1.0, 2.0
        let a = TreeNode::internal(TreeNode::leaf(0), TreeNode::leaf(1), 0.5);
        let b = TreeNode::internal(a, TreeNode::leaf(2), 1.0);
        let tree = Tree::new(TreeNode::internal(b, TreeNode::leaf(3), 2.0));
        let stats = TreeStatistics::from_tree(&tree);
        assert_eq!(stats.leaf_count, 4);
        assert_eq!(stats.total_branch_length, 3.5);
        assert_eq!(stats.max_depth, 3);
        assert_eq!(stats.average_branch_length, 0.875);
    }

    #[test]
    fn balanced_depth() {
        let left = TreeNode::internal(TreeNode::leaf(0), TreeNode::leaf(1), 1.0);
        let right = TreeNode::internal(TreeNode::leaf(2), TreeNode::leaf(3), 1.0);
        let tree = Tree::new(TreeNode::internal(left, right, 2.0));
        let stats = TreeStatistics::from_tree(&tree);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.total_branch_length, 4.0);
        assert_eq!(stats.average_branch_length, 1.0);
    }
}
