use alloc::vec::Vec;

use crate::matrix::DistanceMatrix;
use crate::tree::TreeNode;

/// A node in the construction arena.
#[derive(Clone, Copy, Debug)]
pub(crate) enum ArenaNode {
    /// Original taxon at this input position.
    Leaf(usize),
    /// Merge of two earlier arena entries.
    Merge { left: u32, right: u32, height: f64 },
}

/// Construction-time working state shared by both clustering algorithms.
///
/// Nodes are appended and never removed. `active` holds the indices of
/// not-yet-merged nodes in ascending order, which fixes the enumeration
/// order used by the tie-break rule: when several pairs attain the
/// selection minimum, the first pair encountered while scanning active
/// positions `(a, b)` with `a < b` wins. Reduced distances are stored
/// lower-triangular and grow by one row per merge, so merging never
/// rebuilds the matrix.
///
/// The arena is local working memory for a single build and is discarded
/// once the final tree has been extracted.
#[derive(Debug)]
pub(crate) struct ClusterArena {
    nodes: Vec<ArenaNode>,
    active: Vec<u32>,
    /// `dist[i][j]` valid for `j < i`; row `i` is appended when node `i`
    /// is created.
    dist: Vec<Vec<f64>>,
    /// Leaf count under each arena node (cluster size for UPGMA
    /// weighting).
    size: Vec<usize>,
}

impl ClusterArena {
    /// Seed the arena with one leaf node per taxon position.
    pub fn from_matrix(matrix: &DistanceMatrix) -> Self {
        let n = matrix.len();
        let mut nodes = Vec::with_capacity(2 * n);
        let mut dist = Vec::with_capacity(2 * n);
        for i in 0..n {
            nodes.push(ArenaNode::Leaf(i));
            dist.push((0..i).map(|j| matrix.get(i, j)).collect());
        }
        Self {
            nodes,
            active: (0..n as u32).collect(),
            dist,
            size: alloc::vec![1; n],
        }
    }

    /// Currently active arena indices, ascending.
    pub fn active(&self) -> &[u32] {
        &self.active
    }

    pub fn num_active(&self) -> usize {
        self.active.len()
    }

    /// Reduced distance between two arena nodes.
    pub fn distance(&self, a: u32, b: u32) -> f64 {
        if a == b {
            return 0.0;
        }
        let (hi, lo) = if a > b { (a, b) } else { (b, a) };
        self.dist[hi as usize][lo as usize]
    }

    /// Leaf count under an arena node.
    pub fn size(&self, id: u32) -> usize {
        self.size[id as usize]
    }

    /// Remove `a` and `b` from the active set and append their merge.
    ///
    /// `reduced` computes the distance from the new node to each remaining
    /// active node; it sees the arena state from before the merge. Returns
    /// the new node's arena index, which is larger than all existing
    /// indices and therefore appended at the end of the active set.
    pub fn merge(
        &mut self,
        a: u32,
        b: u32,
        height: f64,
        reduced: impl Fn(&Self, u32) -> f64,
    ) -> u32 {
        let new_id = self.nodes.len() as u32;
        let mut row = alloc::vec![0.0; new_id as usize];
        for &m in &self.active {
            if m != a && m != b {
                row[m as usize] = reduced(self, m);
            }
        }

        self.nodes.push(ArenaNode::Merge {
            left: a,
            right: b,
            height,
        });
        self.dist.push(row);
        self.size.push(self.size[a as usize] + self.size[b as usize]);
        self.active.retain(|&m| m != a && m != b);
        self.active.push(new_id);
        new_id
    }

    /// Materialize the subtree rooted at an arena index as an owned
    /// [`TreeNode`].
    pub fn extract(&self, id: u32) -> TreeNode {
        match self.nodes[id as usize] {
            ArenaNode::Leaf(taxon) => TreeNode::leaf(taxon),
            ArenaNode::Merge {
                left,
                right,
                height,
            } => TreeNode::internal(self.extract(left), self.extract(right), height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix3() -> DistanceMatrix {
        DistanceMatrix::from_rows(alloc::vec![
            alloc::vec![0.0, 2.0, 4.0],
            alloc::vec![2.0, 0.0, 6.0],
            alloc::vec![4.0, 6.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn seeds_one_leaf_per_taxon() {
        let arena = ClusterArena::from_matrix(&matrix3());
        assert_eq!(arena.num_active(), 3);
        assert_eq!(arena.active(), &[0, 1, 2]);
        assert_eq!(arena.distance(0, 1), 2.0);
        assert_eq!(arena.distance(1, 0), 2.0);
        assert_eq!(arena.distance(2, 2), 0.0);
        assert_eq!(arena.size(0), 1);
    }

    #[test]
    fn merge_shrinks_active_set_and_appends() {
        let mut arena = ClusterArena::from_matrix(&matrix3());
        let u = arena.merge(0, 1, 1.0, |arena, m| {
            (arena.distance(0, m) + arena.distance(1, m)) / 2.0
        });
        assert_eq!(u, 3);
        assert_eq!(arena.active(), &[2, 3]);
        assert_eq!(arena.size(u), 2);
        assert_eq!(arena.distance(u, 2), 5.0); // (4 + 6) / 2
    }

    #[test]
    fn extract_rebuilds_merge_structure() {
        let mut arena = ClusterArena::from_matrix(&matrix3());
        let u = arena.merge(0, 1, 1.0, |_, _| 0.0);
        let root = arena.merge(u, 2, 2.5, |_, _| 0.0);
        let tree = arena.extract(root);
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.internal_count(), 2);
        match tree {
            TreeNode::Internal { height, .. } => assert_eq!(height, 2.5),
            TreeNode::Leaf { .. } => panic!("root should be internal"),
        }
    }
}
