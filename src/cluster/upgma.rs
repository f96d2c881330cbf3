use super::arena::ClusterArena;
use crate::matrix::DistanceMatrix;
use crate::tree::TreeNode;

/// UPGMA (size-weighted average linkage) clustering over a distance
/// matrix of at least two taxa.
///
/// While more than one cluster remains active:
/// 1. Find the globally minimum distance pair; ties broken by the lowest
///    index pair in the active set's ascending enumeration order (same
///    rule as neighbor-joining)
/// 2. Merge it at height `d(i*, j*) / 2`
/// 3. Reduce distances by the size-weighted average
///    `d(u, m) = (|i*| * d(i*, m) + |j*| * d(j*, m)) / (|i*| + |j*|)`
///
/// The size weighting (as opposed to the WPGMA plain average) is what
/// keeps merge heights consistent under unequal cluster sizes: heights
/// are non-decreasing along the merge order, so every leaf ends up
/// equidistant from the root when edges are measured as parent/child
/// height differences.
pub(crate) fn upgma(matrix: &DistanceMatrix) -> TreeNode {
    debug_assert!(matrix.len() >= 2, "boundary sizes are handled by build");
    let mut arena = ClusterArena::from_matrix(matrix);

    while arena.num_active() > 1 {
        let active = arena.active();
        let k = active.len();

        let mut best: Option<(f64, u32, u32)> = None;
        for a_pos in 0..k {
            for b_pos in (a_pos + 1)..k {
                let (i, j) = (active[a_pos], active[b_pos]);
                let d = arena.distance(i, j);
                if best.map_or(true, |(bd, _, _)| d < bd) {
                    best = Some((d, i, j));
                }
            }
        }

        // k > 1 guarantees at least one pair
        let (d_ij, i, j) = best.unwrap();
        let (si, sj) = (arena.size(i) as f64, arena.size(j) as f64);
        arena.merge(i, j, d_ij / 2.0, |arena, m| {
            (si * arena.distance(i, m) + sj * arena.distance(j, m)) / (si + sj)
        });
    }

    arena.extract(arena.active()[0])
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    fn build(rows: Vec<Vec<f64>>) -> TreeNode {
        upgma(&DistanceMatrix::from_rows(rows).unwrap())
    }

    /// Merge heights down every root-to-leaf path, leaves implicit at 0.
    fn path_heights(node: &TreeNode, prefix: &mut Vec<f64>, out: &mut Vec<Vec<f64>>) {
        match node {
            TreeNode::Leaf { .. } => out.push(prefix.clone()),
            TreeNode::Internal {
                left,
                right,
                height,
                ..
            } => {
                prefix.push(*height);
                path_heights(left, prefix, out);
                path_heights(right, prefix, out);
                prefix.pop();
            }
        }
    }

    /// The ultrametric check: along every path merge heights decrease
    /// monotonically from the root, so each leaf's distance from the root
    /// (telescoped sum of parent-minus-child height differences) equals
    /// the root height exactly.
    fn assert_ultrametric(tree: &TreeNode) {
        let mut paths = Vec::new();
        path_heights(tree, &mut Vec::new(), &mut paths);
        let root_height = paths[0][0];
        for path in &paths {
            assert_eq!(path[0], root_height);
            for w in path.windows(2) {
                assert!(
                    w[0] >= w[1] - 1e-9,
                    "merge heights must not increase toward the leaves: {:?}",
                    path
                );
            }
            // Root-to-leaf distance telescopes to the root height.
            let mut depth = 0.0;
            let mut prev = path[0];
            for &h in &path[1..] {
                depth += prev - h;
                prev = h;
            }
            depth += prev; // final edge down to the leaf at height 0
            assert!(
                (depth - root_height).abs() < 1e-9,
                "leaf not equidistant from root: {} vs {}",
                depth,
                root_height
            );
        }
    }

    #[test]
    fn three_taxa_merges_closest_pair_first() {
        let tree = build(alloc::vec![
            alloc::vec![0.0, 2.0, 8.0],
            alloc::vec![2.0, 0.0, 8.0],
            alloc::vec![8.0, 8.0, 0.0],
        ]);
        // (0, 1) at height 1, then the root at height 4. The merged pair
        // has the highest arena index, so it lands as the right child.
        match &tree {
            TreeNode::Internal {
                left,
                right,
                height,
                ..
            } => {
                assert_eq!(*height, 4.0);
                assert!(left.is_leaf());
                assert_eq!(right.leaf_count(), 2);
                match right.as_ref() {
                    TreeNode::Internal { height, .. } => assert_eq!(*height, 1.0),
                    TreeNode::Leaf { .. } => panic!("expected cherry"),
                }
            }
            TreeNode::Leaf { .. } => panic!("root should be internal"),
        }
    }

    #[test]
    fn size_weighted_reduction() {
        // After merging (0, 1), the distance from the pair to 2 is the
        // plain average of d(0,2) and d(1,2) while sizes are equal; a
        // third merge then weights by cluster size 2 vs 1.
        let tree = build(alloc::vec![
            alloc::vec![0.0, 2.0, 6.0, 10.0],
            alloc::vec![2.0, 0.0, 8.0, 10.0],
            alloc::vec![6.0, 8.0, 0.0, 10.0],
            alloc::vec![10.0, 10.0, 10.0, 0.0],
        ]);
        // Merge (0,1) at 1; d(u,2) = 7, d(u,3) = 10. Merge (u,2) at 3.5;
        // d(v,3) = (2*10 + 1*10)/3 = 10. Root at 5.
        match &tree {
            TreeNode::Internal { height, .. } => assert_eq!(*height, 5.0),
            TreeNode::Leaf { .. } => panic!("root should be internal"),
        }
        assert_ultrametric(&tree);
    }

    #[test]
    fn ultrametric_on_uneven_input() {
        let tree = build(alloc::vec![
            alloc::vec![0.0, 4.0, 9.0, 7.0, 12.0],
            alloc::vec![4.0, 0.0, 9.0, 7.0, 12.0],
            alloc::vec![9.0, 9.0, 0.0, 8.0, 12.0],
            alloc::vec![7.0, 7.0, 8.0, 0.0, 12.0],
            alloc::vec![12.0, 12.0, 12.0, 12.0, 0.0],
        ]);
        assert_eq!(tree.leaf_count(), 5);
        assert_eq!(tree.internal_count(), 4);
        assert_ultrametric(&tree);
    }

    #[test]
    fn all_zero_distances_resolve_by_index_order() {
        let tree = build(alloc::vec![
            alloc::vec![0.0; 3],
            alloc::vec![0.0; 3],
            alloc::vec![0.0; 3],
        ]);
        assert_eq!(tree.leaf_count(), 3);
        // First merge is (0, 1), then leaf 2 joins the pair.
        match &tree {
            TreeNode::Internal { left, right, .. } => {
                assert!(left.is_leaf());
                assert_eq!(right.leaf_count(), 2);
            }
            TreeNode::Leaf { .. } => panic!("root should be internal"),
        }
    }
}
