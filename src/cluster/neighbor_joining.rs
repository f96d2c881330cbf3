use alloc::vec::Vec;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use super::arena::ClusterArena;
use crate::matrix::DistanceMatrix;
use crate::tree::TreeNode;

/// Neighbor-joining clustering over a distance matrix of at least three
/// taxa (smaller inputs are handled directly by the build entry point).
///
/// While more than two nodes remain active (k = active count):
/// 1. Compute row sums `R(i) = sum over active j of d(i, j)`
/// 2. Compute `Q(i, j) = (k - 2) * d(i, j) - R(i) - R(j)` for active pairs
/// 3. Merge the pair minimizing Q; ties broken by the lowest index pair
///    in the active set's ascending enumeration order
/// 4. New node height = `d(i*, j*) / 2`; reduced distance
///    `d(u, m) = (d(i*, m) + d(j*, m) - d(i*, j*)) / 2`
///
/// The final two actives are joined under the root at half their
/// distance. The `d/2` height rule is a deliberate simplification shared
/// with UPGMA; canonical NJ assigns each child an asymmetric branch
/// length from the row sums and could replace it without changing
/// topology.
pub(crate) fn neighbor_joining(matrix: &DistanceMatrix) -> TreeNode {
    debug_assert!(matrix.len() >= 3, "boundary sizes are handled by build");
    let mut arena = ClusterArena::from_matrix(matrix);

    while arena.num_active() > 2 {
        let k = arena.num_active();
        let sums = row_sums(&arena);

        // Scan active pairs in enumeration order; strict `<` keeps the
        // first (lowest-index) pair among equal minima.
        let mut best: Option<(f64, u32, u32)> = None;
        let active = arena.active();
        for a_pos in 0..k {
            for b_pos in (a_pos + 1)..k {
                let (i, j) = (active[a_pos], active[b_pos]);
                let q = (k as f64 - 2.0) * arena.distance(i, j) - sums[a_pos] - sums[b_pos];
                if best.map_or(true, |(bq, _, _)| q < bq) {
                    best = Some((q, i, j));
                }
            }
        }

        // k > 2 guarantees at least one pair
        let (_, i, j) = best.unwrap();
        let d_ij = arena.distance(i, j);
        arena.merge(i, j, d_ij / 2.0, |arena, m| {
            (arena.distance(i, m) + arena.distance(j, m) - d_ij) / 2.0
        });
    }

    let (i, j) = (arena.active()[0], arena.active()[1]);
    let d_ij = arena.distance(i, j);
    let root = arena.merge(i, j, d_ij / 2.0, |_, _| 0.0);
    arena.extract(root)
}

/// Row sums over the active set, indexed by active position.
#[cfg(feature = "rayon")]
fn row_sums(arena: &ClusterArena) -> Vec<f64> {
    let active = arena.active();
    active
        .par_iter()
        .map(|&i| active.iter().map(|&j| arena.distance(i, j)).sum())
        .collect()
}

#[cfg(not(feature = "rayon"))]
fn row_sums(arena: &ClusterArena) -> Vec<f64> {
    let active = arena.active();
    active
        .iter()
        .map(|&i| active.iter().map(|&j| arena.distance(i, j)).sum())
        .collect()
}
