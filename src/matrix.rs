use alloc::vec::Vec;
use core::ops::Index;

use crate::errors::{PhyloError, Result};
use crate::taxon::{DistanceMetric, Taxon};

/// A square, symmetric table of pairwise distances indexed by taxon
/// position.
///
/// Invariants (enforced on construction): `d(i, j) == d(j, i)`,
/// `d(i, i) == 0`, all entries non-negative. The matrix is built once and
/// read-only during clustering.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMatrix {
    distances: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    /// Build an `n x n` matrix from an ordered taxon list and a distance
    /// metric.
    ///
    /// The metric is called exactly once per unordered pair and the result
    /// is mirrored symmetrically. The input taxa are never reordered; their
    /// positions carry through to the built tree.
    ///
    /// A single taxon yields a valid 1x1 matrix (which cannot be clustered
    /// but is not an error). Zero taxa fail with
    /// [`PhyloError::EmptyTaxonList`].
    pub fn from_metric(taxa: &[Taxon], metric: &impl DistanceMetric) -> Result<Self> {
        if taxa.is_empty() {
            return Err(PhyloError::EmptyTaxonList);
        }
        let n = taxa.len();
        let mut distances = alloc::vec![alloc::vec![0.0; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = metric.distance(&taxa[i], &taxa[j]);
                distances[i][j] = d;
                distances[j][i] = d;
            }
        }
        Ok(Self { distances })
    }

    /// Validate and wrap caller-supplied rows as a distance matrix.
    ///
    /// Rejects empty input, non-square shapes, negative entries, nonzero
    /// diagonal entries, and asymmetry. Symmetry is checked with exact
    /// equality: the caller is expected to mirror values, not recompute
    /// them per side.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        if rows.is_empty() {
            return Err(PhyloError::EmptyTaxonList);
        }
        let n = rows.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(PhyloError::NotSquare {
                    row: i,
                    expected: n,
                    actual: row.len(),
                });
            }
        }
        for i in 0..n {
            if rows[i][i] != 0.0 {
                return Err(PhyloError::NonzeroDiagonal {
                    index: i,
                    value: rows[i][i],
                });
            }
            for j in 0..n {
                if rows[i][j] < 0.0 {
                    return Err(PhyloError::NegativeDistance {
                        row: i,
                        col: j,
                        value: rows[i][j],
                    });
                }
            }
            for j in (i + 1)..n {
                if rows[i][j] != rows[j][i] {
                    return Err(PhyloError::AsymmetricDistance { row: i, col: j });
                }
            }
        }
        Ok(Self { distances: rows })
    }

    /// Number of taxa (rows) in the matrix.
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Always false: construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Distance between taxon positions `i` and `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.distances[i][j]
    }
}

impl Index<(usize, usize)> for DistanceMatrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        &self.distances[i][j]
    }
}
