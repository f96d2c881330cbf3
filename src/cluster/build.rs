use alloc::string::String;
use core::str::FromStr;

use super::neighbor_joining::neighbor_joining;
use super::upgma::upgma;
use crate::annotate::annotate;
use crate::errors::{PhyloError, Result};
use crate::matrix::DistanceMatrix;
use crate::newick::to_newick;
use crate::stats::TreeStatistics;
use crate::taxon::{DistanceMetric, Taxon};
use crate::tree::{Tree, TreeNode};

/// Clustering algorithm to use for tree construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkageMethod {
    /// Neighbor-joining (default): additive-model agglomeration via the
    /// Q-matrix criterion.
    #[default]
    NeighborJoining,
    /// UPGMA: size-weighted average linkage producing ultrametric merge
    /// heights.
    Upgma,
}

impl LinkageMethod {
    /// Stable identifier used in serialized records and method strings.
    pub fn method_identifier(&self) -> &'static str {
        match self {
            Self::NeighborJoining => "neighbor_joining",
            Self::Upgma => "upgma",
        }
    }
}

impl FromStr for LinkageMethod {
    type Err = PhyloError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "neighbor_joining" | "nj" => Ok(Self::NeighborJoining),
            "upgma" => Ok(Self::Upgma),
            other => Err(PhyloError::UnknownMethod(String::from(other))),
        }
    }
}

/// Bundle returned by [`build_tree`]: the annotated tree, its Newick
/// rendering, and its summary statistics.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeResult {
    pub tree: Tree,
    pub newick: String,
    pub stats: TreeStatistics,
}

/// Build an annotated phylogenetic tree from an ordered taxon list and a
/// distance metric.
///
/// The metric is evaluated once per unordered pair to form the distance
/// matrix; construction is then fully deterministic given identical
/// inputs (the tie-break rule fixes every choice between equal minima).
///
/// # Errors
/// [`PhyloError::EmptyTaxonList`] for zero taxa. One and two taxa are
/// boundary cases, not errors: a single taxon yields a lone leaf, two
/// taxa yield one root joining both leaves at half their distance.
pub fn build_tree(
    taxa: &[Taxon],
    metric: &impl DistanceMetric,
    method: LinkageMethod,
) -> Result<TreeResult> {
    let matrix = DistanceMatrix::from_metric(taxa, metric)?;
    build_tree_from_matrix(taxa, &matrix, method)
}

/// Build an annotated tree from a precomputed (already validated)
/// distance matrix over the same taxon order.
///
/// # Errors
/// [`PhyloError::EmptyTaxonList`] for zero taxa,
/// [`PhyloError::TaxaMatrixMismatch`] when the taxon list and matrix
/// disagree in size.
pub fn build_tree_from_matrix(
    taxa: &[Taxon],
    matrix: &DistanceMatrix,
    method: LinkageMethod,
) -> Result<TreeResult> {
    if taxa.is_empty() {
        return Err(PhyloError::EmptyTaxonList);
    }
    if taxa.len() != matrix.len() {
        return Err(PhyloError::TaxaMatrixMismatch {
            taxa: taxa.len(),
            matrix: matrix.len(),
        });
    }

    let root = match taxa.len() {
        // Trivial sizes bypass the iterative algorithms entirely.
        1 => TreeNode::leaf(0),
        2 => TreeNode::internal(
            TreeNode::leaf(0),
            TreeNode::leaf(1),
            matrix.get(0, 1) / 2.0,
        ),
        _ => match method {
            LinkageMethod::NeighborJoining => neighbor_joining(matrix),
            LinkageMethod::Upgma => upgma(matrix),
        },
    };

    let mut tree = Tree::new(root);
    annotate(&mut tree, taxa);
    let newick = to_newick(&tree);
    let stats = TreeStatistics::from_tree(&tree);
    Ok(TreeResult {
        tree,
        newick,
        stats,
    })
}
