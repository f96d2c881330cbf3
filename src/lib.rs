//! Distance-based phylogenetic tree construction.
//!
//! Builds evolutionary trees over a set of orthologous genes across
//! species: a pluggable distance metric fills a symmetric matrix, a
//! clustering algorithm (neighbor-joining or UPGMA) agglomerates it into
//! a binary tree, and the result can be annotated, rendered to Newick
//! text, summarized, and compared against other trees via the
//! Robinson-Foulds bipartition distance.
//!
//! Every stage is a pure function over immutable inputs: no I/O, no
//! shared state, and fully deterministic output given identical input
//! (tie-breaks between equal minima always pick the lowest index pair).
//!
//! ```
//! use phylodist::{build_tree, DivergenceTimeMetric, LinkageMethod, Taxon};
//!
//! let taxa = [
//!     Taxon::new("ENSG0000141510", "TP53", "Homo sapiens"),
//!     Taxon::new("ENSMUSG0000059552", "Trp53", "Mus musculus"),
//!     Taxon::new("ENSDARG0000035559", "tp53", "Danio rerio"),
//! ];
//! let result = build_tree(&taxa, &DivergenceTimeMetric::new(), LinkageMethod::Upgma)?;
//! assert_eq!(result.tree.leaf_count(), 3);
//! assert!(result.newick.ends_with(';'));
//! # Ok::<(), phylodist::PhyloError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod annotate;
pub mod cluster;
pub mod compare;
pub mod errors;
pub mod matrix;
pub mod newick;
pub mod stats;
pub mod taxon;
pub mod tree;

#[cfg(feature = "serde")]
pub mod serialization;

pub use annotate::{annotate, annotate_support};
pub use cluster::{build_tree, build_tree_from_matrix, LinkageMethod, TreeResult};
pub use compare::{bipartitions, compare_trees, TreeComparison};
pub use errors::{PhyloError, Result};
pub use matrix::DistanceMatrix;
pub use newick::to_newick;
pub use stats::TreeStatistics;
pub use taxon::{DistanceMetric, DivergenceTimeMetric, Taxon};
pub use tree::{LeafAnnotation, Tree, TreeNode};
