use alloc::string::String;
use core::fmt;

/// Error types for the phylodist crate.
///
/// All errors are raised synchronously before any partial tree is
/// constructed; a failed build never yields a half-built tree.
#[derive(Debug, Clone, PartialEq)]
pub enum PhyloError {
    /// A build was requested over zero taxa.
    EmptyTaxonList,
    /// A caller-supplied matrix differs between `(row, col)` and `(col, row)`.
    AsymmetricDistance { row: usize, col: usize },
    /// A caller-supplied matrix contains a negative entry.
    NegativeDistance { row: usize, col: usize, value: f64 },
    /// A caller-supplied matrix has a nonzero diagonal entry.
    NonzeroDiagonal { index: usize, value: f64 },
    /// A caller-supplied matrix row has the wrong length.
    NotSquare {
        row: usize,
        expected: usize,
        actual: usize,
    },
    /// Taxon list length does not match matrix size.
    TaxaMatrixMismatch { taxa: usize, matrix: usize },
    /// Clustering method string not recognized.
    UnknownMethod(String),
    /// Deserialization failed.
    DeserializationError(String),
}

impl fmt::Display for PhyloError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTaxonList => {
                write!(f, "taxon list is empty; at least one taxon is required")
            }
            Self::AsymmetricDistance { row, col } => {
                write!(f, "distance matrix is asymmetric at ({}, {})", row, col)
            }
            Self::NegativeDistance { row, col, value } => {
                write!(f, "negative distance {} at ({}, {})", value, row, col)
            }
            Self::NonzeroDiagonal { index, value } => {
                write!(f, "nonzero diagonal entry {} at index {}", value, index)
            }
            Self::NotSquare {
                row,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "matrix row {} has length {} (expected {})",
                    row, actual, expected
                )
            }
            Self::TaxaMatrixMismatch { taxa, matrix } => {
                write!(f, "{} taxa do not match matrix of size {}", taxa, matrix)
            }
            Self::UnknownMethod(name) => {
                write!(f, "unknown clustering method '{}'", name)
            }
            Self::DeserializationError(msg) => {
                write!(f, "deserialization error: {}", msg)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PhyloError {}

pub type Result<T> = core::result::Result<T, PhyloError>;
