pub mod build;

mod arena;
mod neighbor_joining;
mod upgma;

pub use build::{build_tree, build_tree_from_matrix, LinkageMethod, TreeResult};
