//! JSON record serialization for built trees (feature `serde`).
//!
//! Records are plain `serde_json::Value` maps so they can cross process
//! or language boundaries without this crate's types on the other side.

use alloc::string::String;

use serde_json::{json, Value};

use crate::cluster::TreeResult;
use crate::errors::{PhyloError, Result};
use crate::stats::TreeStatistics;
use crate::tree::{LeafAnnotation, Tree, TreeNode};

/// Serialize a tree to a JSON record.
///
/// Nodes nest recursively with a `"kind"` tag of `"leaf"` or
/// `"internal"`.
pub fn tree_to_records(tree: &Tree) -> Value {
    json!({
        "leaf_count": tree.leaf_count(),
        "root": node_to_value(&tree.root),
    })
}

/// Serialize a full build result (tree, Newick string, statistics).
pub fn result_to_records(result: &TreeResult) -> Value {
    json!({
        "tree": tree_to_records(&result.tree),
        "newick": result.newick,
        "stats": {
            "leaf_count": result.stats.leaf_count,
            "total_branch_length": result.stats.total_branch_length,
            "max_depth": result.stats.max_depth,
            "average_branch_length": result.stats.average_branch_length,
        },
    })
}

fn node_to_value(node: &TreeNode) -> Value {
    match node {
        TreeNode::Leaf { taxon, annotation } => json!({
            "kind": "leaf",
            "taxon": taxon,
            "annotation": annotation.as_ref().map(|ann| json!({
                "id": ann.id,
                "symbol": ann.symbol,
                "species": ann.species,
            })),
        }),
        TreeNode::Internal {
            left,
            right,
            height,
            support,
        } => json!({
            "kind": "internal",
            "height": height,
            "support": support,
            "left": node_to_value(left),
            "right": node_to_value(right),
        }),
    }
}

/// Deserialize a tree from a record (as produced by [`tree_to_records`]).
pub fn tree_from_records(record: &Value) -> Result<Tree> {
    let root = node_from_value(&record["root"])?;
    Ok(Tree::new(root))
}

fn node_from_value(value: &Value) -> Result<TreeNode> {
    let kind = value["kind"]
        .as_str()
        .ok_or_else(|| PhyloError::DeserializationError("missing or invalid kind".into()))?;

    match kind {
        "leaf" => {
            let taxon = value["taxon"].as_u64().ok_or_else(|| {
                PhyloError::DeserializationError("missing or invalid taxon index".into())
            })? as usize;
            let annotation = match &value["annotation"] {
                Value::Null => None,
                ann => Some(LeafAnnotation {
                    id: string_field(ann, "id")?,
                    symbol: string_field(ann, "symbol")?,
                    species: string_field(ann, "species")?,
                }),
            };
            Ok(TreeNode::Leaf { taxon, annotation })
        }
        "internal" => {
            let height = value["height"].as_f64().ok_or_else(|| {
                PhyloError::DeserializationError("missing or invalid height".into())
            })?;
            let support = value["support"].as_f64();
            let mut node =
                TreeNode::internal(node_from_value(&value["left"])?, node_from_value(&value["right"])?, height);
            if let TreeNode::Internal { support: s, .. } = &mut node {
                *s = support;
            }
            Ok(node)
        }
        other => Err(PhyloError::DeserializationError(alloc::format!(
            "unknown node kind '{}'",
            other
        ))),
    }
}

fn string_field(value: &Value, field: &str) -> Result<String> {
    value[field]
        .as_str()
        .map(String::from)
        .ok_or_else(|| {
            PhyloError::DeserializationError(alloc::format!(
                "missing or invalid {}",
                field
            ))
        })
}
