//! Call trees rebuilt from flamebearer levels.
//!
//! This module covers:
//! - Linking decoded levels into a tree (single and diff)
//! - Flattening a tree back into levels with a fresh name table
//! - Sibling alignment shared by the diff and subtract engines
//! - Per-function totals

pub mod builder;
pub mod flatten;
pub mod matching;
pub mod node;
pub mod table;

// Re-export main types and functions
pub use builder::{build_diff_tree, build_diff_tree_with, build_tree, build_tree_with};
pub use flatten::{diff_to_flamebearer, flatten, flatten_diff, to_flamebearer, NameTable};
pub use matching::{pair_children, pair_siblings_by, Pairing};
pub use node::{DiffNode, Node, Side};
pub use table::{diff_function_table, function_table, DiffFunctionRow, FunctionRow};
