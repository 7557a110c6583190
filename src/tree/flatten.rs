//! Turn reconstructed trees back into flamebearers.
//!
//! Nodes are emitted depth by depth in pre-order, which is the
//! left-to-right order of every row. Names are interned into a fresh
//! table; the root is always index 0.

use crate::codec::levels::{encode_double, encode_single};
use crate::codec::{Bar, DoubleTuple, SingleTuple};
use crate::parser::schema::{Flamebearer, Format};
use crate::utils::error::FlamebearerError;
use std::collections::HashMap;

use super::node::{DiffNode, Node};

/// Name table under construction
#[derive(Debug, Default)]
pub struct NameTable {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `name`, adding it on first sight
    pub fn intern(&mut self, name: &str) -> usize {
        if let Some(&i) = self.index.get(name) {
            return i;
        }
        let i = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), i);
        i
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn into_names(self) -> Vec<String> {
        self.names
    }
}

/// Absolute single-format rows plus the name table they refer to
pub fn flatten(root: &Node) -> (Vec<String>, Vec<Vec<SingleTuple>>) {
    let mut names = NameTable::new();
    let mut levels: Vec<Vec<SingleTuple>> = Vec::new();
    root.walk(&mut |node, depth| {
        if levels.len() <= depth {
            levels.push(Vec::new());
        }
        let name = names.intern(&node.name);
        levels[depth].push(SingleTuple {
            bar: node.bar(),
            name,
        });
    });
    (names.into_names(), levels)
}

/// Absolute double-format rows plus the name table they refer to.
///
/// An absent side is written as a zero-width bar at the running end of
/// its row, clamped into its parent, so the result decodes back to the
/// same parent links.
pub fn flatten_diff(root: &DiffNode) -> (Vec<String>, Vec<Vec<DoubleTuple>>) {
    let mut state = DiffFlattener {
        names: NameTable::new(),
        levels: Vec::new(),
        left_ends: Vec::new(),
        right_ends: Vec::new(),
    };
    state.visit(root, 0, 0, 0);
    (state.names.into_names(), state.levels)
}

struct DiffFlattener {
    names: NameTable,
    levels: Vec<Vec<DoubleTuple>>,
    left_ends: Vec<u64>,
    right_ends: Vec<u64>,
}

impl DiffFlattener {
    fn visit(&mut self, node: &DiffNode, depth: usize, left_floor: u64, right_floor: u64) {
        if self.levels.len() <= depth {
            self.levels.push(Vec::new());
            self.left_ends.push(0);
            self.right_ends.push(0);
        }

        let left = place(node.left, self.left_ends[depth].max(left_floor));
        let right = place(node.right, self.right_ends[depth].max(right_floor));
        self.left_ends[depth] = left.end();
        self.right_ends[depth] = right.end();

        let name = self.names.intern(&node.name);
        self.levels[depth].push(DoubleTuple { left, right, name });

        for child in &node.children {
            self.visit(child, depth + 1, left.offset, right.offset);
        }
    }
}

fn place(side: Option<Bar>, fallback: u64) -> Bar {
    side.unwrap_or(Bar::new(fallback, 0, 0))
}

/// Encode a single-profile tree
pub fn to_flamebearer(root: &Node, num_ticks: u64) -> Result<Flamebearer, FlamebearerError> {
    let (names, levels) = flatten(root);
    Ok(Flamebearer {
        names,
        levels: encode_single(&levels)?,
        num_ticks,
        max_self: root.max_self(),
        format: Some(Format::Single.as_str().to_string()),
    })
}

/// Encode a diff tree
pub fn diff_to_flamebearer(root: &DiffNode, num_ticks: u64) -> Result<Flamebearer, FlamebearerError> {
    let (names, levels) = flatten_diff(root);
    Ok(Flamebearer {
        names,
        levels: encode_double(&levels)?,
        num_ticks,
        max_self: root.max_self(),
        format: Some(Format::Double.as_str().to_string()),
    })
}
