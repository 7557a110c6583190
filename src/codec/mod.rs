//! Level codec: wire levels to absolute-offset tuples and back.
//!
//! Nothing outside this module deals with delta offsets; the tree
//! builder and the transform engines only see [`DecodedLevels`].

pub mod levels;

pub use levels::{decode, encode, Levels};

use serde::Serialize;

/// One side of a node: where it starts, how wide it is and how much of
/// that width is its own
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    pub offset: u64,
    pub total: u64,
    pub self_ticks: u64,
}

impl Bar {
    pub fn new(offset: u64, total: u64, self_ticks: u64) -> Self {
        Self {
            offset,
            total,
            self_ticks,
        }
    }

    /// First position past this bar
    pub fn end(&self) -> u64 {
        self.offset + self.total
    }

    /// Whether `child` lies inside this bar.
    ///
    /// Zero-width children may sit on the closing edge.
    pub fn contains(&self, child: &Bar) -> bool {
        child.offset >= self.offset && child.end() <= self.end()
    }
}

/// A decoded "single" tuple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleTuple {
    pub bar: Bar,
    pub name: usize,
}

/// A decoded "double" tuple; each side has its own offset space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoubleTuple {
    pub left: Bar,
    pub right: Bar,
    pub name: usize,
}

/// Absolute-offset tuples, one vector per depth
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedLevels {
    Single(Vec<Vec<SingleTuple>>),
    Double(Vec<Vec<DoubleTuple>>),
}

impl DecodedLevels {
    pub fn depth(&self) -> usize {
        match self {
            DecodedLevels::Single(l) => l.len(),
            DecodedLevels::Double(l) => l.len(),
        }
    }

    pub fn node_count(&self) -> usize {
        match self {
            DecodedLevels::Single(l) => l.iter().map(Vec::len).sum(),
            DecodedLevels::Double(l) => l.iter().map(Vec::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }
}
