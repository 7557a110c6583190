//! Reconstructed call tree nodes.

use crate::codec::Bar;
use serde::Serialize;

/// A node of a single-profile call tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub name: String,

    /// Absolute start position, in ticks
    pub offset: u64,

    /// Samples in this node and everything below it
    pub total: u64,

    /// Samples attributed to this node alone
    pub self_ticks: u64,

    /// Children in left-to-right order
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(name: impl Into<String>, bar: Bar) -> Self {
        Self {
            name: name.into(),
            offset: bar.offset,
            total: bar.total,
            self_ticks: bar.self_ticks,
            children: Vec::new(),
        }
    }

    pub fn bar(&self) -> Bar {
        Bar::new(self.offset, self.total, self.self_ticks)
    }

    pub fn children_total(&self) -> u64 {
        self.children.iter().map(|c| c.total).sum()
    }

    /// Look up a descendant by the names below this node.
    ///
    /// An empty path returns `self`. When siblings share a name the first
    /// one wins.
    pub fn find(&self, path: &[&str]) -> Option<&Node> {
        match path.split_first() {
            None => Some(self),
            Some((head, tail)) => self
                .children
                .iter()
                .find(|c| c.name == *head)
                .and_then(|c| c.find(tail)),
        }
    }

    /// Visit every node in pre-order together with its depth
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Node, usize)) {
        self.walk_at(0, f);
    }

    fn walk_at<'a>(&'a self, depth: usize, f: &mut impl FnMut(&'a Node, usize)) {
        f(self, depth);
        for child in &self.children {
            child.walk_at(depth + 1, f);
        }
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_, _| count += 1);
        count
    }

    /// Number of levels, the root alone being 1
    pub fn depth(&self) -> usize {
        let mut max = 0usize;
        self.walk(&mut |_, d| max = max.max(d + 1));
        max
    }

    pub fn max_self(&self) -> u64 {
        let mut max = 0u64;
        self.walk(&mut |n, _| max = max.max(n.self_ticks));
        max
    }
}

/// Which profile of a diff a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// A node of a diff tree.
///
/// A side is `None` when the node does not exist in that profile; it
/// reads as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffNode {
    pub name: String,
    pub left: Option<Bar>,
    pub right: Option<Bar>,
    pub children: Vec<DiffNode>,
}

impl DiffNode {
    pub fn side(&self, side: Side) -> Option<Bar> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn total_left(&self) -> u64 {
        self.left.map_or(0, |b| b.total)
    }

    pub fn self_left(&self) -> u64 {
        self.left.map_or(0, |b| b.self_ticks)
    }

    pub fn total_right(&self) -> u64 {
        self.right.map_or(0, |b| b.total)
    }

    pub fn self_right(&self) -> u64 {
        self.right.map_or(0, |b| b.self_ticks)
    }

    /// The single-profile tree seen from one side.
    ///
    /// Nodes absent on that side are dropped with their subtrees.
    pub fn project(&self, side: Side) -> Option<Node> {
        let bar = self.side(side)?;
        let mut node = Node::new(self.name.clone(), bar);
        node.children = self
            .children
            .iter()
            .filter_map(|c| c.project(side))
            .collect();
        Some(node)
    }

    pub fn find(&self, path: &[&str]) -> Option<&DiffNode> {
        match path.split_first() {
            None => Some(self),
            Some((head, tail)) => self
                .children
                .iter()
                .find(|c| c.name == *head)
                .and_then(|c| c.find(tail)),
        }
    }

    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a DiffNode, usize)) {
        self.walk_at(0, f);
    }

    fn walk_at<'a>(&'a self, depth: usize, f: &mut impl FnMut(&'a DiffNode, usize)) {
        f(self, depth);
        for child in &self.children {
            child.walk_at(depth + 1, f);
        }
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_, _| count += 1);
        count
    }

    /// Largest self value on either side
    pub fn max_self(&self) -> u64 {
        let mut max = 0u64;
        self.walk(&mut |n, _| max = max.max(n.self_left()).max(n.self_right()));
        max
    }
}
