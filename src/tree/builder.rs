//! Rebuild a navigable call tree from decoded levels.
//!
//! Depth 0 holds the root. Every tuple at depth d+1 belongs to the first
//! tuple at depth d (scanning left to right) whose interval contains it.
//! Both rows are offset-sorted, so one forward-only pointer per row is
//! enough and linking the whole tree is O(n).

use crate::codec::levels::{decode_double, decode_single};
use crate::codec::{Bar, DoubleTuple, SingleTuple};
use crate::parser::schema::Flamebearer;
use crate::utils::config::{EngineConfig, ROOT_NAME};
use crate::utils::diagnostics::{Diagnostic, Diagnostics, Outcome};
use crate::utils::error::FlamebearerError;
use log::debug;

use super::node::{DiffNode, Node};

/// Build the call tree of a "single" flamebearer
///
/// # Errors
/// * `MalformedEncoding` - bad tuple width, negative value, missing or
///   duplicated root, or a node that fits under no parent
/// * `UnknownName` - a name index outside the name table
///
/// Self/total mismatches are not errors; they come back as diagnostics.
pub fn build_tree(fb: &Flamebearer) -> Result<Outcome<Node>, FlamebearerError> {
    build_tree_with(fb, &EngineConfig::default())
}

pub fn build_tree_with(
    fb: &Flamebearer,
    config: &EngineConfig,
) -> Result<Outcome<Node>, FlamebearerError> {
    let levels = decode_single(&fb.levels)?;
    let mut diagnostics = Diagnostics::with_limit(config.max_diagnostics);

    if levels.iter().all(Vec::is_empty) {
        debug!("Empty flamebearer, returning a bare root");
        let root = Node::new(root_name(&fb.names), Bar::default());
        if config.check_invariants {
            check_totals(root.total, root.max_self(), fb, &mut diagnostics);
        }
        return Ok(Outcome::new(root, diagnostics));
    }

    let parents = assign_parents(&levels, |p: &SingleTuple, c: &SingleTuple| {
        p.bar.contains(&c.bar)
    })?;

    let root = assemble(&levels, &parents, |depth, t: &SingleTuple| {
        Ok(Node::new(resolve_name(&fb.names, depth, t.name)?, t.bar))
    })?;

    if config.check_invariants {
        check_node(&root, 0, &mut diagnostics);
        check_totals(root.total, root.max_self(), fb, &mut diagnostics);
    }

    debug!(
        "Built tree with {} nodes, depth {}",
        root.node_count(),
        root.depth()
    );
    Ok(Outcome::new(root, diagnostics))
}

/// Build the paired tree of a "double" flamebearer
///
/// A parent contains a child only when it does so on both sides. A side
/// with zero total is read as absent, except on the root, so a node with
/// no samples on either side does not survive a round trip; the diff
/// engine never emits one.
pub fn build_diff_tree(fb: &Flamebearer) -> Result<Outcome<DiffNode>, FlamebearerError> {
    build_diff_tree_with(fb, &EngineConfig::default())
}

pub fn build_diff_tree_with(
    fb: &Flamebearer,
    config: &EngineConfig,
) -> Result<Outcome<DiffNode>, FlamebearerError> {
    let levels = decode_double(&fb.levels)?;
    let mut diagnostics = Diagnostics::with_limit(config.max_diagnostics);

    if levels.iter().all(Vec::is_empty) {
        let root = DiffNode {
            name: root_name(&fb.names),
            left: Some(Bar::default()),
            right: Some(Bar::default()),
            children: Vec::new(),
        };
        if config.check_invariants {
            check_totals(0, 0, fb, &mut diagnostics);
        }
        return Ok(Outcome::new(root, diagnostics));
    }

    let parents = assign_parents(&levels, |p: &DoubleTuple, c: &DoubleTuple| {
        p.left.contains(&c.left) && p.right.contains(&c.right)
    })?;

    let root = assemble(&levels, &parents, |depth, t: &DoubleTuple| {
        let present = |bar: Bar| (depth == 0 || bar.total > 0).then_some(bar);
        Ok(DiffNode {
            name: resolve_name(&fb.names, depth, t.name)?,
            left: present(t.left),
            right: present(t.right),
            children: Vec::new(),
        })
    })?;

    if config.check_invariants {
        check_diff_node(&root, 0, &mut diagnostics);
        let root_total = root.total_left().max(root.total_right());
        check_totals(root_total, root.max_self(), fb, &mut diagnostics);
    }

    Ok(Outcome::new(root, diagnostics))
}

/// For every depth past the root, the index of each tuple's parent in
/// the row above. `parents[0]` is empty.
fn assign_parents<T>(
    levels: &[Vec<T>],
    fits: impl Fn(&T, &T) -> bool,
) -> Result<Vec<Vec<usize>>, FlamebearerError> {
    if levels[0].len() != 1 {
        return Err(FlamebearerError::malformed(
            0,
            format!("expected exactly one root, found {}", levels[0].len()),
        ));
    }

    let mut parents = Vec::with_capacity(levels.len());
    parents.push(Vec::new());

    for depth in 1..levels.len() {
        let above = &levels[depth - 1];
        let mut p = 0;
        let mut assigned = Vec::with_capacity(levels[depth].len());

        for (i, child) in levels[depth].iter().enumerate() {
            while p < above.len() && !fits(&above[p], child) {
                p += 1;
            }
            if p == above.len() {
                return Err(FlamebearerError::malformed(
                    depth,
                    format!("node {} has no enclosing parent", i),
                ));
            }
            assigned.push(p);
        }
        parents.push(assigned);
    }

    Ok(parents)
}

/// Materialise nodes bottom-up, moving each row into its parents
fn assemble<T, N>(
    levels: &[Vec<T>],
    parents: &[Vec<usize>],
    make: impl Fn(usize, &T) -> Result<N, FlamebearerError>,
) -> Result<N, FlamebearerError>
where
    N: HasChildren,
{
    let mut below: Vec<N> = Vec::new();

    for depth in (0..levels.len()).rev() {
        let mut current = levels[depth]
            .iter()
            .map(|t| make(depth, t))
            .collect::<Result<Vec<N>, _>>()?;

        if depth + 1 < levels.len() {
            for (child, &p) in below.into_iter().zip(&parents[depth + 1]) {
                current[p].children_mut().push(child);
            }
        }
        below = current;
    }

    below
        .pop()
        .ok_or_else(|| FlamebearerError::malformed(0, "missing root"))
}

trait HasChildren: Sized {
    fn children_mut(&mut self) -> &mut Vec<Self>;
}

impl HasChildren for Node {
    fn children_mut(&mut self) -> &mut Vec<Self> {
        &mut self.children
    }
}

impl HasChildren for DiffNode {
    fn children_mut(&mut self) -> &mut Vec<Self> {
        &mut self.children
    }
}

fn resolve_name(names: &[String], depth: usize, index: usize) -> Result<String, FlamebearerError> {
    names
        .get(index)
        .cloned()
        .ok_or(FlamebearerError::UnknownName {
            depth,
            index: index as i64,
            len: names.len(),
        })
}

fn root_name(names: &[String]) -> String {
    names
        .first()
        .cloned()
        .unwrap_or_else(|| ROOT_NAME.to_string())
}

fn check_node(node: &Node, depth: usize, diagnostics: &mut Diagnostics) {
    check_self(
        &node.name,
        depth,
        node.total,
        node.self_ticks,
        node.children_total(),
        diagnostics,
    );
    for child in &node.children {
        check_node(child, depth + 1, diagnostics);
    }
}

fn check_diff_node(node: &DiffNode, depth: usize, diagnostics: &mut Diagnostics) {
    let left_children: u64 = node.children.iter().map(DiffNode::total_left).sum();
    let right_children: u64 = node.children.iter().map(DiffNode::total_right).sum();
    check_self(
        &node.name,
        depth,
        node.total_left(),
        node.self_left(),
        left_children,
        diagnostics,
    );
    check_self(
        &node.name,
        depth,
        node.total_right(),
        node.self_right(),
        right_children,
        diagnostics,
    );
    for child in &node.children {
        check_diff_node(child, depth + 1, diagnostics);
    }
}

fn check_self(
    name: &str,
    depth: usize,
    total: u64,
    self_ticks: u64,
    children_total: u64,
    diagnostics: &mut Diagnostics,
) {
    if self_ticks.checked_add(children_total) != Some(total) {
        diagnostics.push(Diagnostic::InvariantViolation {
            name: name.to_string(),
            depth,
            total,
            self_ticks,
            children_total,
        });
    }
}

fn check_totals(root_total: u64, max_self: u64, fb: &Flamebearer, diagnostics: &mut Diagnostics) {
    if root_total != fb.num_ticks {
        diagnostics.push(Diagnostic::TickMismatch {
            root_total,
            num_ticks: fb.num_ticks,
        });
    }
    if max_self != fb.max_self {
        diagnostics.push(Diagnostic::MaxSelfMismatch {
            declared: fb.max_self,
            computed: max_self,
        });
    }
}
