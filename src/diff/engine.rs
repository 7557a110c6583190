//! Core diff engine implementation.
//! Aligns two single-profile trees into one paired tree and encodes it
//! as a "double" profile.

use crate::codec::Bar;
use crate::parser::schema::{Format, Metadata, Profile};
use crate::parser::validate::validate_as;
use crate::tree::builder::build_tree_with;
use crate::tree::flatten::diff_to_flamebearer;
use crate::tree::matching::{pair_siblings_by, Pairing};
use crate::tree::node::{DiffNode, Node};
use crate::utils::config::{EngineConfig, SUPPORTED_VERSION};
use crate::utils::diagnostics::{Diagnostics, Outcome};
use crate::utils::error::FlamebearerError;
use log::{debug, info};

/// Pair two trees node by node
///
/// Both roots are matched whatever their names. Below them children are
/// matched by name and ordinal among same-named siblings; a node missing
/// on one side gets `None` there. Children with zero total carry no
/// samples and are left out, so every non-root node has at least one
/// non-empty side.
///
/// Each side keeps its input offsets as long as the merged order visits
/// that side's children in their input order. A side whose order crosses
/// is laid out again with children packed from their parent's offset.
pub fn diff_trees(left: &Node, right: &Node) -> DiffNode {
    merge(Some(left), Some(right), left.offset, right.offset)
}

fn merge(left: Option<&Node>, right: Option<&Node>, left_offset: u64, right_offset: u64) -> DiffNode {
    let name = left
        .or(right)
        .map(|n| n.name.clone())
        .unwrap_or_default();
    let left_children = live_children(left);
    let right_children = live_children(right);

    let pairs: Vec<(Option<&Node>, Option<&Node>)> =
        pair_siblings_by(&left_children, &right_children, |n| n.name.as_str())
            .into_iter()
            .map(|pairing| match pairing {
                Pairing::Both(i, j) => (Some(left_children[i]), Some(right_children[j])),
                Pairing::LeftOnly(i) => (Some(left_children[i]), None),
                Pairing::RightOnly(j) => (None, Some(right_children[j])),
            })
            .collect();

    let mut left_layout = Layout::new(left, left_offset, pairs.iter().filter_map(|p| p.0));
    let mut right_layout = Layout::new(right, right_offset, pairs.iter().filter_map(|p| p.1));

    let mut node = DiffNode {
        name,
        left: left.map(|n| Bar::new(left_offset, n.total, n.self_ticks)),
        right: right.map(|n| Bar::new(right_offset, n.total, n.self_ticks)),
        children: Vec::with_capacity(pairs.len()),
    };
    for (l, r) in pairs {
        let (lo, ro) = (left_layout.place(l), right_layout.place(r));
        node.children.push(merge(l, r, lo, ro));
    }

    node
}

fn live_children(node: Option<&Node>) -> Vec<&Node> {
    node.map(|n| n.children.iter().filter(|c| c.total > 0).collect())
        .unwrap_or_default()
}

/// Where the children of one side of a merged node go
struct Layout {
    /// Offset of the parent in its input tree
    source: u64,
    /// Offset the parent was placed at
    target: u64,
    /// Running position when the side has to be packed
    cursor: Option<u64>,
}

impl Layout {
    fn new<'a>(parent: Option<&Node>, target: u64, children: impl Iterator<Item = &'a Node>) -> Self {
        let keeps_input = parent.map_or(true, |p| in_input_order(p, children));
        Self {
            source: parent.map_or(target, |p| p.offset),
            target,
            cursor: (!keeps_input).then_some(target),
        }
    }

    fn place(&mut self, child: Option<&Node>) -> u64 {
        let Some(child) = child else {
            return self.target;
        };
        match self.cursor.as_mut() {
            Some(cursor) => {
                let at = *cursor;
                *cursor += child.total;
                at
            }
            None => self.target + (child.offset - self.source),
        }
    }
}

/// Whether `children`, visited in merged order, sit side by side inside
/// `parent` without overlapping
fn in_input_order<'a>(parent: &Node, children: impl Iterator<Item = &'a Node>) -> bool {
    let mut end = parent.offset;
    for child in children {
        if child.offset < end || child.bar().end() > parent.bar().end() {
            return false;
        }
        end = child.bar().end();
    }
    true
}

/// Diff two single profiles into a "double" profile
///
/// # Arguments
/// * `left` - Base profile
/// * `right` - Profile compared against the base
///
/// # Returns
/// The diff profile with `leftTicks` / `rightTicks` set, plus any
/// diagnostics found while rebuilding the input trees
///
/// # Errors
/// * `FormatMismatch` - an input is not a "single" profile
/// * Any validation or decoding error of either input
///
/// Unit and sample rate compatibility is the caller's job, see
/// [`check_compatibility`](super::check_compatibility).
pub fn diff_profiles(left: &Profile, right: &Profile) -> Result<Outcome<Profile>, FlamebearerError> {
    diff_profiles_with(left, right, &EngineConfig::default())
}

pub fn diff_profiles_with(
    left: &Profile,
    right: &Profile,
    config: &EngineConfig,
) -> Result<Outcome<Profile>, FlamebearerError> {
    validate_as(left, Format::Single)?;
    validate_as(right, Format::Single)?;

    let mut diagnostics = Diagnostics::with_limit(config.max_diagnostics);
    let left_tree = build_tree_with(&left.flamebearer, config)?;
    let right_tree = build_tree_with(&right.flamebearer, config)?;
    diagnostics.extend(left_tree.diagnostics);
    diagnostics.extend(right_tree.diagnostics);

    let tree = diff_trees(&left_tree.value, &right_tree.value);
    debug!("Diff tree has {} nodes", tree.node_count());

    let left_ticks = left.flamebearer.num_ticks;
    let right_ticks = right.flamebearer.num_ticks;
    let flamebearer = diff_to_flamebearer(&tree, left_ticks.max(right_ticks))?;

    info!(
        "Diffed profiles: {} left ticks, {} right ticks, {} names",
        left_ticks,
        right_ticks,
        flamebearer.names.len()
    );

    let profile = Profile {
        version: SUPPORTED_VERSION,
        flamebearer,
        metadata: diff_metadata(left, right),
        left_ticks: Some(left_ticks),
        right_ticks: Some(right_ticks),
    };
    Ok(Outcome::new(profile, diagnostics))
}

/// Metadata of whichever input has samples, left first
fn diff_metadata(left: &Profile, right: &Profile) -> Metadata {
    let source = if left.is_empty() { right } else { left };
    Metadata {
        format: Format::Double.as_str().to_string(),
        ..source.metadata.clone()
    }
}
