//! Residual computation: a total aggregate minus a selected part of it.

use crate::parser::schema::{Format, Metadata, Profile};
use crate::parser::validate::validate_as;
use crate::tree::builder::build_tree_with;
use crate::tree::flatten::to_flamebearer;
use crate::tree::matching::{pair_children, Pairing};
use crate::tree::node::Node;
use crate::utils::config::{EngineConfig, SUPPORTED_VERSION};
use crate::utils::diagnostics::{Diagnostic, Diagnostics, Outcome};
use crate::utils::error::FlamebearerError;
use log::{debug, info};

/// Separator used when reporting a call path
const PATH_SEPARATOR: &str = ";";

/// Subtract `selection` from `total`, node by node
///
/// Nodes are paired the same way the diff engine pairs them. Paired
/// nodes keep `total - selection` for both total and self; nodes only in
/// `total` pass through. The result is laid out with children packed
/// from their parent's offset.
///
/// A residual that would go negative is clamped to zero and reported as
/// a `DataInconsistency`, and so is a selection path `total` lacks. A
/// node left smaller than its self plus its children's totals is raised
/// to that sum and reported the same way, so the result always encodes.
pub fn subtract_trees(total: &Node, selection: &Node) -> Outcome<Node> {
    subtract_trees_with(total, selection, &EngineConfig::default())
}

pub fn subtract_trees_with(total: &Node, selection: &Node, config: &EngineConfig) -> Outcome<Node> {
    let mut diagnostics = Diagnostics::with_limit(config.max_diagnostics);
    let mut path = vec![total.name.as_str()];
    let tree = residual(total, Some(selection), 0, &mut path, &mut diagnostics);
    Outcome::new(tree, diagnostics)
}

fn residual<'a>(
    total: &'a Node,
    selection: Option<&'a Node>,
    offset: u64,
    path: &mut Vec<&'a str>,
    diagnostics: &mut Diagnostics,
) -> Node {
    let (sel_total, sel_self) = selection.map_or((0, 0), |s| (s.total, s.self_ticks));
    let mut node = Node {
        name: total.name.clone(),
        offset,
        total: clamped_sub(total.total, sel_total, "total", path, diagnostics),
        self_ticks: clamped_sub(total.self_ticks, sel_self, "self", path, diagnostics),
        children: Vec::new(),
    };

    let sel_children: &[Node] = selection.map(|s| s.children.as_slice()).unwrap_or(&[]);
    let mut cursor = offset;
    for pairing in pair_children(&total.children, sel_children) {
        let (child, sel) = match pairing {
            Pairing::Both(i, j) => (&total.children[i], Some(&sel_children[j])),
            Pairing::LeftOnly(i) => (&total.children[i], None),
            Pairing::RightOnly(j) => {
                path.push(sel_children[j].name.as_str());
                diagnostics.push(Diagnostic::DataInconsistency {
                    path: path.join(PATH_SEPARATOR),
                    reason: "selected path does not exist in the total profile".to_string(),
                });
                path.pop();
                continue;
            }
        };

        path.push(child.name.as_str());
        let child = residual(child, sel, cursor, path, diagnostics);
        path.pop();

        cursor += child.total;
        node.children.push(child);
    }

    // Children clamped less than their parent did; widen the parent so
    // they still fit inside it.
    let needed = node.self_ticks + (cursor - offset);
    if node.total < needed {
        diagnostics.push(Diagnostic::DataInconsistency {
            path: path.join(PATH_SEPARATOR),
            reason: format!(
                "residual total {} is below self plus children ({}), raised to fit",
                node.total, needed
            ),
        });
        node.total = needed;
    }

    node
}

fn clamped_sub(value: u64, minus: u64, field: &str, path: &[&str], diagnostics: &mut Diagnostics) -> u64 {
    match value.checked_sub(minus) {
        Some(v) => v,
        None => {
            diagnostics.push(Diagnostic::DataInconsistency {
                path: path.join(PATH_SEPARATOR),
                reason: format!(
                    "negative {} residual ({} - {}), clamped to 0",
                    field, value, minus
                ),
            });
            0
        }
    }
}

/// Subtract a selection profile from a total profile
///
/// # Arguments
/// * `total` - The full aggregate
/// * `selection` - A sub-aggregate of `total`
///
/// # Returns
/// A single profile holding what is left of `total`, plus diagnostics
/// from the input trees and from clamping
///
/// # Errors
/// * `FormatMismatch` - an input is not a "single" profile
/// * Any validation or decoding error of either input
pub fn subtract(total: &Profile, selection: &Profile) -> Result<Outcome<Profile>, FlamebearerError> {
    subtract_with(total, selection, &EngineConfig::default())
}

pub fn subtract_with(
    total: &Profile,
    selection: &Profile,
    config: &EngineConfig,
) -> Result<Outcome<Profile>, FlamebearerError> {
    validate_as(total, Format::Single)?;
    validate_as(selection, Format::Single)?;

    let mut diagnostics = Diagnostics::with_limit(config.max_diagnostics);
    let total_tree = build_tree_with(&total.flamebearer, config)?;
    let selection_tree = build_tree_with(&selection.flamebearer, config)?;
    diagnostics.extend(total_tree.diagnostics);
    diagnostics.extend(selection_tree.diagnostics);

    let outcome = subtract_trees_with(&total_tree.value, &selection_tree.value, config);
    diagnostics.extend(outcome.diagnostics);
    let tree = outcome.value;
    debug!("Residual tree has {} nodes", tree.node_count());

    let (total_ticks, selected_ticks) = (total.flamebearer.num_ticks, selection.flamebearer.num_ticks);
    let num_ticks = total_ticks.saturating_sub(selected_ticks);
    if selected_ticks > total_ticks {
        diagnostics.push(Diagnostic::DataInconsistency {
            path: tree.name.clone(),
            reason: format!(
                "selection has more ticks than the total ({} > {})",
                selected_ticks, total_ticks
            ),
        });
    }

    let flamebearer = to_flamebearer(&tree, num_ticks)?;
    info!(
        "Subtracted {} of {} ticks, {} left",
        selected_ticks, total_ticks, num_ticks
    );

    let profile = Profile {
        version: SUPPORTED_VERSION,
        flamebearer,
        metadata: Metadata {
            format: Format::Single.as_str().to_string(),
            ..total.metadata.clone()
        },
        left_ticks: None,
        right_ticks: None,
    };
    Ok(Outcome::new(profile, diagnostics))
}
