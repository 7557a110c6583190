//! Per-function totals, the tabular view shown next to a flame graph.
//!
//! Rows are keyed by name and listed in the order names are first met
//! scanning depth by depth, left to right. A recursive function counts
//! its total once per frame, same as the graph does.

use super::node::{DiffNode, Node};
use crate::diff::normalizer::{diff_percent, share_percent};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRow {
    pub name: String,
    pub self_ticks: u64,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffFunctionRow {
    pub name: String,
    pub self_left: u64,
    pub self_right: u64,
    pub total_left: u64,
    pub total_right: u64,

    /// Right minus left, after scaling left to the right tick count
    pub self_diff: i64,
    pub total_diff: i64,

    /// Relative change of the total's share of its profile, in percent
    pub diff_percent: f64,
}

/// Table of a single profile
pub fn function_table(root: &Node) -> Vec<FunctionRow> {
    let mut rows: Vec<FunctionRow> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in by_depth(root, |n| n.children.as_slice()) {
        for node in row {
            let i = *index.entry(node.name.clone()).or_insert_with(|| {
                rows.push(FunctionRow {
                    name: node.name.clone(),
                    self_ticks: 0,
                    total: 0,
                });
                rows.len() - 1
            });
            rows[i].self_ticks += node.self_ticks;
            rows[i].total += node.total;
        }
    }
    rows
}

/// Table of a diff, scaling the left side by `right_ticks / left_ticks`
/// before comparing so profiles of different length line up.
pub fn diff_function_table(root: &DiffNode, left_ticks: u64, right_ticks: u64) -> Vec<DiffFunctionRow> {
    let mut rows: Vec<DiffFunctionRow> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in by_depth(root, |n| n.children.as_slice()) {
        for node in row {
            let i = *index.entry(node.name.clone()).or_insert_with(|| {
                rows.push(DiffFunctionRow {
                    name: node.name.clone(),
                    self_left: 0,
                    self_right: 0,
                    total_left: 0,
                    total_right: 0,
                    self_diff: 0,
                    total_diff: 0,
                    diff_percent: 0.0,
                });
                rows.len() - 1
            });
            let entry = &mut rows[i];
            entry.self_left += node.self_left();
            entry.self_right += node.self_right();
            entry.total_left += node.total_left();
            entry.total_right += node.total_right();
        }
    }

    let ratio = if left_ticks == 0 {
        1.0
    } else {
        right_ticks as f64 / left_ticks as f64
    };
    for row in &mut rows {
        let scaled_self = (row.self_left as f64 * ratio).round();
        let scaled_total = (row.total_left as f64 * ratio).round();
        row.self_diff = (row.self_right as f64 - scaled_self) as i64;
        row.total_diff = (row.total_right as f64 - scaled_total) as i64;
        row.diff_percent = diff_percent(
            share_percent(row.total_left, left_ticks),
            share_percent(row.total_right, right_ticks),
        );
    }
    rows
}

fn by_depth<'a, N>(root: &'a N, children: impl Fn(&'a N) -> &'a [N]) -> Vec<Vec<&'a N>> {
    let mut rows = vec![vec![root]];
    loop {
        let next: Vec<&N> = rows[rows.len() - 1]
            .iter()
            .flat_map(|n| children(*n).iter())
            .collect();
        if next.is_empty() {
            return rows;
        }
        rows.push(next);
    }
}
