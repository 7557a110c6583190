//! Sibling alignment between two trees.
//!
//! Children are keyed by `(name, ordinal among same-named siblings)`.
//! Applied recursively from matched parents, this identifies a node by
//! its full path from the root, with a positional tie-break when one
//! parent has several children of the same name.

use super::node::Node;
use std::collections::{HashMap, VecDeque};

/// How one slot of a merged child list is filled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pairing {
    Both(usize, usize),
    LeftOnly(usize),
    RightOnly(usize),
}

/// Align two sibling lists.
///
/// The result follows the left order. Each right-only child is placed
/// just before the first matched child that follows it on the right,
/// so when both lists agree on the order of their common children the
/// result preserves both orders. Leftover right-only children go last.
pub fn pair_children(left: &[Node], right: &[Node]) -> Vec<Pairing> {
    pair_siblings_by(left, right, |n| n.name.as_str())
}

/// [`pair_children`] over any sibling type, keyed by `name`
pub fn pair_siblings_by<'a, T>(
    left: &'a [T],
    right: &'a [T],
    name: impl Fn(&'a T) -> &'a str,
) -> Vec<Pairing> {
    let mut by_name: HashMap<&str, VecDeque<usize>> = HashMap::new();
    for (j, r) in right.iter().enumerate() {
        by_name.entry(name(r)).or_default().push_back(j);
    }

    let matches: Vec<Option<usize>> = left
        .iter()
        .map(|l| by_name.get_mut(name(l)).and_then(VecDeque::pop_front))
        .collect();

    let mut matched_right = vec![false; right.len()];
    for j in matches.iter().flatten() {
        matched_right[*j] = true;
    }

    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut cursor = 0;
    for (i, m) in matches.iter().enumerate() {
        match *m {
            Some(j) => {
                while cursor < j {
                    if !matched_right[cursor] {
                        out.push(Pairing::RightOnly(cursor));
                    }
                    cursor += 1;
                }
                cursor = cursor.max(j + 1);
                out.push(Pairing::Both(i, j));
            }
            None => out.push(Pairing::LeftOnly(i)),
        }
    }
    for (j, matched) in matched_right.iter().enumerate().skip(cursor) {
        if !matched {
            out.push(Pairing::RightOnly(j));
        }
    }

    out
}
