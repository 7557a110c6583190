//! Non-fatal findings attached to best-effort results.

use log::warn;
use serde::Serialize;
use thiserror::Error;

/// A recoverable inconsistency found while building or transforming a tree
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Diagnostic {
    #[error("node '{name}' at depth {depth}: self {self_ticks} + children {children_total} != total {total}")]
    InvariantViolation {
        name: String,
        depth: usize,
        total: u64,
        self_ticks: u64,
        children_total: u64,
    },

    #[error("root total {root_total} does not match numTicks {num_ticks}")]
    TickMismatch { root_total: u64, num_ticks: u64 },

    #[error("declared maxSelf {declared} does not match computed {computed}")]
    MaxSelfMismatch { declared: u64, computed: u64 },

    #[error("data inconsistency at '{path}': {reason}")]
    DataInconsistency { path: String, reason: String },
}

/// Collected diagnostics for one operation.
///
/// Storage is capped; findings past the cap are only counted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
    suppressed: usize,
    #[serde(skip)]
    limit: usize,
}

impl Diagnostics {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            items: Vec::new(),
            suppressed: 0,
            limit,
        }
    }

    /// Record a finding and log it
    pub fn push(&mut self, diagnostic: Diagnostic) {
        if self.items.len() < self.limit {
            warn!("{}", diagnostic);
            self.items.push(diagnostic);
        } else {
            self.suppressed += 1;
        }
    }

    /// Move everything from `other` into `self`, respecting the cap
    pub fn extend(&mut self, other: Diagnostics) {
        self.suppressed += other.suppressed;
        for d in other.items {
            if self.items.len() < self.limit {
                self.items.push(d);
            } else {
                self.suppressed += 1;
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.suppressed == 0
    }

    /// Number of findings, including suppressed ones
    pub fn len(&self) -> usize {
        self.items.len() + self.suppressed
    }

    pub fn suppressed(&self) -> usize {
        self.suppressed
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn has_invariant_violation(&self) -> bool {
        self.items
            .iter()
            .any(|d| matches!(d, Diagnostic::InvariantViolation { .. }))
    }

    pub fn has_data_inconsistency(&self) -> bool {
        self.items
            .iter()
            .any(|d| matches!(d, Diagnostic::DataInconsistency { .. }))
    }
}

/// A value together with the diagnostics gathered while producing it
#[derive(Debug, Clone)]
pub struct Outcome<T> {
    pub value: T,
    pub diagnostics: Diagnostics,
}

impl<T> Outcome<T> {
    pub fn new(value: T, diagnostics: Diagnostics) -> Self {
        Self { value, diagnostics }
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: f(self.value),
            diagnostics: self.diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inconsistency(path: &str) -> Diagnostic {
        Diagnostic::DataInconsistency {
            path: path.to_string(),
            reason: "negative residual".to_string(),
        }
    }

    #[test]
    fn test_push_respects_limit() {
        let mut diags = Diagnostics::with_limit(2);
        diags.push(inconsistency("a"));
        diags.push(inconsistency("b"));
        diags.push(inconsistency("c"));

        assert_eq!(diags.iter().count(), 2);
        assert_eq!(diags.suppressed(), 1);
        assert_eq!(diags.len(), 3);
        assert!(diags.has_data_inconsistency());
        assert!(!diags.has_invariant_violation());
    }

    #[test]
    fn test_extend_carries_suppressed() {
        let mut a = Diagnostics::with_limit(1);
        let mut b = Diagnostics::with_limit(1);
        b.push(inconsistency("x"));
        b.push(inconsistency("y"));

        a.extend(b);
        assert_eq!(a.len(), 2);
        assert_eq!(a.suppressed(), 1);
    }

    #[test]
    fn test_display() {
        let d = Diagnostic::InvariantViolation {
            name: "main".to_string(),
            depth: 1,
            total: 10,
            self_ticks: 3,
            children_total: 5,
        };
        assert_eq!(
            d.to_string(),
            "node 'main' at depth 1: self 3 + children 5 != total 10"
        );
    }
}
