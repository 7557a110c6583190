//! Residual profiles: what is left of a total aggregate once a selected
//! sub-aggregate is taken out of it.
//!
//! Used to show the "excluded" view next to a heatmap selection.

mod engine;

// Public API exports
pub use engine::{subtract, subtract_trees, subtract_trees_with, subtract_with};
