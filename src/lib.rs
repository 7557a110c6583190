//! flamebearer
//!
//! Codec and transform engine for flamebearer call-tree profiles, the
//! compact format continuous-profiling dashboards use to ship flame
//! graphs.
//!
//! ## Getting Started
//!
//! ```ignore
//! use flamebearer::parser::parse_profile;
//! use flamebearer::tree::build_tree;
//!
//! let profile = parse_profile(&json)?;
//! let outcome = build_tree(&profile.flamebearer)?;
//! println!("{} nodes", outcome.value.node_count());
//! ```
//!
//! Two profiles can be diffed with [`diff::diff_profiles`] and a selection
//! subtracted from a total with [`subtract::subtract`]. The `flamebearer`
//! binary wraps all of this for local use.

pub mod codec;
pub mod commands;
pub mod diff;
pub mod output;
pub mod parser;
pub mod subtract;
pub mod tree;
pub mod utils;
