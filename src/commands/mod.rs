//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the library components: read profiles, run an
//! engine, write the result and print a summary.

pub mod diff;
pub mod inspect;
pub mod models;
pub mod subtract;
pub mod utils;

// Re-export main command functions
pub use diff::execute_diff;
pub use inspect::execute_inspect;
pub use models::{DiffArgs, InspectArgs, SubtractArgs};
pub use subtract::execute_subtract;
pub use utils::display_version;
