//! CLI commands for cargo-decide
//!
//! - **check**: Verify the saved decisions cover every changed crate
//!   (`--interactive` edits them instead)
//! - **status**: Show changed files, release roots, and pending decisions
//!
//! All commands accept `&WorkspaceContext` to avoid redundant workspace loads.

pub mod check;
pub mod interactive;
pub mod status;

pub use check::run_check;
pub use status::run_status;
