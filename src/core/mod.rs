//! Core building blocks shared by every command
//!
//! - **config**: decide.toml parsing and validation
//! - **context**: Workspace context built once per invocation
//! - **error**: Error types with contextual help messages and exit codes
//! - **vcs**: Git operations through the system binary (SystemGit)

pub mod config;
pub mod context;
pub mod error;
pub mod vcs;
