//! Cargo workspace integration
//!
//! - **metadata**: Load workspace members using cargo_metadata

pub mod metadata;
