//! Graph-aware workspace analysis
//!
//! Built on cargo_metadata + petgraph. The graph answers two questions for the
//! release engine: which crates own the changed files, and which undecided
//! crates depend on a crate that is being released.

pub mod affected;
pub mod workspace_graph;

pub use affected::{ChangeAnalysis, analyze_changes};
pub use workspace_graph::{Workspace, WorkspaceGraph};
