//! Release decisions and their propagation through the workspace graph
//!
//! # Core Invariants
//!
//! 1. **Undecided is absence**
//!    - `ReleaseSet` has no entry for an undecided crate
//!    - `Decision` has no variant for it
//!
//! 2. **Relevancy is recomputed, never patched**
//!    - Every edit rebuilds the closure from the release roots
//!    - Crates relevant only through a retracted decision drop out
//!
//! 3. **Only declined crates stop propagation**
//!    - Any other decision makes undecided dependents relevant
//!
//! # Architecture
//!
//! - **decision / set**: the data model
//! - **relevancy**: fixed-point closure over the graph
//! - **session**: interactive editing on top of relevancy
//! - **validate**: batch report of missing decisions
//! - **store**: persisted decisions (`.decisions.toml`)
//! - **strategy**: bump options with version previews

pub mod decision;
pub mod relevancy;
pub mod session;
pub mod set;
pub mod store;
pub mod strategy;
pub mod validate;

pub use decision::Decision;
pub use relevancy::compute_relevancy;
pub use session::Session;
pub use set::ReleaseSet;
pub use store::DecisionStore;
pub use strategy::strategy_options;
pub use validate::{ValidationReport, validate};
