//! Unified workspace context - build once, pass everywhere
//!
//! `main` loads the config and the workspace graph once, then hands
//! `&WorkspaceContext` to the command it dispatches to.

use crate::cargo::metadata::WorkspaceMetadata;
use crate::core::config::DecideConfig;
use crate::core::error::DecideResult;
use crate::graph::workspace_graph::WorkspaceGraph;
use crate::release::DecisionStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Shared workspace-level data for one invocation.
#[derive(Clone)]
pub struct WorkspaceContext {
  /// Workspace root directory (absolute path)
  pub root: PathBuf,

  /// Dependency graph snapshot
  pub graph: Arc<WorkspaceGraph>,

  /// decide.toml, or the defaults
  pub config: Arc<DecideConfig>,
}

impl WorkspaceContext {
  /// Build workspace context from the current directory.
  ///
  /// `dir` may be anywhere inside the workspace; cargo finds the root. The
  /// config is read before the graph is built because it decides which
  /// edges the graph gets.
  pub fn build(dir: &Path) -> DecideResult<Self> {
    let metadata = WorkspaceMetadata::load(dir)?;
    let root = metadata.workspace_root().to_path_buf();
    let config = DecideConfig::load(&root)?;
    let graph = WorkspaceGraph::from_metadata(&metadata, &config.graph);

    Ok(Self {
      root,
      graph: Arc::new(graph),
      config: Arc::new(config),
    })
  }

  /// Get workspace root as Path reference (convenience)
  pub fn workspace_root(&self) -> &Path {
    &self.root
  }

  /// Store for the configured decisions file.
  pub fn decision_store(&self) -> DecisionStore {
    DecisionStore::new(self.root.join(&self.config.decisions.file))
  }
}
