use crate::core::error::{DecideResult, ResultExt};
use cargo_metadata::{MetadataCommand, Package};
use std::path::Path;

/// Workspace introspection using cargo_metadata
#[derive(Clone)]
pub struct WorkspaceMetadata {
  metadata: cargo_metadata::Metadata,
}

impl WorkspaceMetadata {
  /// Run `cargo metadata` from `dir` (the workspace root or any directory
  /// inside it) without resolving registry dependencies; only workspace
  /// members and their declared dependencies are needed.
  pub fn load(dir: &Path) -> DecideResult<Self> {
    let metadata = MetadataCommand::new()
      .current_dir(dir)
      .no_deps()
      .exec()
      .with_context(|| format!("Failed to load Cargo workspace from {}", dir.display()))?;
    Ok(Self { metadata })
  }

  pub fn list_crates(&self) -> Vec<&Package> {
    self.metadata.workspace_packages()
  }

  pub fn workspace_root(&self) -> &Path {
    self.metadata.workspace_root.as_std_path()
  }
}
