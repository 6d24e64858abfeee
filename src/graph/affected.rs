//! Release roots from file changes
//!
//! Given the files changed since the base ref, determine which crates own
//! them. Those crates are the release roots of the session.
//!
//! Files outside the workspace, files matching `[changes] ignore`, and the
//! decisions file itself never make a crate a root.

use super::workspace_graph::WorkspaceGraph;
use crate::core::context::WorkspaceContext;
use crate::core::error::DecideResult;
use crate::core::vcs::SystemGit;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Outcome of change analysis.
#[derive(Debug, Clone, Default)]
pub struct ChangeAnalysis {
  /// Changed files considered, relative to the workspace root
  pub changed_files: Vec<PathBuf>,

  /// Crates directly containing changed files
  pub roots: BTreeSet<String>,
}

/// Discover changed files with git and map them to release roots.
///
/// Opening the repository happens first: without one there is no change set,
/// and nothing downstream runs.
pub fn analyze_changes(ctx: &WorkspaceContext, since: Option<&str>) -> DecideResult<ChangeAnalysis> {
  let git = SystemGit::open(ctx.workspace_root())?;
  let base = since.unwrap_or(&ctx.config.changes.base);
  let changed = git.changed_files_since(base)?;

  let ignore = ctx.config.ignore_patterns()?;
  let decisions_file = ctx.workspace_root().join(&ctx.config.decisions.file);
  let analysis = analyze(&ctx.graph, ctx.workspace_root(), &changed, &ignore, &decisions_file);

  info!(
    base,
    changed = analysis.changed_files.len(),
    roots = analysis.roots.len(),
    "analyzed changes"
  );
  Ok(analysis)
}

/// Map already discovered changes to release roots.
pub fn analyze(
  graph: &WorkspaceGraph,
  workspace_root: &Path,
  changed_files: &[PathBuf],
  ignore: &[glob::Pattern],
  decisions_file: &Path,
) -> ChangeAnalysis {
  let root = workspace_root.canonicalize().unwrap_or_else(|_| workspace_root.to_path_buf());
  let decisions_file = decisions_file.canonicalize().unwrap_or_else(|_| decisions_file.to_path_buf());

  let mut considered = Vec::new();
  let mut absolute = Vec::new();

  for file in changed_files {
    let canonical = file.canonicalize().unwrap_or_else(|_| file.clone());
    if canonical == decisions_file {
      continue;
    }
    // Outside the Cargo workspace (sibling projects in the same repository)
    let Ok(relative) = canonical.strip_prefix(&root) else {
      debug!(file = %file.display(), "outside workspace");
      continue;
    };
    if ignore.iter().any(|pattern| pattern.matches_path(relative)) {
      debug!(file = %relative.display(), "ignored");
      continue;
    }
    considered.push(relative.to_path_buf());
    absolute.push(canonical);
  }

  let roots = graph.release_roots(&absolute);

  ChangeAnalysis {
    changed_files: considered,
    roots,
  }
}
