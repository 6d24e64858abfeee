//! Workspace dependency graph built from cargo_metadata + petgraph
//!
//! ## Graph Structure
//!
//! - **Directed Graph**: `A → B` means "A depends on B"
//! - **Nodes**: Workspace members only (registry dependencies never need a decision)
//! - **Edges**: Normal and build dependencies, dev-dependencies on request
//! - **Index**: crate name → node, crate directory → crate name
//!
//! The graph is a snapshot: it is loaded once per session and never changes
//! afterwards, so every query here is a pure lookup.

use crate::cargo::metadata::WorkspaceMetadata;
use crate::core::config::GraphConfig;
use crate::core::error::{DecideResult, WorkspaceError};
use crate::release::ReleaseSet;
use cargo_metadata::DependencyKind;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A workspace member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
  pub name: String,
  /// Current manifest version; `None` when the manifest has none we can read
  pub version: Option<String>,
  pub manifest_path: PathBuf,
  /// `publish = false`: never published, but still propagates
  pub private: bool,
}

impl Workspace {
  pub fn new(name: impl Into<String>, version: Option<&str>, manifest_path: impl Into<PathBuf>) -> Self {
    Self {
      name: name.into(),
      version: version.map(str::to_string),
      manifest_path: manifest_path.into(),
      private: false,
    }
  }

  pub fn private(mut self) -> Self {
    self.private = true;
    self
  }

  /// Directory containing the manifest.
  pub fn root(&self) -> Option<&Path> {
    self.manifest_path.parent()
  }
}

/// Workspace dependency graph.
#[derive(Debug, Default)]
pub struct WorkspaceGraph {
  graph: DiGraph<Workspace, DependencyKind>,

  /// Index: crate name → node index
  name_to_node: HashMap<String, NodeIndex>,

  /// Index: canonical crate directory → crate name
  path_index: HashMap<PathBuf, String>,
}

impl WorkspaceGraph {
  /// Empty graph, filled with `add_workspace` / `add_dependency`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Build the graph from already loaded metadata.
  pub fn from_metadata(metadata: &WorkspaceMetadata, config: &GraphConfig) -> Self {
    let mut graph = Self::new();
    let members = metadata.list_crates();

    for package in &members {
      let version = package.version.to_string();
      let workspace = Workspace::new(
        package.name.as_str(),
        Some(version.as_str()),
        package.manifest_path.clone().into_std_path_buf(),
      );
      // `publish = false` is an empty registry list
      let private = package.publish.as_ref().is_some_and(|registries| registries.is_empty());
      graph.add_workspace(if private { workspace.private() } else { workspace });
    }

    for package in &members {
      for dep in &package.dependencies {
        if matches!(dep.kind, DependencyKind::Development) && !config.include_dev {
          continue;
        }
        // Registry dependencies are not nodes; add_dependency ignores them
        graph.add_dependency(package.name.as_str(), &dep.name, dep.kind);
      }
    }

    debug!(
      workspaces = graph.graph.node_count(),
      edges = graph.graph.edge_count(),
      "loaded workspace graph"
    );
    graph
  }

  /// Add a workspace member. A second member with the same name replaces the index entry.
  pub fn add_workspace(&mut self, workspace: Workspace) {
    let name = workspace.name.clone();
    if let Some(root) = workspace.root() {
      self.path_index.insert(normalize(root), name.clone());
    }
    let idx = self.graph.add_node(workspace);
    self.name_to_node.insert(name, idx);
  }

  /// Record that `dependent` depends on `dependency`.
  ///
  /// Returns false when either side is not a workspace member.
  pub fn add_dependency(&mut self, dependent: &str, dependency: &str, kind: DependencyKind) -> bool {
    match (self.name_to_node.get(dependent), self.name_to_node.get(dependency)) {
      (Some(&from), Some(&to)) if from != to => {
        self.graph.add_edge(from, to, kind);
        true
      }
      _ => false,
    }
  }

  /// Get all workspace member crate names, sorted.
  pub fn workspace_members(&self) -> Vec<String> {
    let mut members: Vec<_> = self.name_to_node.keys().cloned().collect();
    members.sort();
    members
  }

  pub fn contains(&self, name: &str) -> bool {
    self.name_to_node.contains_key(name)
  }

  pub fn workspace(&self, name: &str) -> DecideResult<&Workspace> {
    Ok(&self.graph[self.find_node(name)?])
  }

  /// Direct dependencies of a crate (what it uses), sorted.
  pub fn direct_dependencies(&self, name: &str) -> DecideResult<Vec<String>> {
    let node_idx = self.find_node(name)?;
    Ok(self.sorted_neighbors(node_idx, Direction::Outgoing))
  }

  /// Every crate that depends on `name`, directly or transitively, sorted.
  /// Never contains `name` itself, even on cycles.
  pub fn transitive_dependents(&self, name: &str) -> DecideResult<Vec<String>> {
    let start = self.find_node(name)?;
    let mut dependents: Vec<_> = self
      .reachable(start, Direction::Incoming)
      .into_iter()
      .map(|idx| self.graph[idx].name.clone())
      .collect();
    dependents.sort();
    Ok(dependents)
  }

  /// Map a file path to the crate whose directory contains it.
  ///
  /// Nested crates win over their parents: the deepest directory is found first.
  pub fn file_to_workspace(&self, file_path: &Path) -> Option<&str> {
    let normalized = normalize(file_path);
    normalized
      .ancestors()
      .find_map(|dir| self.path_index.get(dir))
      .map(String::as_str)
  }

  /// Crates directly touched by the changed files.
  pub fn release_roots(&self, changed_files: &[impl AsRef<Path>]) -> BTreeSet<String> {
    changed_files
      .iter()
      .filter_map(|path| self.file_to_workspace(path.as_ref()))
      .map(str::to_string)
      .collect()
  }

  /// Pairs `(dependent, dependency)` where `dependent` has no entry in
  /// `releases` and `dependency` (direct or transitive) is planned for a
  /// release that is not declined.
  ///
  /// Dependents come in name order; each dependent's dependencies come in
  /// discovery order.
  pub fn undecided_dependent_workspaces(&self, releases: &ReleaseSet) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    for dependent in self.workspace_members() {
      if releases.contains(&dependent) {
        continue;
      }
      let start = self.name_to_node[&dependent];

      for idx in self.reachable(start, Direction::Outgoing) {
        let dependency = &self.graph[idx].name;
        if let Some(decision) = releases.get(dependency)
          && !decision.is_decline()
        {
          pairs.push((dependent.clone(), dependency.clone()));
        }
      }
    }

    pairs
  }

  /// Find node index by crate name.
  fn find_node(&self, name: &str) -> DecideResult<NodeIndex> {
    self.name_to_node.get(name).copied().ok_or_else(|| {
      WorkspaceError::UnknownCrate {
        name: name.to_string(),
        available: self.workspace_members(),
      }
      .into()
    })
  }

  fn sorted_neighbors(&self, idx: NodeIndex, direction: Direction) -> Vec<String> {
    let mut names: Vec<String> = self
      .graph
      .neighbors_directed(idx, direction)
      .map(|n| self.graph[n].name.clone())
      .collect();
    names.sort();
    names.dedup();
    names
  }

  /// Breadth-first walk from `start`, excluding `start`. Neighbors are
  /// visited in name order so the result is stable.
  fn reachable(&self, start: NodeIndex, direction: Direction) -> Vec<NodeIndex> {
    let mut visited = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    let mut order = Vec::new();

    while let Some(current) = queue.pop_front() {
      let mut neighbors: Vec<NodeIndex> = self.graph.neighbors_directed(current, direction).collect();
      neighbors.sort_by(|a, b| self.graph[*a].name.cmp(&self.graph[*b].name));

      for neighbor in neighbors {
        if visited.insert(neighbor) {
          order.push(neighbor);
          queue.push_back(neighbor);
        }
      }
    }

    order
  }
}

/// Canonicalize when the path exists; in-memory graphs use paths that don't.
fn normalize(path: &Path) -> PathBuf {
  path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
