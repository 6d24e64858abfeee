//! Persisted release decisions
//!
//! Decisions live in a small TOML file at the workspace root:
//!
//! ```toml
//! updated = "2026-10-19T10:00:00+00:00"
//!
//! [decisions]
//! lib-core = "minor"
//! lib-util = "decline"
//! ```
//!
//! Undecided crates are absent. Saving an empty set removes the file.

use super::decision::Decision;
use super::set::ReleaseSet;
use crate::core::error::{DecideResult, ResultExt};
use crate::graph::WorkspaceGraph;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Default, Serialize, Deserialize)]
struct DecisionsFile {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  updated: Option<String>,
  #[serde(default)]
  decisions: BTreeMap<String, Decision>,
}

/// Reads and writes the decisions file.
#[derive(Debug, Clone)]
pub struct DecisionStore {
  path: PathBuf,
}

impl DecisionStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Load saved decisions. A missing file is an empty set; entries for
  /// crates that are no longer workspace members are dropped.
  pub fn load(&self, graph: &WorkspaceGraph) -> DecideResult<ReleaseSet> {
    if !self.path.exists() {
      debug!(path = %self.path.display(), "no decisions file");
      return Ok(ReleaseSet::new());
    }

    let content =
      fs::read_to_string(&self.path).with_context(|| format!("Failed to read decisions from {}", self.path.display()))?;
    let file: DecisionsFile = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse decisions from {}", self.path.display()))?;

    let releases = file
      .decisions
      .into_iter()
      .filter(|(name, _)| {
        let known = graph.contains(name);
        if !known {
          warn!(crate_name = %name, "dropping decision for crate that is not a workspace member");
        }
        known
      })
      .collect();

    Ok(releases)
  }

  /// Persist `releases`, replacing whatever was saved before.
  pub fn save(&self, releases: &ReleaseSet) -> DecideResult<()> {
    if releases.is_empty() {
      if self.path.exists() {
        fs::remove_file(&self.path).with_context(|| format!("Failed to remove {}", self.path.display()))?;
      }
      return Ok(());
    }

    let file = DecisionsFile {
      updated: Some(Utc::now().to_rfc3339()),
      decisions: releases.iter().map(|(name, decision)| (name.to_string(), decision)).collect(),
    };
    let content = toml_edit::ser::to_string_pretty(&file).context("Failed to serialize decisions to TOML")?;

    if let Some(parent) = self.path.parent()
      && !parent.as_os_str().is_empty()
    {
      fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&self.path, content).with_context(|| format!("Failed to write decisions to {}", self.path.display()))?;
    debug!(path = %self.path.display(), count = releases.len(), "saved decisions");
    Ok(())
  }
}
