//! Batch validation of recorded decisions

use super::set::ReleaseSet;
use crate::graph::WorkspaceGraph;
use serde::Serialize;
use std::collections::BTreeSet;

/// Crates that need a decision but have none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
  /// Changed crates without a decision
  pub undecided_roots: BTreeSet<String>,

  /// `(dependent, dependency)`: `dependent` has no decision while
  /// `dependency` is planned for a non-declined release
  pub undecided_dependents: Vec<(String, String)>,
}

impl ValidationReport {
  /// Every crate that needs a decision has one.
  pub fn is_ok(&self) -> bool {
    self.undecided_roots.is_empty() && self.undecided_dependents.is_empty()
  }

  pub fn findings(&self) -> usize {
    self.undecided_roots.len() + self.undecided_dependents.len()
  }
}

/// Report missing decisions. Never fails; an empty report is success.
pub fn validate(roots: &BTreeSet<String>, releases: &ReleaseSet, graph: &WorkspaceGraph) -> ValidationReport {
  let undecided_roots = roots.iter().filter(|root| !releases.contains(root)).cloned().collect();

  ValidationReport {
    undecided_roots,
    undecided_dependents: graph.undecided_dependent_workspaces(releases),
  }
}
