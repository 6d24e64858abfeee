//! Relevancy: which crates need a release decision right now
//!
//! Algorithm:
//! 1. Start from the release roots (crates touched by the changes)
//! 2. Keep only the decisions recorded for those crates
//! 3. Ask the graph for undecided crates depending on a non-declined release;
//!    add them, bringing back any decision they had before
//! 4. Repeat until a pass adds nothing
//!
//! The closure is rebuilt from the roots on every call. Retracting a decision
//! therefore drops every crate that was only relevant through it, without a
//! separate shrink step.

use super::set::ReleaseSet;
use crate::graph::WorkspaceGraph;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

/// Crates that need a decision, and the decisions that still apply to them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Relevancy {
  /// Release roots plus every crate pulled in by propagation
  pub workspaces: BTreeSet<String>,

  /// Input decisions restricted to `workspaces`
  pub releases: ReleaseSet,
}

/// Compute the relevant crates for `roots` under the current `releases`.
///
/// Pure and total: terminates because `workspaces` only grows and is
/// bounded by the number of workspace members.
pub fn compute_relevancy(roots: &BTreeSet<String>, releases: &ReleaseSet, graph: &WorkspaceGraph) -> Relevancy {
  let mut workspaces = roots.clone();
  let mut relevant_releases = releases.restrict_to(&workspaces);
  let mut pass = 0;

  loop {
    pass += 1;
    let mut added = 0;

    for (dependent, _dependency) in graph.undecided_dependent_workspaces(&relevant_releases) {
      if workspaces.contains(&dependent) {
        continue;
      }
      if let Some(previous) = releases.get(&dependent) {
        relevant_releases.set(dependent.clone(), Some(previous));
      }
      workspaces.insert(dependent);
      added += 1;
    }

    debug!(pass, added, relevant = workspaces.len(), "relevancy pass");
    if added == 0 {
      break;
    }
  }

  Relevancy {
    workspaces,
    releases: relevant_releases,
  }
}
