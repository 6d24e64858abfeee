//! Decision editing session
//!
//! The session owns the working `ReleaseSet`. Every edit goes through
//! [`Session::apply`], which recomputes relevancy from the roots and keeps
//! only the decisions that are still relevant. Between calls the set is
//! always closed: every key is a relevant crate.

use super::decision::Decision;
use super::relevancy::{Relevancy, compute_relevancy};
use super::set::ReleaseSet;
use crate::graph::WorkspaceGraph;
use std::collections::BTreeSet;
use tracing::debug;

pub struct Session<'g> {
  graph: &'g WorkspaceGraph,
  roots: BTreeSet<String>,
  relevancy: Relevancy,
}

impl<'g> Session<'g> {
  /// Start a session from the release roots and the persisted decisions.
  ///
  /// Persisted decisions that are not relevant are dropped immediately.
  pub fn new(graph: &'g WorkspaceGraph, roots: BTreeSet<String>, persisted: &ReleaseSet) -> Self {
    let relevancy = compute_relevancy(&roots, persisted, graph);
    Self {
      graph,
      roots,
      relevancy,
    }
  }

  /// Record `decision` for `workspace` (`None` = undecided) and recompute.
  ///
  /// Crates that were only relevant through the previous decision drop out,
  /// together with their own decisions.
  pub fn apply(&mut self, workspace: &str, decision: Option<Decision>) -> &ReleaseSet {
    let mut working = self.relevancy.releases.clone();
    working.set(workspace, decision);

    self.relevancy = compute_relevancy(&self.roots, &working, self.graph);
    debug!(
      workspace,
      decision = decision.map(Decision::as_str).unwrap_or("undecided"),
      relevant = self.relevancy.workspaces.len(),
      decided = self.relevancy.releases.len(),
      "applied decision"
    );
    &self.relevancy.releases
  }

  pub fn roots(&self) -> &BTreeSet<String> {
    &self.roots
  }

  pub fn relevant_workspaces(&self) -> &BTreeSet<String> {
    &self.relevancy.workspaces
  }

  pub fn releases(&self) -> &ReleaseSet {
    &self.relevancy.releases
  }

  pub fn graph(&self) -> &'g WorkspaceGraph {
    self.graph
  }

  /// Relevant crates still waiting for a decision, sorted.
  pub fn undecided(&self) -> Vec<&str> {
    self
      .relevancy
      .workspaces
      .iter()
      .filter(|name| !self.relevancy.releases.contains(name))
      .map(String::as_str)
      .collect()
  }

  /// End the session, handing back the decisions to persist.
  pub fn finish(self) -> ReleaseSet {
    self.relevancy.releases
  }
}
