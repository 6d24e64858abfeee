//! Sparse crate → decision mapping

use super::decision::Decision;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Decisions keyed by crate name.
///
/// Undecided crates have no entry. Iteration is sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReleaseSet {
  decisions: BTreeMap<String, Decision>,
}

impl ReleaseSet {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, name: &str) -> Option<Decision> {
    self.decisions.get(name).copied()
  }

  pub fn contains(&self, name: &str) -> bool {
    self.decisions.contains_key(name)
  }

  /// Record a decision; `None` makes the crate undecided again.
  pub fn set(&mut self, name: impl Into<String>, decision: Option<Decision>) {
    let name = name.into();
    match decision {
      Some(decision) => {
        self.decisions.insert(name, decision);
      }
      None => {
        self.decisions.remove(&name);
      }
    }
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, Decision)> {
    self.decisions.iter().map(|(name, decision)| (name.as_str(), *decision))
  }

  pub fn len(&self) -> usize {
    self.decisions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.decisions.is_empty()
  }

  /// Entries whose crate is in `keep`.
  pub fn restrict_to(&self, keep: &BTreeSet<String>) -> ReleaseSet {
    self
      .decisions
      .iter()
      .filter(|(name, _)| keep.contains(*name))
      .map(|(name, decision)| (name.clone(), *decision))
      .collect()
  }
}

impl FromIterator<(String, Decision)> for ReleaseSet {
  fn from_iter<I: IntoIterator<Item = (String, Decision)>>(iter: I) -> Self {
    Self {
      decisions: iter.into_iter().collect(),
    }
  }
}

impl<'a> FromIterator<(&'a str, Decision)> for ReleaseSet {
  fn from_iter<I: IntoIterator<Item = (&'a str, Decision)>>(iter: I) -> Self {
    iter.into_iter().map(|(name, decision)| (name.to_string(), decision)).collect()
  }
}
