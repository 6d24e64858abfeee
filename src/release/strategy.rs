//! Bump strategies offered for a crate, with a preview of the resulting version

use super::decision::Decision;
use crate::core::error::{DecideError, DecideResult, WorkspaceError};
use crate::graph::Workspace;
use semver::{Prerelease, Version};

/// One choice offered to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyOption {
  pub decision: Decision,
  /// Version the crate would have after the release
  pub preview: Version,
}

/// Every decision for `workspace`, each with the version it leads to.
///
/// A crate without a readable version cannot be offered any bump, so this
/// fails with [`WorkspaceError::MissingVersion`]. A version whose bump does
/// not fit in a `u64` fails with [`WorkspaceError::VersionOverflow`].
pub fn strategy_options(workspace: &Workspace) -> DecideResult<Vec<StrategyOption>> {
  let current = workspace
    .version
    .as_deref()
    .and_then(|v| Version::parse(v).ok())
    .ok_or_else(|| WorkspaceError::MissingVersion {
      name: workspace.name.clone(),
    })?;

  Decision::ALL
    .iter()
    .map(|&decision| {
      preview(&current, decision)
        .map(|preview| StrategyOption { decision, preview })
        .ok_or_else(|| {
          DecideError::from(WorkspaceError::VersionOverflow {
            name: workspace.name.clone(),
            version: current.to_string(),
          })
        })
    })
    .collect()
}

/// Version after applying `decision` to `current`, or `None` when a
/// component would overflow.
///
/// A pre-release is finished by the bump that reaches it (1.1.0-0 minor → 1.1.0).
pub fn preview(current: &Version, decision: Decision) -> Option<Version> {
  let stable = current.pre.is_empty();
  let next = match decision {
    Decision::Decline => current.clone(),
    Decision::Patch if stable => Version::new(current.major, current.minor, current.patch.checked_add(1)?),
    Decision::Patch => Version::new(current.major, current.minor, current.patch),
    Decision::Minor if stable || current.patch != 0 => Version::new(current.major, current.minor.checked_add(1)?, 0),
    Decision::Minor => Version::new(current.major, current.minor, 0),
    Decision::Major if stable || current.minor != 0 || current.patch != 0 => {
      Version::new(current.major.checked_add(1)?, 0, 0)
    }
    Decision::Major => Version::new(current.major, 0, 0),
    Decision::Prerelease => next_prerelease(current)?,
  };
  Some(next)
}

/// 1.0.0 → 1.0.1-0, 1.0.1-0 → 1.0.1-1, 1.0.1-rc → 1.0.1-rc.0
fn next_prerelease(current: &Version) -> Option<Version> {
  let mut next = Version::new(current.major, current.minor, current.patch);

  if current.pre.is_empty() {
    next.patch = next.patch.checked_add(1)?;
    next.pre = Prerelease::new("0").unwrap_or(Prerelease::EMPTY);
    return Some(next);
  }

  let mut parts: Vec<String> = current.pre.as_str().split('.').map(str::to_string).collect();
  match parts.last().and_then(|last| last.parse::<u64>().ok()) {
    Some(n) => {
      if let Some(last) = parts.last_mut() {
        *last = n.checked_add(1)?.to_string();
      }
    }
    None => parts.push("0".to_string()),
  }
  next.pre = Prerelease::new(&parts.join(".")).unwrap_or_else(|_| current.pre.clone());
  Some(next)
}
