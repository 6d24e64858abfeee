//! Release decisions
//!
//! A crate without a decision is *undecided*. That state is never stored:
//! it is the absence of an entry, so `Decision` has no variant for it and
//! callers use `Option<Decision>` where "undecided" is a valid answer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The release disposition recorded for a crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
  /// Do not release this crate; its dependents are not implicated
  Decline,
  /// Patch bump (bug fixes)
  Patch,
  /// Minor bump (new features)
  Minor,
  /// Major bump (breaking changes)
  Major,
  /// Pre-release of the next patch version
  Prerelease,
}

impl Decision {
  /// Every decision, in the order they are offered to the user.
  pub const ALL: [Decision; 5] = [
    Decision::Decline,
    Decision::Patch,
    Decision::Minor,
    Decision::Major,
    Decision::Prerelease,
  ];

  /// Declined crates do not pull their dependents into the release.
  pub fn is_decline(self) -> bool {
    matches!(self, Decision::Decline)
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Decision::Decline => "decline",
      Decision::Patch => "patch",
      Decision::Minor => "minor",
      Decision::Major => "major",
      Decision::Prerelease => "prerelease",
    }
  }

  /// Parse a user choice where "undecided" is allowed.
  ///
  /// Returns `Ok(None)` for `undecided`/`none`, which callers treat as
  /// "remove the entry".
  pub fn parse_choice(s: &str) -> Result<Option<Decision>, String> {
    match s.trim().to_lowercase().as_str() {
      "undecided" | "none" => Ok(None),
      other => other.parse().map(Some),
    }
  }
}

impl fmt::Display for Decision {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Decision {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "decline" => Ok(Decision::Decline),
      "patch" => Ok(Decision::Patch),
      "minor" => Ok(Decision::Minor),
      "major" => Ok(Decision::Major),
      "prerelease" => Ok(Decision::Prerelease),
      _ => Err(format!(
        "Unknown decision '{}'. Valid decisions: decline, patch, minor, major, prerelease, undecided",
        s
      )),
    }
  }
}
