use crate::core::error::{ConfigError, DecideError, DecideResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for cargo-decide
/// Searched in order: decide.toml, .decide.toml, .cargo/decide.toml, .config/decide.toml
///
/// Every section is optional; a workspace without a config file gets the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecideConfig {
  #[serde(default)]
  pub changes: ChangesConfig,
  #[serde(default)]
  pub graph: GraphConfig,
  #[serde(default)]
  pub decisions: DecisionsConfig,
}

/// How changed files are discovered
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangesConfig {
  /// Ref the working tree is compared against (default: "origin/main")
  #[serde(default = "default_base")]
  pub base: String,

  /// Glob patterns (relative to the workspace root) of files that never
  /// make a crate a release root, e.g. `["**/*.md"]`
  #[serde(default)]
  pub ignore: Vec<String>,
}

fn default_base() -> String {
  "origin/main".to_string()
}

impl Default for ChangesConfig {
  fn default() -> Self {
    Self {
      base: default_base(),
      ignore: Vec::new(),
    }
  }
}

/// Which dependency edges propagate release requirements
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphConfig {
  /// Treat dev-dependencies as edges (default: false)
  #[serde(default)]
  pub include_dev: bool,
}

/// Where decisions are persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionsConfig {
  /// Decisions file, relative to the workspace root (default: ".decisions.toml")
  #[serde(default = "default_decisions_file")]
  pub file: PathBuf,
}

fn default_decisions_file() -> PathBuf {
  PathBuf::from(".decisions.toml")
}

impl Default for DecisionsConfig {
  fn default() -> Self {
    Self {
      file: default_decisions_file(),
    }
  }
}

impl DecideConfig {
  /// Find config file in search order: decide.toml, .decide.toml, .cargo/decide.toml, .config/decide.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("decide.toml"),
      path.join(".decide.toml"),
      path.join(".cargo").join("decide.toml"),
      path.join(".config").join("decide.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config, falling back to defaults when no file exists.
  pub fn load(path: &Path) -> DecideResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: DecideConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config
      .validate()
      .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

    Ok(config)
  }

  pub fn validate(&self) -> DecideResult<()> {
    if self.changes.base.trim().is_empty() {
      return Err(DecideError::Config(ConfigError::InvalidField {
        field: "changes.base".to_string(),
        reason: "must name a git ref".to_string(),
      }));
    }

    for pattern in &self.changes.ignore {
      if let Err(e) = glob::Pattern::new(pattern) {
        return Err(DecideError::Config(ConfigError::InvalidField {
          field: "changes.ignore".to_string(),
          reason: format!("'{}' is not a valid glob: {}", pattern, e),
        }));
      }
    }

    if self.decisions.file.as_os_str().is_empty() {
      return Err(DecideError::Config(ConfigError::InvalidField {
        field: "decisions.file".to_string(),
        reason: "must not be empty".to_string(),
      }));
    }

    Ok(())
  }

  /// Compiled `changes.ignore` patterns.
  pub fn ignore_patterns(&self) -> DecideResult<Vec<glob::Pattern>> {
    self
      .changes
      .ignore
      .iter()
      .map(|p| glob::Pattern::new(p).map_err(DecideError::from))
      .collect()
  }
}
