//! Error types for cargo-decide with contextual messages and exit codes
//!
//! One error type for every command. Each variant knows its exit code and,
//! where there is something useful to say, a help line for the user.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for cargo-decide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// Validation failure, user abort, config or manifest problems
  Failure = 1,
  /// System error (git, I/O)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for cargo-decide
#[derive(Debug)]
pub enum DecideError {
  /// Configuration errors
  Config(ConfigError),

  /// Git operation errors
  Git(GitError),

  /// Malformed workspace members
  Workspace(WorkspaceError),

  /// Batch validation found crates without a decision
  ValidationFailed { findings: usize },

  /// The user left the interactive session without finishing it
  Aborted,

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl DecideError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    DecideError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    DecideError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      DecideError::Message { message, context, help } => DecideError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      DecideError::Config(_) => ExitCode::Failure,
      DecideError::Git(_) => ExitCode::System,
      DecideError::Workspace(_) => ExitCode::Failure,
      DecideError::ValidationFailed { .. } => ExitCode::Failure,
      DecideError::Aborted => ExitCode::Failure,
      DecideError::Io(_) => ExitCode::System,
      DecideError::Message { .. } => ExitCode::Failure,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      DecideError::Config(e) => e.help_message(),
      DecideError::Git(e) => e.help_message(),
      DecideError::Workspace(e) => e.help_message(),
      DecideError::ValidationFailed { .. } => {
        Some("Record the missing decisions with `cargo decide check --interactive`.".to_string())
      }
      DecideError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for DecideError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DecideError::Config(e) => write!(f, "{}", e),
      DecideError::Git(e) => write!(f, "{}", e),
      DecideError::Workspace(e) => write!(f, "{}", e),
      DecideError::ValidationFailed { findings } => {
        write!(f, "Release decisions are incomplete ({} finding(s))", findings)
      }
      DecideError::Aborted => write!(f, "Aborted; no decisions were saved"),
      DecideError::Io(e) => write!(f, "I/O error: {}", e),
      DecideError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for DecideError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      DecideError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for DecideError {
  fn from(err: io::Error) -> Self {
    DecideError::Io(err)
  }
}

impl From<String> for DecideError {
  fn from(msg: String) -> Self {
    DecideError::message(msg)
  }
}

impl From<&str> for DecideError {
  fn from(msg: &str) -> Self {
    DecideError::message(msg)
  }
}

impl From<ConfigError> for DecideError {
  fn from(err: ConfigError) -> Self {
    DecideError::Config(err)
  }
}

impl From<GitError> for DecideError {
  fn from(err: GitError) -> Self {
    DecideError::Git(err)
  }
}

impl From<WorkspaceError> for DecideError {
  fn from(err: WorkspaceError) -> Self {
    DecideError::Workspace(err)
  }
}

impl From<cargo_metadata::Error> for DecideError {
  fn from(err: cargo_metadata::Error) -> Self {
    DecideError::message(format!("Cargo metadata error: {}", err))
  }
}

impl From<toml_edit::de::Error> for DecideError {
  fn from(err: toml_edit::de::Error) -> Self {
    DecideError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<toml_edit::ser::Error> for DecideError {
  fn from(err: toml_edit::ser::Error) -> Self {
    DecideError::message(format!("TOML serialization error: {}", err))
  }
}

impl From<serde_json::Error> for DecideError {
  fn from(err: serde_json::Error) -> Self {
    DecideError::message(format!("JSON error: {}", err))
  }
}

impl From<glob::PatternError> for DecideError {
  fn from(err: glob::PatternError) -> Self {
    DecideError::message(format!("Invalid glob pattern: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// A field holds a value we cannot use
  InvalidField { field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::InvalidField { .. } => Some("Fix the value in decide.toml or remove it to use the default.".to_string()),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::InvalidField { field, reason } => {
        write!(f, "Invalid value for '{}' in config: {}", field, reason)
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },

  /// Base ref could not be resolved
  BaseNotFound { base: String },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::RepoNotFound { path } => Some(format!(
        "cargo-decide compares against git history; run it inside a git checkout (looked in {})",
        path.display()
      )),
      GitError::BaseNotFound { base } => Some(format!(
        "Fetch '{}' or pass another base with --since (or set [changes] base in decide.toml)",
        base
      )),
      _ => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
      GitError::BaseNotFound { base } => {
        write!(f, "No merge base found between HEAD and '{}'", base)
      }
    }
  }
}

/// Malformed workspace member errors
#[derive(Debug)]
pub enum WorkspaceError {
  /// The crate has no version we can build bump strategies from
  MissingVersion { name: String },

  /// Bumping the version would overflow one of its components
  VersionOverflow { name: String, version: String },

  /// Crate name is not part of the workspace graph
  UnknownCrate { name: String, available: Vec<String> },
}

impl WorkspaceError {
  fn help_message(&self) -> Option<String> {
    match self {
      WorkspaceError::MissingVersion { name } => Some(format!(
        "Set `version = \"x.y.z\"` in the [package] section of '{}'",
        name
      )),
      WorkspaceError::VersionOverflow { .. } => None,
      WorkspaceError::UnknownCrate { available, .. } => {
        Some(format!("Workspace crates: {}", available.join(", ")))
      }
    }
  }
}

impl fmt::Display for WorkspaceError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      WorkspaceError::MissingVersion { name } => {
        write!(f, "Crate '{}' has no valid version in its manifest", name)
      }
      WorkspaceError::VersionOverflow { name, version } => {
        write!(f, "Crate '{}' version {} cannot be bumped any further", name, version)
      }
      WorkspaceError::UnknownCrate { name, .. } => {
        write!(f, "Crate '{}' not found in workspace", name)
      }
    }
  }
}

/// Result type alias for cargo-decide
pub type DecideResult<T> = Result<T, DecideError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> DecideResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> DecideResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<DecideError>,
{
  fn context(self, ctx: impl Into<String>) -> DecideResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> DecideResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &DecideError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}

impl From<anyhow::Error> for DecideError {
  fn from(err: anyhow::Error) -> Self {
    DecideError::message(err.to_string())
  }
}
