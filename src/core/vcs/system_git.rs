//! System git backend
//!
//! Uses git plumbing commands through the `git` binary with an isolated
//! environment. Only read operations: cargo-decide never writes to the
//! repository.

use crate::core::error::{DecideResult, GitError, ResultExt};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::debug;

/// Git backend using system git
pub struct SystemGit {
  /// Working tree root; every command runs from here so paths are top-level relative
  work_tree: PathBuf,
}

impl SystemGit {
  /// Open the git repository containing `path`.
  ///
  /// Fails with [`GitError::RepoNotFound`] outside a checkout; no change
  /// analysis is possible without one.
  pub fn open(path: &Path) -> DecideResult<Self> {
    let output = Command::new("git")
      .env("LC_ALL", "C")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(GitError::RepoNotFound { path: path.to_path_buf() }.into());
      }
      return Err(
        GitError::CommandFailed {
          command: "git rev-parse --show-toplevel".to_string(),
          stderr: stderr.to_string(),
        }
        .into(),
      );
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(Self {
      work_tree: PathBuf::from(stdout.trim()),
    })
  }

  /// Common ancestor of HEAD and `base`.
  pub fn merge_base(&self, base: &str) -> DecideResult<String> {
    let output = self
      .git_cmd()
      .args(["merge-base", "HEAD", base])
      .output()
      .context("Failed to run git merge-base")?;

    if !output.status.success() {
      return Err(GitError::BaseNotFound { base: base.to_string() }.into());
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Files changed since the merge base with `base`, as absolute paths.
  ///
  /// Includes committed changes, uncommitted changes to tracked files, and
  /// untracked files that are not ignored. Sorted, without duplicates.
  pub fn changed_files_since(&self, base: &str) -> DecideResult<Vec<PathBuf>> {
    let merge_base = self.merge_base(base)?;
    debug!(base, merge_base = %merge_base, "computing changed files");

    let diff = self.run(&["diff", "--name-only", &merge_base])?;
    let untracked = self.run(&["ls-files", "--others", "--exclude-standard"])?;

    let mut files: Vec<PathBuf> = parse_paths(&diff.stdout)
      .chain(parse_paths(&untracked.stdout))
      .map(|relative| self.work_tree.join(relative))
      .collect();
    files.sort();
    files.dedup();

    debug!(count = files.len(), "changed files");
    Ok(files)
  }

  fn run(&self, args: &[&str]) -> DecideResult<Output> {
    let output = self
      .git_cmd()
      .args(args)
      .output()
      .with_context(|| format!("Failed to run git {}", args.join(" ")))?;

    if !output.status.success() {
      return Err(
        GitError::CommandFailed {
          command: format!("git {}", args.join(" ")),
          stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
        .into(),
      );
    }
    Ok(output)
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to the work tree root
  /// - Clears environment variables
  /// - Whitelists only PATH and HOME
  /// - Adds safe configuration overrides
  fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.work_tree);

    // Isolated environment (don't trust global config)
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII

    cmd
  }
}

/// Non-empty lines of git output, as relative paths.
fn parse_paths(stdout: &[u8]) -> impl Iterator<Item = PathBuf> + '_ {
  std::str::from_utf8(stdout)
    .unwrap_or_default()
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .map(PathBuf::from)
}
