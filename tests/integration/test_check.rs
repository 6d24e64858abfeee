//! Integration tests for `cargo decide check`

use crate::helpers::{TestWorkspace, chain_workspace, git, run_cargo_decide, stderr, stdout};
use anyhow::Result;

#[test]
fn test_check_no_changes_succeeds() -> Result<()> {
  let ws = chain_workspace()?;

  let output = run_cargo_decide(&ws.path, &["decide", "check"])?;

  assert!(output.status.success(), "stderr: {}", stderr(&output));
  assert!(stdout(&output).contains("No workspace crates changed"));
  Ok(())
}

#[test]
fn test_check_reports_undecided_root() -> Result<()> {
  let ws = chain_workspace()?;
  ws.modify_file("lib-a", "src/lib.rs", "pub fn hello() -> &'static str { \"Modified\" }\n")?;
  ws.commit("Modify lib-a")?;

  let output = run_cargo_decide(&ws.path, &["decide", "check", "--since", "origin/main"])?;

  assert_eq!(output.status.code(), Some(1));
  let out = stdout(&output);
  assert!(
    out.contains("lib-a has been modified but has no release decision"),
    "got: {}",
    out
  );
  // Dependents only need a decision once lib-a is released
  assert!(!out.contains("lib-b has no release decision"));
  Ok(())
}

#[test]
fn test_check_reports_undecided_dependents() -> Result<()> {
  let ws = chain_workspace()?;
  ws.modify_file("lib-a", "src/lib.rs", "pub fn hello() -> &'static str { \"Modified\" }\n")?;
  ws.commit("Modify lib-a")?;
  ws.write_file(".decisions.toml", "[decisions]\nlib-a = \"minor\"\n")?;

  let output = run_cargo_decide(&ws.path, &["decide", "check"])?;

  assert_eq!(output.status.code(), Some(1));
  let out = stdout(&output);
  assert!(out.contains("lib-b has no release decision but depends on lib-a, which is planned for release"));
  assert!(out.contains("lib-c has no release decision but depends on lib-a, which is planned for release"));
  assert!(stderr(&output).contains("cargo decide check --interactive"));
  Ok(())
}

#[test]
fn test_check_complete_decisions_pass() -> Result<()> {
  let ws = chain_workspace()?;
  ws.modify_file("lib-a", "src/lib.rs", "pub fn hello() -> &'static str { \"Modified\" }\n")?;
  ws.commit("Modify lib-a")?;
  ws.write_file(
    ".decisions.toml",
    "[decisions]\nlib-a = \"minor\"\nlib-b = \"patch\"\nlib-c = \"patch\"\n",
  )?;

  let output = run_cargo_decide(&ws.path, &["decide", "check"])?;

  assert!(output.status.success(), "stdout: {}\nstderr: {}", stdout(&output), stderr(&output));
  assert!(stdout(&output).contains("Every changed crate has a release decision"));
  Ok(())
}

#[test]
fn test_check_decline_stops_propagation() -> Result<()> {
  let ws = chain_workspace()?;
  ws.modify_file("lib-a", "src/lib.rs", "pub fn hello() -> &'static str { \"Modified\" }\n")?;
  ws.commit("Modify lib-a")?;
  ws.write_file(".decisions.toml", "[decisions]\nlib-a = \"decline\"\n")?;

  let output = run_cargo_decide(&ws.path, &["decide", "check"])?;

  assert!(output.status.success(), "stdout: {}", stdout(&output));
  Ok(())
}

#[test]
fn test_check_counts_uncommitted_files() -> Result<()> {
  let ws = chain_workspace()?;
  ws.write_file("crates/lib-b/src/extra.rs", "pub fn extra() {}\n")?;

  let output = run_cargo_decide(&ws.path, &["decide", "check"])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stdout(&output).contains("lib-b has been modified but has no release decision"));
  Ok(())
}

#[test]
fn test_check_respects_ignore_patterns() -> Result<()> {
  let ws = chain_workspace()?;
  ws.write_file("decide.toml", "[changes]\nignore = [\"**/*.md\"]\n")?;
  ws.modify_file("lib-a", "README.md", "# Reworded\n")?;
  ws.commit("Docs only")?;

  let output = run_cargo_decide(&ws.path, &["decide", "check"])?;

  assert!(output.status.success(), "stdout: {}", stdout(&output));
  assert!(stdout(&output).contains("No workspace crates changed"));
  Ok(())
}

#[test]
fn test_check_json_output() -> Result<()> {
  let ws = chain_workspace()?;
  ws.modify_file("lib-a", "src/lib.rs", "pub fn hello() -> &'static str { \"Modified\" }\n")?;
  ws.commit("Modify lib-a")?;
  ws.write_file(".decisions.toml", "[decisions]\nlib-a = \"major\"\nlib-b = \"minor\"\n")?;

  let output = run_cargo_decide(&ws.path, &["decide", "check", "--json"])?;

  assert_eq!(output.status.code(), Some(1));
  let json: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  assert_eq!(json["ok"], false);
  assert_eq!(json["roots"], serde_json::json!(["lib-a"]));
  assert_eq!(json["decisions"]["lib-b"], "minor");
  assert_eq!(json["undecided_dependents"][0]["crate"], "lib-c");
  Ok(())
}

#[test]
fn test_check_unknown_base_is_system_error() -> Result<()> {
  let ws = chain_workspace()?;

  let output = run_cargo_decide(&ws.path, &["decide", "check", "--since", "no-such-branch"])?;

  assert_eq!(output.status.code(), Some(2));
  assert!(stderr(&output).contains("no-such-branch"));
  Ok(())
}

#[test]
fn test_check_outside_git_repository() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_crate("lib-a", "0.1.0", &[])?;
  std::fs::remove_dir_all(ws.path.join(".git"))?;

  let output = run_cargo_decide(&ws.path, &["decide", "check"])?;

  assert_eq!(output.status.code(), Some(2));
  assert!(stderr(&output).contains("Git repository not found"));
  Ok(())
}

#[test]
fn test_check_from_crate_directory() -> Result<()> {
  let ws = chain_workspace()?;
  ws.modify_file("lib-c", "src/lib.rs", "pub fn hello() -> &'static str { \"Modified\" }\n")?;
  git(&ws.path, &["add", "."])?;
  ws.write_file(".decisions.toml", "[decisions]\nlib-c = \"patch\"\n")?;

  let output = run_cargo_decide(&ws.path.join("crates/lib-b"), &["decide", "check"])?;

  assert!(output.status.success(), "stdout: {}\nstderr: {}", stdout(&output), stderr(&output));
  Ok(())
}

#[test]
fn test_check_saved_release_outside_roots_needs_dependents() -> Result<()> {
  let ws = chain_workspace()?;
  ws.modify_file("lib-c", "src/lib.rs", "pub fn hello() -> &'static str { \"Modified\" }\n")?;
  ws.commit("Modify lib-c")?;
  // lib-a is not a root, but a saved release of it still implicates lib-b
  ws.write_file(".decisions.toml", "[decisions]\nlib-a = \"minor\"\nlib-c = \"patch\"\n")?;

  let output = run_cargo_decide(&ws.path, &["decide", "check"])?;

  assert_eq!(output.status.code(), Some(1));
  let out = stdout(&output);
  assert!(
    out.contains("lib-b has no release decision but depends on lib-a, which is planned for release"),
    "got: {}",
    out
  );
  Ok(())
}

#[test]
fn test_check_no_changes_ignores_broken_decisions_file() -> Result<()> {
  let ws = chain_workspace()?;
  ws.write_file(".decisions.toml", "[decisions]\nlib-a = \"huge\"\n")?;

  let output = run_cargo_decide(&ws.path, &["decide", "check"])?;

  assert!(output.status.success(), "stderr: {}", stderr(&output));
  assert!(stdout(&output).contains("No workspace crates changed"));
  Ok(())
}
