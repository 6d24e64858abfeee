//! Integration tests for `cargo decide check --interactive`

use crate::helpers::{chain_workspace, run_cargo_decide, run_cargo_decide_with_input, stdout};
use anyhow::Result;

#[test]
fn test_interactive_done_saves_decisions() -> Result<()> {
  let ws = chain_workspace()?;
  ws.modify_file("lib-a", "src/lib.rs", "pub fn hello() -> &'static str { \"Modified\" }\n")?;
  ws.commit("Modify lib-a")?;

  let output = run_cargo_decide_with_input(
    &ws.path,
    &["decide", "check", "--interactive"],
    "lib-a minor\nlib-b patch\nlib-c decline\ndone\n",
  )?;

  assert!(output.status.success(), "stdout: {}", stdout(&output));
  assert!(stdout(&output).contains("lib-a 0.1.0 [changed]: minor → 0.2.0"));

  let saved = ws.read_file(".decisions.toml")?;
  assert!(saved.contains("lib-a = \"minor\""));
  assert!(saved.contains("lib-b = \"patch\""));
  assert!(saved.contains("lib-c = \"decline\""));

  // The saved file satisfies batch mode
  let check = run_cargo_decide(&ws.path, &["decide", "check"])?;
  assert!(check.status.success(), "stdout: {}", stdout(&check));
  Ok(())
}

#[test]
fn test_interactive_abort_saves_nothing() -> Result<()> {
  let ws = chain_workspace()?;
  ws.modify_file("lib-a", "src/lib.rs", "pub fn hello() -> &'static str { \"Modified\" }\n")?;
  ws.commit("Modify lib-a")?;

  let output = run_cargo_decide_with_input(&ws.path, &["decide", "check", "-i"], "lib-a major\nabort\n")?;

  assert_eq!(output.status.code(), Some(1));
  assert!(!ws.file_exists(".decisions.toml"));
  Ok(())
}

#[test]
fn test_interactive_retraction_forgets_dependents() -> Result<()> {
  let ws = chain_workspace()?;
  ws.modify_file("lib-a", "src/lib.rs", "pub fn hello() -> &'static str { \"Modified\" }\n")?;
  ws.commit("Modify lib-a")?;
  ws.write_file(
    ".decisions.toml",
    "[decisions]\nlib-a = \"minor\"\nlib-b = \"patch\"\nlib-c = \"patch\"\n",
  )?;

  let output = run_cargo_decide_with_input(&ws.path, &["decide", "check", "-i"], "lib-a decline\ndone\n")?;

  assert!(output.status.success(), "stdout: {}", stdout(&output));
  let saved = ws.read_file(".decisions.toml")?;
  assert!(saved.contains("lib-a = \"decline\""));
  assert!(!saved.contains("lib-b"));
  assert!(!saved.contains("lib-c"));
  Ok(())
}

#[test]
fn test_interactive_marks_unpublished_crates() -> Result<()> {
  let ws = chain_workspace()?;
  ws.write_file(
    "crates/lib-a/Cargo.toml",
    "[package]\nname = \"lib-a\"\nversion = \"0.1.0\"\nedition.workspace = true\npublish = false\n",
  )?;
  ws.commit("Stop publishing lib-a")?;

  let output = run_cargo_decide_with_input(&ws.path, &["decide", "check", "-i"], "lib-a patch\ndone\n")?;

  assert!(output.status.success(), "stdout: {}", stdout(&output));
  assert!(stdout(&output).contains("lib-a 0.1.0 [changed, private]: patch → 0.1.1"));
  Ok(())
}
