//! `cargo decide check --interactive` - Assign release decisions from the terminal
//!
//! A line-driven loop: the user types `<crate> <decision>`, the session
//! recomputes relevancy, and the updated list is printed. `done` saves the
//! decisions; `abort` (or end of input) leaves without saving anything.

use crate::core::context::WorkspaceContext;
use crate::core::error::{DecideError, DecideResult};
use crate::graph::{WorkspaceGraph, analyze_changes};
use crate::release::{Decision, ReleaseSet, Session, strategy_options};
use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};
use tracing::info;

/// Run the interactive editing loop on stdin/stdout and persist the result.
pub fn run_interactive(ctx: &WorkspaceContext, since: Option<String>) -> DecideResult<()> {
  let changes = analyze_changes(ctx, since.as_deref())?;
  if changes.roots.is_empty() {
    println!("✅ No workspace crates changed; no release decisions needed");
    return Ok(());
  }

  let store = ctx.decision_store();
  let persisted = store.load(&ctx.graph)?;

  let stdin = io::stdin();
  let stdout = io::stdout();
  let outcome = edit(&ctx.graph, changes.roots, &persisted, stdin.lock(), stdout.lock())?;

  match outcome {
    Some(releases) => {
      store.save(&releases)?;
      info!(decisions = releases.len(), "saved decisions");
      println!("💾 Saved {} decision(s) to {}", releases.len(), store.path().display());
      Ok(())
    }
    None => Err(DecideError::Aborted),
  }
}

enum Command {
  Set(String, Option<Decision>),
  List,
  Help,
  Done,
  Abort,
}

fn parse_command(line: &str) -> Result<Command, String> {
  let words: Vec<&str> = line.split_whitespace().collect();
  match words.as_slice() {
    ["list" | "ls"] => Ok(Command::List),
    ["help" | "?"] => Ok(Command::Help),
    ["done" | "save"] => Ok(Command::Done),
    ["abort" | "quit" | "q"] => Ok(Command::Abort),
    [name, choice] => Ok(Command::Set(name.to_string(), Decision::parse_choice(choice)?)),
    _ => Err(format!("Unrecognized command '{}'. Type 'help' for usage.", line.trim())),
  }
}

/// Drive a session from `input`, writing the display to `out`.
///
/// Returns the final decisions on `done`, `None` on abort or end of input.
pub fn edit<R: BufRead, W: Write>(
  graph: &WorkspaceGraph,
  roots: BTreeSet<String>,
  persisted: &ReleaseSet,
  input: R,
  mut out: W,
) -> DecideResult<Option<ReleaseSet>> {
  let mut session = Session::new(graph, roots, persisted);
  render(&session, &mut out)?;
  write_help(&mut out)?;

  for line in input.lines() {
    let line = line?;
    if line.trim().is_empty() {
      continue;
    }

    match parse_command(&line) {
      Ok(Command::Set(name, decision)) => {
        if !session.relevant_workspaces().contains(&name) {
          writeln!(out, "⚠️  '{}' does not need a decision right now", name)?;
          continue;
        }
        session.apply(&name, decision);
        render(&session, &mut out)?;
      }
      Ok(Command::List) => render(&session, &mut out)?,
      Ok(Command::Help) => write_help(&mut out)?,
      Ok(Command::Done) => {
        let undecided = session.undecided().len();
        if undecided > 0 {
          writeln!(out, "⚠️  {} crate(s) left undecided", undecided)?;
        }
        return Ok(Some(session.finish()));
      }
      Ok(Command::Abort) => return Ok(None),
      Err(message) => writeln!(out, "{}", message)?,
    }
  }

  Ok(None)
}

/// Print every relevant crate with its decision and the versions it can move to.
fn render<W: Write>(session: &Session<'_>, out: &mut W) -> DecideResult<()> {
  let graph = session.graph();
  writeln!(out)?;

  for name in session.relevant_workspaces() {
    let workspace = graph.workspace(name)?;
    let options = strategy_options(workspace)?;
    let current = workspace.version.as_deref().unwrap_or_default();

    let mut tags = Vec::new();
    if session.roots().contains(name) {
      tags.push("changed");
    }
    if workspace.private {
      tags.push("private");
    }
    let tags = if tags.is_empty() {
      String::new()
    } else {
      format!(" [{}]", tags.join(", "))
    };

    match session.releases().get(name) {
      Some(decision) => {
        let preview = options
          .iter()
          .find(|o| o.decision == decision)
          .map(|o| o.preview.to_string())
          .unwrap_or_default();
        writeln!(out, "  ✅ {} {}{}: {} → {}", name, current, tags, decision, preview)?;
      }
      None => {
        writeln!(out, "  ❓ {} {}{}: undecided", name, current, tags)?;
        let choices: Vec<String> = options
          .iter()
          .map(|o| format!("{} ({})", o.decision, o.preview))
          .collect();
        writeln!(out, "       {}", choices.join(", "))?;
      }
    }
  }

  writeln!(out)?;
  Ok(())
}

fn write_help<W: Write>(out: &mut W) -> DecideResult<()> {
  writeln!(out, "Commands:")?;
  writeln!(
    out,
    "  <crate> <decision>   decision: decline, patch, minor, major, prerelease, undecided"
  )?;
  writeln!(out, "  list                 show the crates that need a decision")?;
  writeln!(out, "  done                 save decisions and exit")?;
  writeln!(out, "  abort                exit without saving")?;
  Ok(())
}
