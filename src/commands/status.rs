//! `cargo decide status` - Show where the release decisions stand
//!
//! Read-only view of the current session: changed files, release roots,
//! every crate that needs a decision, and which of them are still undecided.

use crate::core::context::WorkspaceContext;
use crate::core::error::{DecideError, DecideResult};
use crate::graph::{ChangeAnalysis, analyze_changes};
use crate::release::{ReleaseSet, Session};
use serde_json::json;

/// Output format for the status command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
  Text,
  Json,
  NamesOnly,
}

impl OutputFormat {
  fn from_str(s: &str) -> DecideResult<Self> {
    match s.to_lowercase().as_str() {
      "text" => Ok(Self::Text),
      "json" => Ok(Self::Json),
      "names" | "names-only" => Ok(Self::NamesOnly),
      _ => Err(DecideError::with_help(
        format!("Unknown format '{}'", s),
        "Valid formats: text, json, names",
      )),
    }
  }
}

/// Run the status command
pub fn run_status(ctx: &WorkspaceContext, since: Option<String>, format: String) -> DecideResult<()> {
  let output_format = OutputFormat::from_str(&format)?;

  let changes = analyze_changes(ctx, since.as_deref())?;
  let persisted = if changes.roots.is_empty() {
    ReleaseSet::new()
  } else {
    ctx.decision_store().load(&ctx.graph)?
  };
  let session = Session::new(&ctx.graph, changes.roots.clone(), &persisted);

  match output_format {
    OutputFormat::Text => display_text(&changes, &session)?,
    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status_json(&changes, &session)?)?),
    OutputFormat::NamesOnly => {
      for name in session.undecided() {
        println!("{}", name);
      }
    }
  }

  Ok(())
}

/// Display results in human-readable text format
fn display_text(changes: &ChangeAnalysis, session: &Session<'_>) -> DecideResult<()> {
  println!("Release Status");
  println!("==============");
  println!();

  println!("Changed files: {}", changes.changed_files.len());
  if !changes.changed_files.is_empty() && changes.changed_files.len() <= 20 {
    for file in &changes.changed_files {
      println!("  {}", file.display());
    }
    println!();
  }

  println!("Release roots: {} crates", changes.roots.len());
  for name in &changes.roots {
    let dependents = session.graph().transitive_dependents(name)?;
    println!("  📦 {} ({} dependents)", name, dependents.len());
  }
  println!();

  let relevant = session.relevant_workspaces();
  println!("Needs a decision: {} crates", relevant.len());
  for name in relevant {
    match session.releases().get(name) {
      Some(decision) => println!("  ✅ {} ({})", name, decision),
      None => {
        let via = released_dependencies(session, name)?;
        if via.is_empty() {
          println!("  ❓ {}", name);
        } else {
          println!("  ❓ {} (depends on {})", name, via.join(", "));
        }
      }
    }
  }

  let undecided = session.undecided();
  println!();
  if undecided.is_empty() {
    println!("✅ All decisions made");
  } else {
    println!("{} crate(s) undecided", undecided.len());
  }

  Ok(())
}

fn status_json(changes: &ChangeAnalysis, session: &Session<'_>) -> DecideResult<serde_json::Value> {
  let mut crates = Vec::new();
  for name in session.relevant_workspaces() {
    crates.push(json!({
        "name": name,
        "root": changes.roots.contains(name),
        "decision": session.releases().get(name),
        "depends_on": released_dependencies(session, name)?,
    }));
  }

  Ok(json!({
      "changed_files": changes.changed_files,
      "roots": changes.roots,
      "crates": crates,
      "undecided": session.undecided(),
  }))
}

/// Direct dependencies of `name` that are being released.
fn released_dependencies(session: &Session<'_>, name: &str) -> DecideResult<Vec<String>> {
  let releases = session.releases();
  Ok(
    session
      .graph()
      .direct_dependencies(name)?
      .into_iter()
      .filter(|dep| releases.get(dep).is_some_and(|d| !d.is_decline()))
      .collect(),
  )
}
