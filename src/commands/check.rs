//! `cargo decide check` - Verify every changed crate has a release decision
//!
//! Batch mode: loads the saved decisions, validates them against the
//! release roots, and reports each missing decision. Exits non-zero when
//! anything is missing. With `--interactive` the editing loop runs instead.

use crate::commands::interactive;
use crate::core::context::WorkspaceContext;
use crate::core::error::{DecideError, DecideResult};
use crate::graph::analyze_changes;
use crate::release::{ReleaseSet, ValidationReport, compute_relevancy, validate};
use serde_json::json;
use std::collections::BTreeSet;

/// Run the check command
pub fn run_check(ctx: &WorkspaceContext, since: Option<String>, interactive: bool, json: bool) -> DecideResult<()> {
  if interactive {
    return interactive::run_interactive(ctx, since);
  }

  let changes = analyze_changes(ctx, since.as_deref())?;

  // Nothing changed: the decisions file is not even read
  if changes.roots.is_empty() {
    if json {
      println!("{}", serde_json::to_string_pretty(&summary(&changes.roots, &ReleaseSet::new(), None))?);
    } else {
      println!("✅ No workspace crates changed; no release decisions needed");
    }
    return Ok(());
  }

  let persisted = ctx.decision_store().load(&ctx.graph)?;

  // Dependents are checked against every saved decision; the report only
  // lists the decisions that are still relevant
  let report = validate(&changes.roots, &persisted, &ctx.graph);
  let releases = compute_relevancy(&changes.roots, &persisted, &ctx.graph).releases;

  if json {
    println!(
      "{}",
      serde_json::to_string_pretty(&summary(&changes.roots, &releases, Some(&report)))?
    );
  } else {
    print_report(&changes.roots, &releases, &report);
  }

  if report.is_ok() {
    Ok(())
  } else {
    Err(DecideError::ValidationFailed {
      findings: report.findings(),
    })
  }
}

fn summary(roots: &BTreeSet<String>, releases: &ReleaseSet, report: Option<&ValidationReport>) -> serde_json::Value {
  let undecided_dependents: Vec<_> = report
    .map(|r| {
      r.undecided_dependents
        .iter()
        .map(|(dependent, dependency)| json!({ "crate": dependent, "depends_on": dependency }))
        .collect()
    })
    .unwrap_or_default();

  json!({
      "ok": report.is_none_or(ValidationReport::is_ok),
      "roots": roots,
      "decisions": releases,
      "undecided_roots": report.map(|r| r.undecided_roots.clone()).unwrap_or_default(),
      "undecided_dependents": undecided_dependents,
  })
}

/// Human-readable report, one line per crate.
pub fn print_report(roots: &BTreeSet<String>, releases: &ReleaseSet, report: &ValidationReport) {
  println!("Release Decisions");
  println!("=================");
  println!();

  for root in roots {
    if let Some(decision) = releases.get(root) {
      println!("  ✅ {} ({})", root, decision);
    }
  }

  for root in &report.undecided_roots {
    println!("  ❌ {} has been modified but has no release decision", root);
  }

  for (dependent, dependency) in &report.undecided_dependents {
    println!(
      "  ❌ {} has no release decision but depends on {}, which is planned for release",
      dependent, dependency
    );
  }

  println!();
  if report.is_ok() {
    println!("✅ Every changed crate has a release decision");
  } else {
    println!("{} crate(s) still need a decision", report.findings());
  }
}
