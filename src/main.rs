mod cargo;
mod commands;
mod core;
mod graph;
mod release;

use clap::{Parser, Subcommand};
use core::error::{DecideError, print_error};
use tracing_subscriber::EnvFilter;

/// Track release decisions for changed workspace crates
#[derive(Parser)]
#[command(name = "cargo")]
#[command(bin_name = "cargo")]
#[command(styles = get_styles())]
enum CargoCli {
  Decide(DecideCli),
}

#[derive(Parser)]
#[command(name = "decide")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct DecideCli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Verify that every changed crate has a release decision
  Check {
    /// Git ref to compare against (default: `[changes] base`, origin/main)
    #[arg(long)]
    since: Option<String>,
    /// Assign missing decisions interactively, then save them
    #[arg(short, long)]
    interactive: bool,
    /// Output results in JSON format
    #[arg(long, conflicts_with = "interactive")]
    json: bool,
  },

  /// Show the crates that need a decision and what has been decided
  Status {
    /// Git ref to compare against (default: `[changes] base`, origin/main)
    #[arg(long)]
    since: Option<String>,
    /// Output format: text (default), json, names
    #[arg(long, default_value = "text")]
    format: String,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let CargoCli::Decide(cli) = CargoCli::parse();

  // Diagnostics go to stderr so `--json` and `--format names` stay parseable
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_env("CARGO_DECIDE_LOG"))
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();

  let current_dir = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => handle_error(DecideError::message(format!("Failed to get current directory: {}", e))),
  };

  // Build workspace context once (loads metadata, config, graph)
  let ctx = match core::context::WorkspaceContext::build(&current_dir) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let result = match cli.command {
    Commands::Check {
      since,
      interactive,
      json,
    } => commands::run_check(&ctx, since, interactive, json),
    Commands::Status { since, format } => commands::run_status(&ctx, since, format),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: DecideError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
