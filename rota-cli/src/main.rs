//! Rota: weekly rotation announcements and user group reconciliation.
//!
//! # Usage
//!
//! ```text
//! rota show [--date D] [--schedule-file P] [--pretty]
//! rota cycle [--date D] [--schedule-file P] [--json]
//! rota notify [--date D] [--schedule-file P] [--dry-run] [--skip-group]
//! rota reconcile [--date D] [--schedule-file P] [--dry-run]
//! ```
//!
//! Every command accepts `--config <path>`; Slack settings come from the
//! config file and the `SCHEMA`, `SLACK_*` environment variables.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    cycle::CycleArgs, notify::NotifyArgs, reconcile::ReconcileArgs, show::ShowArgs,
};

#[derive(Parser, Debug)]
#[command(
    name = "rota",
    version,
    about = "Announce the weekly rotation and keep the release artistry group in sync",
    long_about = None,
)]
struct Cli {
    /// Config file (defaults to ~/.rota/config.yaml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the duty assignment for a week as JSON.
    Show(ShowArgs),

    /// Show the rotation cycle and every week in it.
    Cycle(CycleArgs),

    /// Print the week's schedule, announce it, then reconcile the user group.
    Notify(NotifyArgs),

    /// Reconcile the user group without announcing.
    Reconcile(ReconcileArgs),
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.config.as_deref();
    match cli.command {
        Commands::Show(args) => args.run(config),
        Commands::Cycle(args) => args.run(config),
        Commands::Notify(args) => args.run(config),
        Commands::Reconcile(args) => args.run(config),
    }
}

/// Library crates log through the `log` facade; records go to stderr so
/// stdout stays parseable.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
