//! `rota reconcile`: bring the user group in line with the week's rotation.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use super::{exit_code, execute, load_config, print_report, run_settings, ScheduleArgs};

/// Arguments for `rota reconcile`.
#[derive(Args, Debug)]
pub struct ReconcileArgs {
    #[command(flatten)]
    pub schedule: ScheduleArgs,

    /// Report the changes without writing them.
    #[arg(long)]
    pub dry_run: bool,

    /// Emit the report as JSON.
    #[arg(long)]
    pub json: bool,
}

impl ReconcileArgs {
    pub fn run(self, config: Option<&Path>) -> Result<ExitCode> {
        let cfg = load_config(config)?;
        let schedule = self.schedule.load(&cfg)?;
        let date = self.schedule.date()?;

        let settings = run_settings(
            &cfg,
            date,
            schedule.assignment_for(date),
            self.dry_run,
            false,
            true,
        );
        let report = execute(&cfg, &settings);
        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_report(&report);
        }
        Ok(exit_code(&report))
    }
}
