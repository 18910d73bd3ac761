//! `rota notify`: print, announce, then reconcile.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use rota_core::DutyAssignment;
use rota_sync::pipeline::RunReport;

use super::{exit_code, execute, load_config, print_report, run_settings, schedule_json, ScheduleArgs};

/// Arguments for `rota notify`.
#[derive(Args, Debug)]
pub struct NotifyArgs {
    #[command(flatten)]
    pub schedule: ScheduleArgs,

    /// Log the announcement and group changes instead of applying them.
    #[arg(long)]
    pub dry_run: bool,

    /// Announce only; leave the user group untouched.
    #[arg(long)]
    pub skip_group: bool,

    /// Pretty-print the schedule JSON.
    #[arg(long)]
    pub pretty: bool,

    /// Emit one machine-readable JSON document instead of summary lines.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct NotifyJson<'a> {
    schedule: &'a DutyAssignment,
    #[serde(flatten)]
    report: &'a RunReport,
}

impl NotifyArgs {
    pub fn run(self, config: Option<&Path>) -> Result<ExitCode> {
        let cfg = load_config(config)?;
        let schedule = self.schedule.load(&cfg)?;
        let date = self.schedule.date()?;
        let assignment = schedule.assignment_for(date);

        if !self.json {
            println!("{}", schedule_json(assignment, self.pretty)?);
        }

        let settings = run_settings(&cfg, date, assignment, self.dry_run, true, !self.skip_group);
        let report = execute(&cfg, &settings);
        if self.json {
            let doc = NotifyJson {
                schedule: assignment,
                report: &report,
            };
            println!("{}", serde_json::to_string_pretty(&doc)?);
        } else {
            print_report(&report);
        }
        Ok(exit_code(&report))
    }
}
