//! `rota show`: the week's duty assignment as JSON.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use super::{load_config, schedule_json, ScheduleArgs};

/// Arguments for `rota show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub schedule: ScheduleArgs,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

impl ShowArgs {
    pub fn run(self, config: Option<&Path>) -> Result<ExitCode> {
        let cfg = load_config(config)?;
        let schedule = self.schedule.load(&cfg)?;
        let date = self.schedule.date()?;

        println!(
            "{}",
            schedule_json(schedule.assignment_for(date), self.pretty)?
        );
        Ok(ExitCode::SUCCESS)
    }
}
