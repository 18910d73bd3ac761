//! `rota cycle`: rotation length, bounds, and every week in the table.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use rota_core::{
    schedule::{format_table_date, Schedule},
    CycleInfo, DutyAssignment, PersonName,
};

use super::{load_config, ScheduleArgs};

/// Arguments for `rota cycle`.
#[derive(Args, Debug)]
pub struct CycleArgs {
    #[command(flatten)]
    pub schedule: ScheduleArgs,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl CycleArgs {
    pub fn run(self, config: Option<&Path>) -> Result<ExitCode> {
        let cfg = load_config(config)?;
        let schedule = self.schedule.load(&cfg)?;
        let current = schedule.week_index(self.schedule.date()?);

        if self.json {
            print_json(&schedule, current)?;
        } else {
            print_table(&schedule, current);
        }
        Ok(ExitCode::SUCCESS)
    }
}

#[derive(Serialize)]
struct CycleJson<'a> {
    #[serde(flatten)]
    info: CycleInfo,
    current_week: usize,
    weeks: Vec<WeekJson<'a>>,
}

#[derive(Serialize)]
struct WeekJson<'a> {
    starts: String,
    #[serde(flatten)]
    assignment: &'a DutyAssignment,
}

fn print_json(schedule: &Schedule, current: usize) -> Result<()> {
    let doc = CycleJson {
        info: schedule.cycle_info(),
        current_week: current + 1,
        weeks: schedule
            .weeks()
            .iter()
            .map(|w| WeekJson {
                starts: format_table_date(w.starts),
                assignment: &w.assignment,
            })
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

#[derive(Tabled)]
struct WeekRow {
    #[tabled(rename = "week")]
    week: String,
    #[tabled(rename = "starting")]
    starts: String,
    #[tabled(rename = "release artistry")]
    release_artistry: String,
    #[tabled(rename = "focused work")]
    focused_work: String,
}

fn print_table(schedule: &Schedule, current: usize) {
    let info = schedule.cycle_info();
    println!(
        "{} {} weeks, {} to {}",
        "Cycle:".bold(),
        info.cycle_length,
        info.start_date,
        info.end_date
    );

    let rows: Vec<WeekRow> = schedule
        .weeks()
        .iter()
        .enumerate()
        .map(|(i, w)| WeekRow {
            week: if i == current {
                format!("{} ▶", i + 1).green().bold().to_string()
            } else {
                (i + 1).to_string()
            },
            starts: format_table_date(w.starts),
            release_artistry: join(&w.assignment.release_artistry),
            focused_work: join(&w.assignment.focused_work),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

fn join(names: &[PersonName]) -> String {
    names
        .iter()
        .map(|n| n.0.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
