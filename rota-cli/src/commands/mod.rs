//! Subcommands and the helpers they share.

pub mod cycle;
pub mod notify;
pub mod reconcile;
pub mod show;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Args;
use serde::Serialize;

use rota_core::{
    config::{self, RotaConfig},
    schedule::{self, Schedule},
    DutyAssignment,
};
use rota_slack::SlackClient;
use rota_sync::{
    pipeline::{self, RunReport, RunSettings},
    Announcer, GroupGateway,
};

/// Date and schedule selection shared by every command.
#[derive(Args, Debug, Clone)]
pub struct ScheduleArgs {
    /// Date to evaluate, `2026-02-09` or `Feb 9, 2026` (default: today).
    #[arg(long)]
    pub date: Option<String>,

    /// Rotation table file; overrides `SCHEMA`.
    #[arg(long, value_name = "PATH")]
    pub schedule_file: Option<PathBuf>,
}

impl ScheduleArgs {
    pub fn date(&self) -> Result<NaiveDate> {
        match self.date.as_deref() {
            Some(raw) => schedule::parse_date(raw).with_context(|| format!("bad --date '{raw}'")),
            None => Ok(Local::now().date_naive()),
        }
    }

    pub fn load(&self, cfg: &RotaConfig) -> Result<Schedule> {
        if let Some(path) = self.schedule_file.as_deref() {
            return Schedule::load(path)
                .with_context(|| format!("failed to load schedule from {}", path.display()));
        }
        let source = cfg
            .schedule
            .as_deref()
            .context("no schedule configured; set SCHEMA or pass --schedule-file")?;
        Schedule::from_source(source).context("failed to load schedule")
    }
}

pub fn load_config(path: Option<&Path>) -> Result<RotaConfig> {
    config::load(path).context("failed to load configuration")
}

#[derive(Serialize)]
struct ScheduleJson<'a> {
    schedule: &'a DutyAssignment,
}

/// `{"schedule": {"release_artistry": [...], "focused_work": [...]}}`
pub fn schedule_json(assignment: &DutyAssignment, pretty: bool) -> Result<String> {
    let doc = ScheduleJson {
        schedule: assignment,
    };
    let text = if pretty {
        serde_json::to_string_pretty(&doc)?
    } else {
        serde_json::to_string(&doc)?
    };
    Ok(text)
}

/// Build run settings from config for the given week.
pub fn run_settings(
    cfg: &RotaConfig,
    date: NaiveDate,
    assignment: &DutyAssignment,
    dry_run: bool,
    announce: bool,
    reconcile: bool,
) -> RunSettings {
    let template_dir = dirs::home_dir()
        .map(|home| config::templates_dir_at(&home))
        .filter(|dir| dir.is_dir());
    RunSettings {
        date,
        assignment: assignment.clone(),
        dry_run,
        announce,
        reconcile,
        channel: cfg.slack.channel.clone(),
        group: cfg.slack.usergroup.clone(),
        mapping: cfg.slack.user_mapping.clone(),
        template_dir,
    }
}

/// Run the pipeline with a Slack client when a token is configured.
pub fn execute(cfg: &RotaConfig, settings: &RunSettings) -> RunReport {
    let client = cfg.slack.token.as_deref().map(SlackClient::new);
    let announcer = client.as_ref().map(|c| c as &dyn Announcer);
    let gateway = client.as_ref().map(|c| c as &dyn GroupGateway);
    pipeline::run(settings, announcer, gateway)
}

pub fn print_report(report: &RunReport) {
    if let Some(announcement) = &report.announcement {
        println!("{}", announcement.summary_line());
    }
    if let Some(rec) = &report.reconciliation {
        println!("{}", rec.summary_line());
        for line in rec.detail_lines() {
            println!("{line}");
        }
        if !rec.unmapped.is_empty() {
            let names: Vec<&str> = rec.unmapped.iter().map(|n| n.0.as_str()).collect();
            println!("  ?  unmapped: {}", names.join(", "));
        }
    }
}

pub fn exit_code(report: &RunReport) -> ExitCode {
    ExitCode::from(u8::try_from(report.exit_code()).unwrap_or(1))
}
