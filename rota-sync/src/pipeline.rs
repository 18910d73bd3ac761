//! Weekly run pipeline shared by `rota notify` and `rota reconcile`.
//!
//! The announcement always goes out (or is logged, in dry-run) before the
//! group is touched, and its result never depends on reconciliation.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;

use rota_core::{DutyAssignment, GroupId, IdentifierMapping, MappingInput};
use rota_renderer::{unmapped_names, AnnouncementContext, Renderer};

use crate::gateway::{Announcer, GroupGateway};
use crate::reconcile::{ReconcileReport, Reconciler};

/// Everything a run needs besides the remote collaborators.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub date: NaiveDate,
    pub assignment: DutyAssignment,
    pub dry_run: bool,
    /// Post the weekly announcement.
    pub announce: bool,
    /// Reconcile the user group.
    pub reconcile: bool,
    pub channel: Option<String>,
    pub group: Option<GroupId>,
    pub mapping: Option<MappingInput>,
    /// Directory with template overrides.
    pub template_dir: Option<PathBuf>,
}

/// Result of the announcement step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum AnnouncementOutcome {
    Sent { channel: String },
    DryRun { channel: String, text: String },
    Failed { reason: String },
}

impl AnnouncementOutcome {
    pub fn summary_line(&self) -> String {
        match self {
            AnnouncementOutcome::Sent { channel } => {
                format!("Slack notification sent to {channel}")
            }
            AnnouncementOutcome::DryRun { channel, .. } => {
                format!("[DRY RUN] Would send Slack notification to {channel}")
            }
            AnnouncementOutcome::Failed { reason } => {
                format!("Failed to send Slack notification: {reason}")
            }
        }
    }
}

/// Both step results of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub announcement: Option<AnnouncementOutcome>,
    pub reconciliation: Option<ReconcileReport>,
}

impl RunReport {
    /// `0` on success, `1` when the announcement failed, `2` when only
    /// reconciliation failed.
    pub fn exit_code(&self) -> i32 {
        if matches!(self.announcement, Some(AnnouncementOutcome::Failed { .. })) {
            return 1;
        }
        if self
            .reconciliation
            .as_ref()
            .is_some_and(|r| r.outcome.is_failure())
        {
            return 2;
        }
        0
    }
}

/// Run the announcement (if requested) and then reconciliation (if
/// requested).
///
/// `announcer` and `gateway` are `None` when no credentials are configured.
pub fn run(
    settings: &RunSettings,
    announcer: Option<&dyn Announcer>,
    gateway: Option<&dyn GroupGateway>,
) -> RunReport {
    let mapping = settings.mapping.as_ref().map(MappingInput::resolve);

    let usable = mapping.as_ref().and_then(|m| m.as_ref().ok());
    // The target builder warns about unmapped release artistry names itself.
    let target_reports = settings.reconcile
        && settings.group.is_some()
        && usable.is_some()
        && settings.assignment.double_booked().is_empty();

    let announcement = settings
        .announce
        .then(|| announce(settings, usable, announcer, target_reports));

    let reconciliation = settings.reconcile.then(|| {
        let Some(group) = settings.group.as_ref() else {
            return ReconcileReport::disabled(settings.dry_run);
        };
        match &mapping {
            None => ReconcileReport::configuration_error(
                group,
                settings.dry_run,
                "no user mapping configured (SLACK_USER_MAPPING)",
            ),
            Some(Err(err)) => ReconcileReport::configuration_error(
                group,
                settings.dry_run,
                err.to_string(),
            ),
            Some(Ok(mapping)) => Reconciler::new(group, mapping, settings.dry_run, gateway)
                .reconcile(&settings.assignment),
        }
    });

    RunReport {
        announcement,
        reconciliation,
    }
}

fn announce(
    settings: &RunSettings,
    mapping: Option<&IdentifierMapping>,
    announcer: Option<&dyn Announcer>,
    target_reports: bool,
) -> AnnouncementOutcome {
    let Some(channel) = settings.channel.clone() else {
        return AnnouncementOutcome::Failed {
            reason: "SLACK_CHANNEL is not set".to_string(),
        };
    };

    for name in unmapped_names(&settings.assignment, mapping) {
        if target_reports && settings.assignment.release_artistry.contains(name) {
            continue;
        }
        tracing::warn!("no member id found for '{name}', using @mention fallback");
    }

    let ctx = AnnouncementContext::build(
        settings.date,
        &settings.assignment,
        mapping,
        settings.group.as_ref(),
    );
    let renderer = match &settings.template_dir {
        Some(dir) => Renderer::with_template_dir(dir),
        None => Renderer::new(),
    };
    let text = match renderer.and_then(|r| r.render(&ctx)) {
        Ok(text) => text,
        Err(err) => {
            return AnnouncementOutcome::Failed {
                reason: err.to_string(),
            }
        }
    };

    if settings.dry_run {
        tracing::info!("[DRY RUN] Would send to {channel}: {text}");
        return AnnouncementOutcome::DryRun { channel, text };
    }

    let Some(announcer) = announcer else {
        return AnnouncementOutcome::Failed {
            reason: "SLACK_TOKEN is not set".to_string(),
        };
    };
    match announcer.announce(&channel, &text) {
        Ok(()) => {
            tracing::info!("Slack message sent to {channel}");
            AnnouncementOutcome::Sent { channel }
        }
        Err(err) => {
            tracing::error!("failed to send Slack message: {err}");
            AnnouncementOutcome::Failed {
                reason: err.to_string(),
            }
        }
    }
}
