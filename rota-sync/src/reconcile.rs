//! Reconciler: desired membership, diff, and the single write call.
//!
//! ## Run protocol
//!
//! 1. Reject weeks that list a name under both duties.
//! 2. Build the target set from this week's release artistry names.
//! 3. Ask the [`ModeController`] which calls are allowed.
//! 4. Read current members (when allowed). A failed read leaves the current
//!    state unknown and the run degraded: nothing is written.
//! 5. Desired = non-managed current members ∪ target.
//! 6. Empty diff → no-op. Otherwise write the full desired set (live) or
//!    report it (dry-run).

use std::collections::BTreeSet;

use serde::Serialize;

use rota_core::{DutyAssignment, GroupId, IdentifierMapping, MemberId, PersonName};

use crate::classify::classify;
use crate::gateway::GroupGateway;
use crate::mode::{ExecutionPlan, ModeController};
use crate::plan::DiffPlan;
use crate::target::build_target;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Labelled result of one reconciliation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum ReconcileOutcome {
    /// No user group configured; the component is off.
    Disabled,
    /// Remote membership already equals the desired membership.
    UpToDate { desired: BTreeSet<MemberId> },
    /// The full desired set was written.
    Applied {
        plan: DiffPlan,
        desired: BTreeSet<MemberId>,
    },
    /// Dry-run with a known current state: exact changes, not written.
    Simulated {
        plan: DiffPlan,
        desired: BTreeSet<MemberId>,
    },
    /// Dry-run without credentials: current state never read.
    Approximate { ensure_present: BTreeSet<MemberId> },
    /// Current state could not be read; nothing was written.
    Degraded {
        ensure_present: BTreeSet<MemberId>,
        reason: String,
    },
    /// The write call failed.
    WriteFailed { plan: DiffPlan, error: String },
    /// Reconciliation refused to run.
    ConfigurationError { reason: String },
}

impl ReconcileOutcome {
    /// Short state label leading every summary line.
    pub fn label(&self) -> &'static str {
        match self {
            ReconcileOutcome::Disabled => "disabled",
            ReconcileOutcome::UpToDate { .. } => "no-op",
            ReconcileOutcome::Applied { .. } => "applied",
            ReconcileOutcome::Simulated { .. } | ReconcileOutcome::Approximate { .. } => {
                "simulated"
            }
            ReconcileOutcome::Degraded { .. } => "degraded",
            ReconcileOutcome::WriteFailed { .. } => "write-failed",
            ReconcileOutcome::ConfigurationError { .. } => "configuration-error",
        }
    }

    /// `true` for outcomes that should make the process exit non-zero.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            ReconcileOutcome::WriteFailed { .. } | ReconcileOutcome::ConfigurationError { .. }
        )
    }
}

/// Outcome plus the run context needed to report it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub group: Option<GroupId>,
    pub dry_run: bool,
    /// Release artistry names with no identifier.
    pub unmapped: Vec<PersonName>,
    pub outcome: ReconcileOutcome,
}

impl ReconcileReport {
    pub fn disabled(dry_run: bool) -> Self {
        Self {
            group: None,
            dry_run,
            unmapped: Vec::new(),
            outcome: ReconcileOutcome::Disabled,
        }
    }

    pub fn configuration_error(group: &GroupId, dry_run: bool, reason: impl Into<String>) -> Self {
        Self {
            group: Some(group.clone()),
            dry_run,
            unmapped: Vec::new(),
            outcome: ReconcileOutcome::ConfigurationError {
                reason: reason.into(),
            },
        }
    }

    /// One line stating the final state, prefixed `[dry-run]` in dry-run mode.
    pub fn summary_line(&self) -> String {
        let prefix = if self.dry_run { "[dry-run] " } else { "" };
        let group = self
            .group
            .as_ref()
            .map(|g| g.0.as_str())
            .unwrap_or("<none>");
        let label = self.outcome.label();
        let body = match &self.outcome {
            ReconcileOutcome::Disabled => {
                "no user group configured, skipping reconciliation".to_string()
            }
            ReconcileOutcome::UpToDate { desired } => {
                format!("group {group} already up to date ({} members)", desired.len())
            }
            ReconcileOutcome::Applied { plan, desired } => format!(
                "group {group} updated ({}); now {} members",
                plan.counts(),
                desired.len()
            ),
            ReconcileOutcome::Simulated { plan, desired } => format!(
                "would update group {group} ({}) to {} members",
                plan.counts(),
                desired.len()
            ),
            ReconcileOutcome::Approximate { ensure_present } => {
                return format!(
                    "{prefix}{label} (approximate): current members of {group} unknown; would ensure present: {}",
                    join_ids(ensure_present)
                );
            }
            ReconcileOutcome::Degraded {
                ensure_present,
                reason,
            } => format!(
                "could not read group {group} ({reason}); would ensure present: {}; no update attempted",
                join_ids(ensure_present)
            ),
            ReconcileOutcome::WriteFailed { plan, error } => format!(
                "could not update group {group} ({}): {error}",
                plan.counts()
            ),
            ReconcileOutcome::ConfigurationError { reason } => reason.clone(),
        };
        format!("{prefix}{label}: {body}")
    }

    /// Per-member detail lines for plans that carry exact changes.
    pub fn detail_lines(&self) -> Vec<String> {
        let plan = match &self.outcome {
            ReconcileOutcome::Applied { plan, .. }
            | ReconcileOutcome::Simulated { plan, .. }
            | ReconcileOutcome::WriteFailed { plan, .. } => plan,
            _ => return Vec::new(),
        };
        plan.additions
            .iter()
            .map(|id| format!("  +  {id}"))
            .chain(plan.removals.iter().map(|id| format!("  -  {id}")))
            .collect()
    }
}

fn join_ids(ids: &BTreeSet<MemberId>) -> String {
    if ids.is_empty() {
        return "(nobody)".to_string();
    }
    ids.iter().map(|id| id.0.as_str()).collect::<Vec<_>>().join(", ")
}

// ---------------------------------------------------------------------------
// Reconciler
// ---------------------------------------------------------------------------

/// Reconciles one group against one week's assignment.
pub struct Reconciler<'a> {
    group: &'a GroupId,
    mapping: &'a IdentifierMapping,
    mode: ModeController,
    gateway: Option<&'a dyn GroupGateway>,
}

impl<'a> Reconciler<'a> {
    /// `gateway` is `None` when no credentials are configured; the mode
    /// controller treats that as uncredentialed.
    pub fn new(
        group: &'a GroupId,
        mapping: &'a IdentifierMapping,
        dry_run: bool,
        gateway: Option<&'a dyn GroupGateway>,
    ) -> Self {
        Self {
            group,
            mapping,
            mode: ModeController::new(dry_run, gateway.is_some()),
            gateway,
        }
    }

    pub fn reconcile(&self, assignment: &DutyAssignment) -> ReconcileReport {
        let dry_run = self.mode.is_dry_run();

        let double = assignment.double_booked();
        if !double.is_empty() {
            let names: Vec<&str> = double.iter().map(|n| n.0.as_str()).collect();
            return ReconcileReport::configuration_error(
                self.group,
                dry_run,
                format!(
                    "names listed under both duties this week: {}",
                    names.join(", ")
                ),
            );
        }

        let target = build_target(assignment, self.mapping);
        let outcome = self.resolve(target.members);
        ReconcileReport {
            group: Some(self.group.clone()),
            dry_run,
            unmapped: target.unmapped,
            outcome,
        }
    }

    fn resolve(&self, target: BTreeSet<MemberId>) -> ReconcileOutcome {
        let gateway = match (self.mode.plan(), self.gateway) {
            (ExecutionPlan::ReadOnly | ExecutionPlan::ReadWrite, Some(gateway)) => gateway,
            (ExecutionPlan::Refuse, _) | (ExecutionPlan::ReadWrite, None) => {
                return ReconcileOutcome::ConfigurationError {
                    reason: "live mode requires messaging-service credentials; refusing to update the group without reading it first".to_string(),
                };
            }
            (ExecutionPlan::Simulate, _) | (ExecutionPlan::ReadOnly, None) => {
                return ReconcileOutcome::Approximate {
                    ensure_present: target,
                };
            }
        };

        tracing::debug!("reading members of group {}", self.group);
        let current = match gateway.read_members(self.group) {
            Ok(current) => current,
            Err(err) => {
                tracing::warn!("could not read members of group {}: {err}", self.group);
                return ReconcileOutcome::Degraded {
                    ensure_present: target,
                    reason: err.to_string(),
                };
            }
        };

        let partition = classify(&current, self.mapping);
        let desired: BTreeSet<MemberId> = partition.non_managed.union(&target).cloned().collect();
        let plan = DiffPlan::between(&current, &desired);

        if plan.is_empty() {
            return ReconcileOutcome::UpToDate { desired };
        }
        if !self.mode.may_write() {
            return ReconcileOutcome::Simulated { plan, desired };
        }

        tracing::debug!(
            "writing {} members to group {} ({})",
            desired.len(),
            self.group,
            plan.counts()
        );
        match gateway.write_members(self.group, &desired) {
            Ok(()) => ReconcileOutcome::Applied { plan, desired },
            Err(err) => {
                tracing::error!("failed to update group {}: {err}", self.group);
                ReconcileOutcome::WriteFailed {
                    plan,
                    error: err.to_string(),
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
