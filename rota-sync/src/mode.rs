//! Mode controller: which remote calls a run may make.
//!
//! | Mode    | Credentials | Plan        | Remote calls       |
//! |---------|-------------|-------------|--------------------|
//! | dry-run | absent      | `Simulate`  | none               |
//! | dry-run | present     | `ReadOnly`  | read               |
//! | live    | present     | `ReadWrite` | read, write        |
//! | live    | absent      | `Refuse`    | none (config error)|
//!
//! The plan is fixed when the controller is built and never changes during
//! a run.

/// Whether effects are applied or only reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Live,
    DryRun,
}

/// Remote calls permitted for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionPlan {
    Simulate,
    ReadOnly,
    ReadWrite,
    Refuse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeController {
    mode: RunMode,
    credentialed: bool,
}

impl ModeController {
    pub fn new(dry_run: bool, credentialed: bool) -> Self {
        let mode = if dry_run { RunMode::DryRun } else { RunMode::Live };
        Self { mode, credentialed }
    }

    pub fn is_dry_run(&self) -> bool {
        self.mode == RunMode::DryRun
    }

    pub fn plan(&self) -> ExecutionPlan {
        match (self.mode, self.credentialed) {
            (RunMode::DryRun, false) => ExecutionPlan::Simulate,
            (RunMode::DryRun, true) => ExecutionPlan::ReadOnly,
            (RunMode::Live, true) => ExecutionPlan::ReadWrite,
            (RunMode::Live, false) => ExecutionPlan::Refuse,
        }
    }

    pub fn may_read(&self) -> bool {
        matches!(self.plan(), ExecutionPlan::ReadOnly | ExecutionPlan::ReadWrite)
    }

    pub fn may_write(&self) -> bool {
        self.plan() == ExecutionPlan::ReadWrite
    }
}
