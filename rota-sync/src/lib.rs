//! # rota-sync
//!
//! Membership reconciliation for the rotation's user group.
//!
//! Current members are split into managed (present in the identifier
//! mapping) and non-managed sets; the desired membership is the non-managed
//! set plus this week's release artistry members. [`Reconciler::reconcile`]
//! diffs that against the remote group and writes the full desired set only
//! when something changed. [`pipeline::run`] sequences the weekly
//! announcement before reconciliation.

pub mod classify;
pub mod error;
pub mod gateway;
pub mod mode;
pub mod pipeline;
pub mod plan;
pub mod reconcile;
pub mod target;

pub use classify::{classify, Partition};
pub use error::GatewayError;
pub use gateway::{Announcer, GroupGateway};
pub use mode::{ExecutionPlan, ModeController, RunMode};
pub use plan::DiffPlan;
pub use reconcile::{ReconcileOutcome, ReconcileReport, Reconciler};
pub use target::{build_target, TargetSet};
