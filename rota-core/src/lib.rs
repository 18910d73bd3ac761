//! Rota core library: domain types, identifier mapping, schedule source, config.
//!
//! Public API surface:
//! - [`types`]: newtypes and duty assignment structs
//! - [`mapping`]: bijective name → member identifier table
//! - [`schedule`]: weekly rotation table parsing and week lookup
//! - [`config`]: layered file + environment configuration
//! - [`error`]: [`ScheduleError`], [`MappingError`], [`ConfigError`]

pub mod config;
pub mod error;
pub mod mapping;
pub mod schedule;
pub mod types;

pub use config::{MappingInput, RotaConfig, SlackSettings};
pub use error::{ConfigError, MappingError, ScheduleError};
pub use mapping::IdentifierMapping;
pub use schedule::{CycleInfo, Schedule, ScheduleWeek};
pub use types::{DutyAssignment, DutyCategory, GroupId, MemberId, PersonName};
