//! Weekly rotation schedule: parsing and week lookup.
//!
//! # Table format
//!
//! ```text
//! ├───────────────┼────────────────────────┼──────────────────┤
//! | Week starting | Release artistry (3)   | Focused work (2) |
//! ├───────────────┼────────────────────────┼──────────────────┤
//! | Feb 9, 2026   | Fabio, Michael, Luis   | Daniele, Joep    |
//! ├───────────────┼────────────────────────┼──────────────────┤
//! | Feb 16, 2026  | Daniele, Joep, Fabio   | Michael, Luis    |
//! ```
//!
//! Only rows whose first cell parses as a `Mon D, YYYY` date are kept; every
//! other line is ignored. Rows form a repeating cycle: the week after the
//! last row is the first row again.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::ScheduleError;
use crate::types::{DutyAssignment, PersonName};

/// Date format used in the table and in announcements.
pub const TABLE_DATE_FORMAT: &str = "%b %d, %Y";

/// One row of the rotation table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleWeek {
    pub starts: NaiveDate,
    pub assignment: DutyAssignment,
}

/// Summary of the repeating cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleInfo {
    pub cycle_length: usize,
    pub start_date: String,
    pub end_date: String,
}

/// Parsed rotation table, sorted by week start. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    weeks: Vec<ScheduleWeek>,
}

impl Schedule {
    /// Parse table text. `source_label` names the origin in error messages.
    pub fn parse(content: &str, source_label: &str) -> Result<Self, ScheduleError> {
        let mut weeks: Vec<ScheduleWeek> = content.lines().filter_map(parse_line).collect();
        if weeks.is_empty() {
            return Err(ScheduleError::Empty {
                source_label: source_label.to_owned(),
            });
        }
        weeks.sort_by_key(|w| w.starts);
        Ok(Self { weeks })
    }

    /// Read and parse a table file.
    pub fn load(path: &Path) -> Result<Self, ScheduleError> {
        if !path.exists() {
            return Err(ScheduleError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ScheduleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, &path.display().to_string())
    }

    /// Resolve a `SCHEMA`-style value: inline table content when it spans
    /// lines or starts with a table character, otherwise a file path.
    pub fn from_source(value: &str) -> Result<Self, ScheduleError> {
        if is_inline_table(value) {
            Self::parse(value, "content")
        } else {
            Self::load(&PathBuf::from(value.trim()))
        }
    }

    pub fn weeks(&self) -> &[ScheduleWeek] {
        &self.weeks
    }

    pub fn cycle_len(&self) -> usize {
        self.weeks.len()
    }

    /// Position of `date` within the cycle.
    ///
    /// Dates before the first row wrap backwards through the cycle.
    pub fn week_index(&self, date: NaiveDate) -> usize {
        let days = (date - self.weeks[0].starts).num_days();
        let cycle = self.weeks.len() as i64;
        days.div_euclid(7).rem_euclid(cycle) as usize
    }

    /// The row in effect for `date`.
    pub fn week_for(&self, date: NaiveDate) -> &ScheduleWeek {
        &self.weeks[self.week_index(date)]
    }

    /// Duty assignment in effect for `date`.
    pub fn assignment_for(&self, date: NaiveDate) -> &DutyAssignment {
        &self.week_for(date).assignment
    }

    pub fn cycle_info(&self) -> CycleInfo {
        let first = self.weeks[0].starts;
        let last = self.weeks[self.weeks.len() - 1].starts;
        CycleInfo {
            cycle_length: self.weeks.len(),
            start_date: format_table_date(first),
            end_date: format_table_date(last),
        }
    }
}

/// Parse `Feb 9, 2026` or ISO `2026-02-09`.
pub fn parse_date(input: &str) -> Result<NaiveDate, ScheduleError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, TABLE_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
        .map_err(|_| ScheduleError::InvalidDate {
            input: input.to_owned(),
        })
}

/// Render a date the way the table and announcements show it (`Feb 09, 2026`).
pub fn format_table_date(date: NaiveDate) -> String {
    date.format(TABLE_DATE_FORMAT).to_string()
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn is_inline_table(value: &str) -> bool {
    let trimmed = value.trim_start();
    value.contains('\n') || trimmed.starts_with('├') || trimmed.starts_with('|')
}

fn parse_line(line: &str) -> Option<ScheduleWeek> {
    let rest = line.trim().strip_prefix('|')?;
    let mut cells = rest.split('|');
    let date_cell = cells.next()?;
    let release_cell = cells.next()?;
    let focused_cell = cells.next()?;
    // A complete row is closed by a trailing pipe.
    cells.next()?;

    let starts = NaiveDate::parse_from_str(date_cell.trim(), TABLE_DATE_FORMAT).ok()?;
    Some(ScheduleWeek {
        starts,
        assignment: DutyAssignment::new(split_names(release_cell), split_names(focused_cell)),
    })
}

fn split_names(cell: &str) -> Vec<PersonName> {
    cell.split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(PersonName::from)
        .collect()
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
