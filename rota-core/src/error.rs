//! Error types for rota-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading or querying the rotation table.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Underlying I/O failure while reading the table file.
    #[error("I/O error reading schedule at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The schedule file path does not exist.
    #[error("schedule file not found: {path}")]
    NotFound { path: PathBuf },

    /// No row of the table could be parsed.
    #[error("no valid schedule entries found in {source_label}")]
    Empty { source_label: String },

    /// A user-supplied date could not be parsed.
    #[error("invalid date '{input}'; use a format like 'Feb 9, 2026' or '2026-02-09'")]
    InvalidDate { input: String },
}

/// Errors raised while building an [`IdentifierMapping`](crate::IdentifierMapping).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// The mapping text is not a JSON object of string values.
    #[error("malformed user mapping: {0}")]
    Malformed(String),

    /// A name appears more than once.
    #[error("duplicate name '{name}' in user mapping")]
    DuplicateName { name: String },

    /// Two names map to the same member identifier.
    #[error("identifier '{id}' is mapped by both '{first}' and '{second}'")]
    DuplicateIdentifier {
        id: String,
        first: String,
        second: String,
    },

    /// A name or identifier is blank.
    #[error("user mapping contains an empty {field}")]
    Empty { field: &'static str },
}

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure while reading the config file.
    #[error("I/O error reading config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file exists but is not valid YAML for [`RotaConfig`](crate::RotaConfig).
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// An explicitly requested config file is missing.
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    /// `dirs::home_dir()` returned `None`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}
