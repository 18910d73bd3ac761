//! Layered configuration: optional YAML file, then environment variables.
//!
//! # Sources (later wins)
//!
//! ```text
//! <home>/.rota/config.yaml   (or --config <path>)
//! SCHEMA, SLACK_TOKEN, SLACK_CHANNEL, SLACK_USERGROUP_ID, SLACK_USER_MAPPING
//! ```
//!
//! # API pattern
//!
//! - `load_at(home, explicit, env)`: explicit home and env lookup; used in tests
//! - `load(explicit)`: derives home from `dirs::home_dir()` and reads the
//!   process environment, delegates to `_at`

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, MappingError};
use crate::mapping::IdentifierMapping;
use crate::types::GroupId;

pub const ENV_SCHEMA: &str = "SCHEMA";
pub const ENV_SLACK_TOKEN: &str = "SLACK_TOKEN";
pub const ENV_SLACK_CHANNEL: &str = "SLACK_CHANNEL";
pub const ENV_SLACK_USERGROUP: &str = "SLACK_USERGROUP_ID";
pub const ENV_SLACK_USER_MAPPING: &str = "SLACK_USER_MAPPING";

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Unresolved user mapping. Parsed on use so a bad mapping only disables
/// the features that need it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingInput {
    /// JSON object text from `SLACK_USER_MAPPING`.
    Json(String),
    /// Key/value table from the YAML config file.
    Table(BTreeMap<String, String>),
}

impl MappingInput {
    pub fn resolve(&self) -> Result<IdentifierMapping, MappingError> {
        match self {
            MappingInput::Json(text) => IdentifierMapping::from_json(text),
            MappingInput::Table(table) => IdentifierMapping::from_pairs(table.clone()),
        }
    }
}

/// Messaging-service settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SlackSettings {
    pub token: Option<String>,
    pub channel: Option<String>,
    /// Group to reconcile; `None` disables reconciliation entirely.
    pub usergroup: Option<GroupId>,
    pub user_mapping: Option<MappingInput>,
}

/// Fully layered configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RotaConfig {
    /// Table file path or inline table content.
    pub schedule: Option<String>,
    pub slack: SlackSettings,
}

impl RotaConfig {
    /// Write credentials are present.
    pub fn has_credentials(&self) -> bool {
        self.slack.token.is_some()
    }

    /// The group to reconcile, when reconciliation is enabled.
    pub fn group(&self) -> Option<&GroupId> {
        self.slack.usergroup.as_ref()
    }
}

// ---------------------------------------------------------------------------
// On-disk shape
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
struct FileConfig {
    #[serde(default)]
    schedule: Option<String>,
    #[serde(default)]
    slack: FileSlack,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct FileSlack {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    usergroup: Option<String>,
    #[serde(default)]
    user_mapping: Option<BTreeMap<String, String>>,
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// `<home>/.rota/config.yaml`: pure, no I/O.
pub fn default_path_at(home: &Path) -> PathBuf {
    home.join(".rota").join("config.yaml")
}

/// `<home>/.rota/templates`: announcement template overrides.
pub fn templates_dir_at(home: &Path) -> PathBuf {
    home.join(".rota").join("templates")
}

/// Load configuration.
///
/// An `explicit` path must exist; the default path is optional. Environment
/// values override file values; empty strings count as unset.
pub fn load_at<F>(home: &Path, explicit: Option<&Path>, env: F) -> Result<RotaConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let file = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            read_file(path)?
        }
        None => {
            let path = default_path_at(home);
            if path.exists() {
                read_file(&path)?
            } else {
                FileConfig::default()
            }
        }
    };

    let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());

    let user_mapping = env(ENV_SLACK_USER_MAPPING)
        .map(MappingInput::Json)
        .or(file.slack.user_mapping.map(MappingInput::Table));

    Ok(RotaConfig {
        schedule: env(ENV_SCHEMA).or(non_blank(file.schedule)),
        slack: SlackSettings {
            token: env(ENV_SLACK_TOKEN).or(non_blank(file.slack.token)),
            channel: env(ENV_SLACK_CHANNEL).or(non_blank(file.slack.channel)),
            usergroup: env(ENV_SLACK_USERGROUP)
                .or(non_blank(file.slack.usergroup))
                .map(|g| GroupId(g.trim().to_owned())),
            user_mapping,
        },
    })
}

/// `load_at` convenience wrapper over the real home directory and environment.
pub fn load(explicit: Option<&Path>) -> Result<RotaConfig, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
    load_at(&home, explicit, |key| std::env::var(key).ok())
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if contents.trim().is_empty() {
        return Ok(FileConfig::default());
    }
    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
