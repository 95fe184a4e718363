//! Job configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::admin::DEFAULT_OWNER;
use crate::error::ConfigError;
use crate::identity::IdStrategy;

/// Job configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    /// Directory holding `<id>.json` job files.
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,

    /// Owner assigned to new jobs when none is given.
    #[serde(default = "default_owner")]
    pub default_owner: String,

    /// How job IDs are derived.
    #[serde(default)]
    pub id_strategy: IdStrategy,
}

fn default_storage_path() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".runnerjob").join("jobs"))
        .unwrap_or_else(|| PathBuf::from("/tmp/runnerjob/jobs"))
}

fn default_owner() -> String {
    DEFAULT_OWNER.to_string()
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            default_owner: default_owner(),
            id_strategy: IdStrategy::default(),
        }
    }
}

impl JobConfig {
    /// Reject values that would produce unusable jobs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_owner.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "default_owner".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.storage_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage_path".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
