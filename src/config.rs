use std::env;

use tracing::debug;
use validator::Validate;

use crate::errors::WatcherError;

pub const DEFAULT_PROVIDER_TYPE: &str = "vpc-classic";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Runtime configuration, read once from the environment at startup.
#[derive(Debug, Clone, Validate)]
pub struct Config {
    /// CSI driver name whose volumes this watcher manages.
    #[validate(length(min = 1))]
    pub provisioner_name: String,

    /// Volume type registered for `provisioner_name`.
    #[validate(length(min = 1))]
    pub volume_type: String,

    /// Provider kind stamped on every volume descriptor.
    #[validate(length(min = 1))]
    pub provider_type: String,

    /// Base URL of the block-storage provider API.
    #[validate(url)]
    pub provider_url: String,

    pub provider_token: Option<String>,

    /// Upper bound on reconcile tasks running at once. `None` is unbounded.
    #[validate(range(min = 1))]
    pub max_concurrent_tasks: Option<usize>,

    /// Event reporter instance, usually the controller pod name.
    pub pod_name: Option<String>,

    pub log_level: String,
}

impl Config {
    /// Loads `.env` (if present) and then reads `PVWATCHER_*` variables.
    pub fn from_env() -> Result<Self, WatcherError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so it can be tested
    /// without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, WatcherError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| WatcherError::Config(format!("missing required variable {key}")))
        };

        let max_concurrent_tasks = match lookup("PVWATCHER_MAX_CONCURRENT_TASKS") {
            Some(raw) if !raw.trim().is_empty() => Some(raw.trim().parse::<usize>().map_err(|e| {
                WatcherError::Config(format!(
                    "PVWATCHER_MAX_CONCURRENT_TASKS must be a positive integer: {e}"
                ))
            })?),
            _ => None,
        };

        let config = Self {
            provisioner_name: required("PVWATCHER_PROVISIONER_NAME")?,
            volume_type: required("PVWATCHER_VOLUME_TYPE")?,
            provider_type: lookup("PVWATCHER_PROVIDER_TYPE")
                .unwrap_or_else(|| DEFAULT_PROVIDER_TYPE.to_string()),
            provider_url: required("PVWATCHER_PROVIDER_URL")?,
            provider_token: lookup("PVWATCHER_PROVIDER_TOKEN").filter(|t| !t.is_empty()),
            max_concurrent_tasks,
            pod_name: lookup("POD_NAME").filter(|p| !p.is_empty()),
            log_level: lookup("PVWATCHER_LOG_LEVEL")
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        };

        config.validate()?;
        Ok(config)
    }
}
