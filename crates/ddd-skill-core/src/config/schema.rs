//! Typed configuration structs, loaded from environment variables.

use super::env_keys::{observability as obv_keys, paths as path_keys};
use super::loader::{env_bool, env_optional, env_or};
use std::path::PathBuf;

/// Filesystem roots the installer writes under.
#[derive(Debug, Clone)]
pub struct PathsConfig {
    /// Global scope root override. `None` means `~/.claude`.
    pub home: Option<PathBuf>,
}

impl PathsConfig {
    pub fn from_env() -> Self {
        Self {
            home: env_optional(path_keys::DDD_SKILL_HOME, path_keys::HOME_ALIASES)
                .map(PathBuf::from),
        }
    }

    /// Global scope root: the override if set, else `~/.claude`.
    /// `None` only when no home directory can be determined.
    pub fn global_root(&self) -> Option<PathBuf> {
        self.home
            .clone()
            .or_else(|| dirs::home_dir().map(|h| h.join(".claude")))
    }
}

/// Observability config: quiet, log_level, log_json
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
}

impl ObservabilityConfig {
    pub fn from_env() -> &'static Self {
        use std::sync::OnceLock;
        static CACHE: OnceLock<ObservabilityConfig> = OnceLock::new();
        CACHE.get_or_init(|| Self {
            quiet: env_bool(obv_keys::DDD_SKILL_QUIET, &[], false),
            log_level: env_or(obv_keys::DDD_SKILL_LOG_LEVEL, &[], || "warn".to_string()),
            log_json: env_bool(obv_keys::DDD_SKILL_LOG_JSON, &[], false),
        })
    }
}
