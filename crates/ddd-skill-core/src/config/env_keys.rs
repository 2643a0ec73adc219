//! Environment variable keys and aliases.
//!
//! Primary keys use the `DDD_SKILL_*` prefix. Aliases are checked in order
//! when the primary key is unset.

/// Scope roots
pub mod paths {
    /// Global scope root (the host tool's per-user config directory).
    pub const DDD_SKILL_HOME: &str = "DDD_SKILL_HOME";
    pub const HOME_ALIASES: &[&str] = &["CLAUDE_CONFIG_DIR"];
}

/// Observability and logging
pub mod observability {
    pub const DDD_SKILL_QUIET: &str = "DDD_SKILL_QUIET";

    pub const DDD_SKILL_LOG_LEVEL: &str = "DDD_SKILL_LOG_LEVEL";

    pub const DDD_SKILL_LOG_JSON: &str = "DDD_SKILL_LOG_JSON";
}
