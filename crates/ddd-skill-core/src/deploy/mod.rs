//! Skill deployment: scope selection, target resolution, install / uninstall / status.
//!
//! Install and uninstall converge a target to a desired state (package present
//! and identical, or absent), so running either twice is safe.

pub mod installer;
pub mod scope;
pub mod target;

pub use installer::{
    install, status, uninstall, InstallOutcome, InstallReport, InstallStatus, StatusReport,
    UninstallOutcome,
};
pub use scope::{select_scope, Scope};
pub use target::{InstallTarget, ScopeRoots, SKILLS_DIR};
