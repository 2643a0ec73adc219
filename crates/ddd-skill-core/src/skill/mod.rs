//! Skill package: the bundled DDD skill files, SKILL.md metadata, and discovery
//! of skills inside an installed copy.

pub mod discovery;
pub mod metadata;
pub mod package;

pub use discovery::SkillSummary;
pub use package::{PackageFile, SkillPackage, PACKAGE_NAME};
