//! Command handlers: install, uninstall, status, list.
//!
//! Handlers print human-readable progress to stderr (listings go to stdout)
//! and leave filesystem work to `ddd_skill_core::deploy`.

mod install;
mod list;
mod status;
mod uninstall;

pub use install::cmd_install;
pub use list::cmd_list;
pub use status::cmd_status;
pub use uninstall::cmd_uninstall;

use anyhow::Result;
use ddd_skill_core::deploy::{Scope, ScopeRoots};
use ddd_skill_core::skill::SkillSummary;

use crate::cli::ScopeArgs;
use crate::prompt::ScopePrompt;

/// Scope from flags, or from the prompt when none was given.
fn resolve_scope(
    args: &ScopeArgs,
    roots: &ScopeRoots,
    prompt: &mut dyn ScopePrompt,
    verb: &str,
) -> Result<Scope> {
    match args.selected()? {
        Some(scope) => Ok(scope),
        None => Ok(prompt.choose(verb, roots)?),
    }
}

fn scope_label(scope: Scope) -> &'static str {
    match scope {
        Scope::Global => "global",
        Scope::Local => "current project",
    }
}

fn print_skills(skills: &[SkillSummary]) {
    for skill in skills {
        eprintln!("  • {}", skill.name);
        if let Some(ref desc) = skill.description {
            eprintln!("    {}", desc);
        }
    }
}
