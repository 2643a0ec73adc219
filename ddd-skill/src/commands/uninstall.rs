//! `ddd-skill uninstall`

use anyhow::{Context, Result};

use ddd_skill_core::deploy::{self, ScopeRoots, UninstallOutcome};
use ddd_skill_core::skill::PACKAGE_NAME;

use super::{resolve_scope, scope_label};
use crate::cli::ScopeArgs;
use crate::prompt::ScopePrompt;

pub fn cmd_uninstall(
    args: &ScopeArgs,
    roots: &ScopeRoots,
    prompt: &mut dyn ScopePrompt,
) -> Result<()> {
    let scope = resolve_scope(args, roots, prompt, "uninstall")?;
    let target = roots.target(scope, PACKAGE_NAME)?;

    let outcome = deploy::uninstall(&target).with_context(|| {
        format!("Failed to uninstall DDD skills from {}", target.dir().display())
    })?;

    match outcome {
        UninstallOutcome::NotInstalled => {
            eprintln!(
                "DDD skills are not installed at this location ({}): {}",
                scope_label(target.scope()),
                target.dir().display()
            );
        }
        UninstallOutcome::Removed { skill_count } => {
            eprintln!(
                "✓ DDD skills ({}) uninstalled from: {}",
                scope_label(target.scope()),
                target.dir().display()
            );
            eprintln!("  Removed {} skill(s).", skill_count);
        }
    }
    Ok(())
}
