//! `ddd-skill install`

use anyhow::{Context, Result};

use ddd_skill_core::deploy::{self, InstallOutcome, InstallTarget, ScopeRoots};
use ddd_skill_core::skill::SkillPackage;

use super::{print_skills, resolve_scope, scope_label};
use crate::cli::ScopeArgs;
use crate::prompt::ScopePrompt;

pub fn cmd_install(
    args: &ScopeArgs,
    roots: &ScopeRoots,
    prompt: &mut dyn ScopePrompt,
) -> Result<()> {
    let scope = resolve_scope(args, roots, prompt, "install")?;
    let package = SkillPackage::bundled();
    let target = roots.target(scope, package.name())?;

    eprintln!();
    eprintln!(
        "🚀 Installing DDD skills v{} ({})...",
        package.version(),
        scope_label(target.scope())
    );
    eprintln!("   Target: {}", target.dir().display());
    if let Some(notice) = pre_install_notice(&package, &target)? {
        eprintln!("{}", notice);
    }

    let report = deploy::install(&package, &target)
        .with_context(|| format!("Failed to install DDD skills to {}", target.dir().display()))?;

    eprintln!();
    match report.outcome {
        InstallOutcome::Installed => {
            eprintln!("✓ Installed {} file(s)", report.files_written);
        }
        InstallOutcome::Replaced => {
            eprintln!(
                "✓ Replaced existing installation ({} file(s) written)",
                report.files_written
            );
        }
        InstallOutcome::UpToDate => {
            eprintln!("✓ DDD skills are already installed and up to date");
        }
    }

    eprintln!();
    eprintln!("{}", "=".repeat(50));
    eprintln!(
        "{} skill(s) available at {}",
        report.skills.len(),
        report.target_dir.display()
    );
    eprintln!();
    print_skills(&report.skills);
    eprintln!("{}", "=".repeat(50));
    if let Some(entry) = report.skills.iter().find(|s| s.is_entry_point()) {
        eprintln!();
        eprintln!("💡 Usage: type /{} in Claude Code to start a session", entry.name);
    }
    Ok(())
}

/// What install is about to do to the target, printed before anything is written.
fn pre_install_notice(package: &SkillPackage, target: &InstallTarget) -> Result<Option<String>> {
    let dir = target.dir().display();
    if !target.exists()? {
        Ok(Some(format!("📁 Creating {}", dir)))
    } else if target.is_installed()? && !package.matches_dir(target.dir()) {
        Ok(Some(format!("⚠ Replacing existing installation at {}", dir)))
    } else {
        Ok(None)
    }
}
