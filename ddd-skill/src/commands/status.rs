//! `ddd-skill status`

use anyhow::Result;

use ddd_skill_core::deploy::{self, InstallStatus, Scope, ScopeRoots};
use ddd_skill_core::skill::SkillPackage;
use ddd_skill_core::DeployError;

use crate::cli::ScopeArgs;

/// Status never prompts: with no scope selector it reports both scopes.
pub fn cmd_status(args: &ScopeArgs, roots: &ScopeRoots) -> Result<()> {
    let scopes: Vec<Scope> = match args.selected()? {
        Some(scope) => vec![scope],
        None => Scope::ALL.to_vec(),
    };
    let package = SkillPackage::bundled();

    println!("{} v{} (bundled)", package.name(), package.version());
    for scope in scopes {
        let target = match roots.target(scope, package.name()) {
            Ok(t) => t,
            Err(DeployError::HomeDirUnavailable) => {
                println!("  {:<7} unavailable (no home directory)", scope.as_str());
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        let report = deploy::status(&package, &target)?;
        let label = match report.status {
            InstallStatus::NotInstalled => "✗ not installed",
            InstallStatus::UpToDate => "✓ up to date",
            InstallStatus::Modified => "⚠ modified (run install to restore)",
        };
        println!(
            "  {:<7} {}  {}",
            scope.as_str(),
            label,
            report.target_dir.display()
        );
        for skill in &report.skills {
            println!("            • {}", skill.name);
        }
    }
    Ok(())
}
