//! Install, uninstall, and status for one target.
//!
//! Install stages the package in a temporary sibling directory and renames it
//! into place, so an interrupted copy never leaves a half-written package dir.
//! A previous installation is moved aside first and restored if the final
//! rename fails.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::target::InstallTarget;
use crate::error::{DeployError, IoResultExt, Result};
use crate::skill::discovery::{self, SkillSummary};
use crate::skill::SkillPackage;

const STAGING_PREFIX: &str = ".ddd-skill-staging-";
const BACKUP_PREFIX: &str = ".ddd-skill-previous-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Nothing was installed before.
    Installed,
    /// A different copy was replaced wholesale.
    Replaced,
    /// The installed copy already matched; nothing was written.
    UpToDate,
}

#[derive(Debug, Clone)]
pub struct InstallReport {
    pub target_dir: PathBuf,
    pub outcome: InstallOutcome,
    pub files_written: usize,
    pub skills: Vec<SkillSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UninstallOutcome {
    NotInstalled,
    Removed { skill_count: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStatus {
    NotInstalled,
    UpToDate,
    /// Present but differs from the bundled package.
    Modified,
}

#[derive(Debug, Clone)]
pub struct StatusReport {
    pub target_dir: PathBuf,
    pub status: InstallStatus,
    pub skills: Vec<SkillSummary>,
}

/// Converge `target` to hold exactly `package`.
pub fn install(package: &SkillPackage, target: &InstallTarget) -> Result<InstallReport> {
    install_with(package, target, |from, to| fs::rename(from, to))
}

/// `install` with the directory rename supplied by the caller.
fn install_with<F>(package: &SkillPackage, target: &InstallTarget, rename: F) -> Result<InstallReport>
where
    F: Fn(&Path, &Path) -> io::Result<()>,
{
    package.validate()?;
    let dir = target.dir();
    let skills = package.skills();

    if package.matches_dir(dir) {
        tracing::info!("{} already up to date at {}", package.name(), dir.display());
        return Ok(InstallReport {
            target_dir: dir.to_path_buf(),
            outcome: InstallOutcome::UpToDate,
            files_written: 0,
            skills,
        });
    }

    let was_installed = target.is_installed()?;
    let parent = parent_of(dir);
    fs::create_dir_all(parent).at(parent)?;

    let staging = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempdir_in(parent)
        .at(parent)?;
    let staged = staging.path().join(package.name());
    let files_written = package.write_to(&staged)?;
    tracing::debug!("Staged {} files in {}", files_written, staged.display());

    let backup = if target.exists()? {
        let backup = tempfile::Builder::new()
            .prefix(BACKUP_PREFIX)
            .tempdir_in(parent)
            .at(parent)?;
        let aside = backup.path().join(package.name());
        rename(dir, &aside).at(dir)?;
        tracing::debug!("Moved previous copy aside to {}", aside.display());
        Some((backup, aside))
    } else {
        None
    };

    if let Err(e) = rename(&staged, dir) {
        if let Some((backup, aside)) = backup {
            if let Err(restore) = rename(&aside, dir) {
                // Keep the old copy on disk rather than dropping it with the tempdir.
                let kept = backup.keep();
                tracing::warn!(
                    "Failed to restore previous copy to {} ({}); it is kept at {}",
                    dir.display(),
                    restore,
                    kept.display()
                );
            }
        }
        return Err(DeployError::io(dir, e));
    }

    if let Some((backup, _)) = backup {
        let backup_path = backup.path().to_path_buf();
        if let Err(e) = backup.close() {
            tracing::warn!("Failed to clean up {}: {}", backup_path.display(), e);
        }
    }
    // The staged dir was renamed away; what remains is an empty staging dir.
    let staging_path = staging.path().to_path_buf();
    if let Err(e) = staging.close() {
        tracing::warn!("Failed to clean up {}: {}", staging_path.display(), e);
    }

    let outcome = if was_installed {
        InstallOutcome::Replaced
    } else {
        InstallOutcome::Installed
    };
    tracing::info!(
        "{} v{} {:?} at {} ({} files)",
        package.name(),
        package.version(),
        outcome,
        dir.display(),
        files_written
    );

    Ok(InstallReport {
        target_dir: dir.to_path_buf(),
        outcome,
        files_written,
        skills,
    })
}

/// Converge `target` to absent. Missing targets are a successful no-op.
/// Empty parent directories up to (not including) the scope root are pruned.
pub fn uninstall(target: &InstallTarget) -> Result<UninstallOutcome> {
    let dir = target.dir();
    let Some(meta) = target.metadata()? else {
        tracing::debug!("Nothing installed at {}", dir.display());
        return Ok(UninstallOutcome::NotInstalled);
    };

    let skill_count = if meta.is_dir() {
        let count = discovery::installed_skills(dir).len();
        fs::remove_dir_all(dir).at(dir)?;
        count
    } else {
        fs::remove_file(dir).at(dir)?;
        0
    };
    tracing::info!("Removed {} ({} skills)", dir.display(), skill_count);

    prune_empty_parents(dir, target.root());
    Ok(UninstallOutcome::Removed { skill_count })
}

/// Compare what is installed at `target` with `package`.
pub fn status(package: &SkillPackage, target: &InstallTarget) -> Result<StatusReport> {
    let dir = target.dir();
    let status = if !target.is_installed()? {
        InstallStatus::NotInstalled
    } else if package.matches_dir(dir) {
        InstallStatus::UpToDate
    } else {
        InstallStatus::Modified
    };
    Ok(StatusReport {
        target_dir: dir.to_path_buf(),
        status,
        skills: discovery::installed_skills(dir),
    })
}

fn parent_of(dir: &Path) -> &Path {
    dir.parent().unwrap_or_else(|| Path::new("."))
}

fn prune_empty_parents(dir: &Path, root: &Path) {
    let mut current = dir.parent();
    while let Some(p) = current {
        if p == root || !p.starts_with(root) {
            break;
        }
        let is_empty = fs::read_dir(p)
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(false);
        if !is_empty {
            break;
        }
        if let Err(e) = fs::remove_dir(p) {
            tracing::warn!("Failed to remove empty directory {}: {}", p.display(), e);
            break;
        }
        tracing::debug!("Removed empty directory {}", p.display());
        current = p.parent();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deploy::{Scope, ScopeRoots, SKILLS_DIR};
    use crate::skill::{PackageFile, PACKAGE_NAME};

    fn roots(tmp: &Path) -> ScopeRoots {
        ScopeRoots::new(Some(tmp.join("home").join(".claude")), tmp.join("proj"))
    }

    fn assert_identical(package: &SkillPackage, dir: &Path) {
        for f in package.files() {
            let on_disk = fs::read(f.dest(dir)).unwrap();
            assert_eq!(on_disk, &*f.contents, "{} differs", f.path);
        }
        assert!(package.matches_dir(dir));
    }

    fn leftovers(parent: &Path) -> Vec<String> {
        fs::read_dir(parent)
            .unwrap()
            .flatten()
            .map(|e| e.file_name().to_string_lossy().to_string())
            .filter(|n| n.starts_with(STAGING_PREFIX) || n.starts_with(BACKUP_PREFIX))
            .collect()
    }

    #[test]
    fn test_install_local_writes_package() {
        let tmp = tempfile::tempdir().unwrap();
        let package = SkillPackage::bundled();
        let target = roots(tmp.path()).target(Scope::Local, PACKAGE_NAME).unwrap();

        let report = install(&package, &target).unwrap();
        assert_eq!(report.outcome, InstallOutcome::Installed);
        assert_eq!(report.files_written, package.files().len());
        assert_eq!(report.target_dir, tmp.path().join("proj").join("skills").join("ddd"));
        assert!(report.target_dir.join("SKILL.md").is_file());
        assert!(report.target_dir.join("domain-event").join("SKILL.md").is_file());
        assert_identical(&package, target.dir());
        assert!(leftovers(&tmp.path().join("proj").join(SKILLS_DIR)).is_empty());
    }

    #[test]
    fn test_install_twice_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let package = SkillPackage::bundled();
        let target = roots(tmp.path()).target(Scope::Local, PACKAGE_NAME).unwrap();

        install(&package, &target).unwrap();
        let second = install(&package, &target).unwrap();
        assert_eq!(second.outcome, InstallOutcome::UpToDate);
        assert_eq!(second.files_written, 0);
        assert_identical(&package, target.dir());

        let skills_dir = tmp.path().join("proj").join(SKILLS_DIR);
        let entries: Vec<_> = fs::read_dir(&skills_dir).unwrap().flatten().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_install_replaces_modified_copy() {
        let tmp = tempfile::tempdir().unwrap();
        let package = SkillPackage::bundled();
        let target = roots(tmp.path()).target(Scope::Local, PACKAGE_NAME).unwrap();

        install(&package, &target).unwrap();
        fs::write(target.dir().join("SKILL.md"), "edited").unwrap();
        fs::write(target.dir().join("stray.md"), "left behind?").unwrap();
        fs::create_dir_all(target.dir().join("old-skill")).unwrap();

        let report = install(&package, &target).unwrap();
        assert_eq!(report.outcome, InstallOutcome::Replaced);
        assert!(!target.dir().join("stray.md").exists());
        assert!(!target.dir().join("old-skill").exists());
        assert_identical(&package, target.dir());
        assert!(leftovers(&tmp.path().join("proj").join(SKILLS_DIR)).is_empty());
    }

    #[test]
    fn test_install_over_stray_file() {
        let tmp = tempfile::tempdir().unwrap();
        let package = SkillPackage::bundled();
        let target = roots(tmp.path()).target(Scope::Local, PACKAGE_NAME).unwrap();
        fs::create_dir_all(target.dir().parent().unwrap()).unwrap();
        fs::write(target.dir(), "not a directory").unwrap();

        let report = install(&package, &target).unwrap();
        assert_eq!(report.outcome, InstallOutcome::Installed);
        assert_identical(&package, target.dir());
    }

    #[test]
    fn test_install_rejects_invalid_package() {
        let tmp = tempfile::tempdir().unwrap();
        let target = roots(tmp.path()).target(Scope::Local, PACKAGE_NAME).unwrap();
        let package = SkillPackage::new(
            PACKAGE_NAME,
            "0",
            vec![PackageFile::new("templates/a.md", &b"# a"[..])],
        );
        assert!(install(&package, &target).is_err());
        assert!(!target.exists().unwrap());
    }

    #[test]
    fn test_install_then_uninstall_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let package = SkillPackage::bundled();
        let target = roots(tmp.path()).target(Scope::Local, PACKAGE_NAME).unwrap();

        install(&package, &target).unwrap();
        let outcome = uninstall(&target).unwrap();
        assert_eq!(
            outcome,
            UninstallOutcome::Removed {
                skill_count: package.skills().len()
            }
        );
        assert!(!target.exists().unwrap());
        assert!(!tmp.path().join("proj").join(SKILLS_DIR).exists());
        assert!(tmp.path().join("proj").is_dir());
    }

    #[test]
    fn test_uninstall_keeps_other_skills() {
        let tmp = tempfile::tempdir().unwrap();
        let package = SkillPackage::bundled();
        let target = roots(tmp.path()).target(Scope::Local, PACKAGE_NAME).unwrap();
        install(&package, &target).unwrap();
        let other = tmp.path().join("proj").join(SKILLS_DIR).join("other");
        fs::create_dir_all(&other).unwrap();

        uninstall(&target).unwrap();
        assert!(!target.exists().unwrap());
        assert!(other.is_dir());
    }

    #[test]
    fn test_uninstall_twice_is_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let target = roots(tmp.path()).target(Scope::Local, PACKAGE_NAME).unwrap();

        assert_eq!(uninstall(&target).unwrap(), UninstallOutcome::NotInstalled);
        install(&SkillPackage::bundled(), &target).unwrap();
        assert!(matches!(
            uninstall(&target).unwrap(),
            UninstallOutcome::Removed { .. }
        ));
        assert_eq!(uninstall(&target).unwrap(), UninstallOutcome::NotInstalled);
    }

    #[test]
    fn test_scopes_are_independent() {
        let tmp = tempfile::tempdir().unwrap();
        let package = SkillPackage::bundled();
        let roots = roots(tmp.path());
        let global = roots.target(Scope::Global, PACKAGE_NAME).unwrap();
        let local = roots.target(Scope::Local, PACKAGE_NAME).unwrap();

        install(&package, &global).unwrap();
        assert!(global.is_installed().unwrap());
        assert!(!local.exists().unwrap());

        install(&package, &local).unwrap();
        uninstall(&global).unwrap();
        assert!(!global.exists().unwrap());
        assert!(tmp.path().join("home").join(".claude").is_dir());
        assert_identical(&package, local.dir());
    }

    #[test]
    fn test_status() {
        let tmp = tempfile::tempdir().unwrap();
        let package = SkillPackage::bundled();
        let target = roots(tmp.path()).target(Scope::Local, PACKAGE_NAME).unwrap();

        let report = status(&package, &target).unwrap();
        assert_eq!(report.status, InstallStatus::NotInstalled);
        assert!(report.skills.is_empty());

        install(&package, &target).unwrap();
        let report = status(&package, &target).unwrap();
        assert_eq!(report.status, InstallStatus::UpToDate);
        assert_eq!(report.skills, package.skills());

        fs::remove_file(target.dir().join("templates").join("aggregate.md")).unwrap();
        assert_eq!(
            status(&package, &target).unwrap().status,
            InstallStatus::Modified
        );
    }

    fn in_dir_with_prefix(path: &Path, prefix: &str) -> bool {
        path.parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().starts_with(prefix))
            .unwrap_or(false)
    }

    #[test]
    fn test_failed_swap_restores_previous_copy() {
        let tmp = tempfile::tempdir().unwrap();
        let package = SkillPackage::bundled();
        let target = roots(tmp.path()).target(Scope::Local, PACKAGE_NAME).unwrap();
        install(&package, &target).unwrap();
        fs::write(target.dir().join("SKILL.md"), "edited").unwrap();

        let err = install_with(&package, &target, |from, to| {
            if in_dir_with_prefix(from, STAGING_PREFIX) {
                return Err(io::Error::from(io::ErrorKind::PermissionDenied));
            }
            fs::rename(from, to)
        })
        .unwrap_err();
        assert!(matches!(err, DeployError::Io { .. }));

        let restored = fs::read_to_string(target.dir().join("SKILL.md")).unwrap();
        assert_eq!(restored, "edited");
        assert!(leftovers(&tmp.path().join("proj").join(SKILLS_DIR)).is_empty());
    }

    #[test]
    fn test_failed_restore_keeps_backup_on_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let package = SkillPackage::bundled();
        let target = roots(tmp.path()).target(Scope::Local, PACKAGE_NAME).unwrap();
        install(&package, &target).unwrap();
        fs::write(target.dir().join("SKILL.md"), "edited").unwrap();

        let result = install_with(&package, &target, |from, to| {
            if in_dir_with_prefix(from, STAGING_PREFIX) || in_dir_with_prefix(from, BACKUP_PREFIX) {
                return Err(io::Error::from(io::ErrorKind::PermissionDenied));
            }
            fs::rename(from, to)
        });
        assert!(result.is_err());
        assert!(!target.exists().unwrap());

        let skills_dir = tmp.path().join("proj").join(SKILLS_DIR);
        let kept: Vec<_> = leftovers(&skills_dir)
            .into_iter()
            .filter(|n| n.starts_with(BACKUP_PREFIX))
            .collect();
        assert_eq!(kept.len(), 1);
        let saved = skills_dir.join(&kept[0]).join(PACKAGE_NAME).join("SKILL.md");
        assert_eq!(fs::read_to_string(saved).unwrap(), "edited");
    }

    #[test]
    fn test_uninstall_reports_lookup_failure() {
        let tmp = tempfile::tempdir().unwrap();
        // Interior NUL makes the lookup fail with InvalidInput rather than NotFound.
        let roots = ScopeRoots::new(None, tmp.path().join("bad\0root"));
        let target = roots.target(Scope::Local, PACKAGE_NAME).unwrap();
        assert!(matches!(uninstall(&target), Err(DeployError::Io { .. })));
        assert!(matches!(
            status(&SkillPackage::bundled(), &target),
            Err(DeployError::Io { .. })
        ));
    }

    #[test]
    fn test_uninstall_under_file_is_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let proj = tmp.path().join("proj");
        fs::write(&proj, "not a directory").unwrap();
        let target = ScopeRoots::new(None, proj.clone())
            .target(Scope::Local, PACKAGE_NAME)
            .unwrap();
        assert_eq!(uninstall(&target).unwrap(), UninstallOutcome::NotInstalled);
        assert!(proj.is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_uninstall_permission_denied_fails() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let target = roots(tmp.path()).target(Scope::Local, PACKAGE_NAME).unwrap();
        install(&SkillPackage::bundled(), &target).unwrap();
        let skills_dir = tmp.path().join("proj").join(SKILLS_DIR);
        fs::set_permissions(&skills_dir, fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores mode bits; only check when the lock actually holds.
        let locked = fs::symlink_metadata(target.dir()).is_err();
        let result = uninstall(&target);
        fs::set_permissions(&skills_dir, fs::Permissions::from_mode(0o755)).unwrap();
        if locked {
            assert!(matches!(result, Err(DeployError::Io { .. })));
            assert!(target.is_installed().unwrap());
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_install_replaces_unreadable_copy() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let package = SkillPackage::bundled();
        let target = roots(tmp.path()).target(Scope::Local, PACKAGE_NAME).unwrap();
        install(&package, &target).unwrap();
        let locked = target.dir().join("templates").join("aggregate.md");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let report = install(&package, &target).unwrap();
        if report.outcome != InstallOutcome::UpToDate {
            assert_eq!(report.outcome, InstallOutcome::Replaced);
        }
        assert_identical(&package, target.dir());
    }
}
