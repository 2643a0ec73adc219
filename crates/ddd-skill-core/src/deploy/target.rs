//! Installation targets: where a scope puts the package on disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::scope::Scope;
use crate::config::PathsConfig;
use crate::error::{DeployError, IoResultExt, Result};

/// Directory under each scope root that holds installed skill packages.
pub const SKILLS_DIR: &str = "skills";

/// Root directories for both scopes.
#[derive(Debug, Clone)]
pub struct ScopeRoots {
    /// `None` when no home directory resolves and no override is set.
    global: Option<PathBuf>,
    local: PathBuf,
}

impl ScopeRoots {
    pub fn new(global: Option<PathBuf>, local: PathBuf) -> Self {
        Self { global, local }
    }

    /// Global root from config (`DDD_SKILL_HOME` or `~/.claude`); local root is
    /// the current directory.
    pub fn from_env() -> Result<Self> {
        let local = std::env::current_dir().at(Path::new("."))?;
        Ok(Self::new(PathsConfig::from_env().global_root(), local))
    }

    pub fn root(&self, scope: Scope) -> Result<&Path> {
        match scope {
            Scope::Global => self
                .global
                .as_deref()
                .ok_or(DeployError::HomeDirUnavailable),
            Scope::Local => Ok(&self.local),
        }
    }

    /// `<scope-root>/skills/<package_name>`
    pub fn target(&self, scope: Scope, package_name: &str) -> Result<InstallTarget> {
        let root = self.root(scope)?.to_path_buf();
        let dir = root.join(SKILLS_DIR).join(package_name);
        Ok(InstallTarget { scope, root, dir })
    }
}

/// A resolved installation location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
    scope: Scope,
    root: PathBuf,
    dir: PathBuf,
}

impl InstallTarget {
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Scope root; never removed by uninstall.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Package directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Metadata of whatever occupies the package path, without following links.
    /// `None` when nothing is there; any other lookup failure is an error.
    pub fn metadata(&self) -> Result<Option<fs::Metadata>> {
        match fs::symlink_metadata(&self.dir) {
            Ok(meta) => Ok(Some(meta)),
            Err(e) if is_absent(&e) => Ok(None),
            Err(e) => Err(DeployError::io(&self.dir, e)),
        }
    }

    /// Something (file, directory, or link) occupies the package path.
    pub fn exists(&self) -> Result<bool> {
        Ok(self.metadata()?.is_some())
    }

    /// Installed means the package directory exists and is non-empty.
    pub fn is_installed(&self) -> Result<bool> {
        match fs::read_dir(&self.dir) {
            Ok(mut entries) => Ok(entries.next().is_some()),
            Err(e) if is_absent(&e) => Ok(false),
            Err(e) => Err(DeployError::io(&self.dir, e)),
        }
    }
}

/// The path (or one of its parents) is missing or is not a directory.
pub(crate) fn is_absent(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}
