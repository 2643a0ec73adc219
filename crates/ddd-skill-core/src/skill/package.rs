//! The DDD skill package bundled into the binary at compile time.
//!
//! Files are embedded with `include_str!` from `skills/ddd/` in this crate and
//! written out verbatim on install. The package is read-only at runtime.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use super::discovery::SkillSummary;
use super::metadata::SKILL_MD;
use crate::error::{DeployError, IoResultExt, Result};

/// Directory name the package installs under (`<scope-root>/skills/ddd`).
pub const PACKAGE_NAME: &str = "ddd";

const BUNDLED_FILES: &[(&str, &str)] = &[
    ("SKILL.md", include_str!("../../skills/ddd/SKILL.md")),
    (
        "bounded-context/SKILL.md",
        include_str!("../../skills/ddd/bounded-context/SKILL.md"),
    ),
    (
        "aggregate/SKILL.md",
        include_str!("../../skills/ddd/aggregate/SKILL.md"),
    ),
    (
        "domain-event/SKILL.md",
        include_str!("../../skills/ddd/domain-event/SKILL.md"),
    ),
    (
        "templates/context-map.md",
        include_str!("../../skills/ddd/templates/context-map.md"),
    ),
    (
        "templates/aggregate.md",
        include_str!("../../skills/ddd/templates/aggregate.md"),
    ),
    (
        "templates/domain-event.md",
        include_str!("../../skills/ddd/templates/domain-event.md"),
    ),
];

/// One file of the package. `path` is relative and `/`-separated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFile {
    pub path: String,
    pub contents: Cow<'static, [u8]>,
}

impl PackageFile {
    pub fn new(path: impl Into<String>, contents: impl Into<Cow<'static, [u8]>>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    /// Path on disk under `root`.
    pub fn dest(&self, root: &Path) -> PathBuf {
        self.path
            .split('/')
            .filter(|s| !s.is_empty())
            .fold(root.to_path_buf(), |acc, part| acc.join(part))
    }
}

/// An immutable, versioned bundle of skill files.
#[derive(Debug, Clone)]
pub struct SkillPackage {
    name: String,
    version: String,
    files: Vec<PackageFile>,
}

impl SkillPackage {
    pub fn new(name: impl Into<String>, version: impl Into<String>, files: Vec<PackageFile>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            files,
        }
    }

    /// The package compiled into this build.
    pub fn bundled() -> Self {
        let files = BUNDLED_FILES
            .iter()
            .map(|&(path, contents)| PackageFile::new(path, contents.as_bytes()))
            .collect();
        Self::new(PACKAGE_NAME, env!("CARGO_PKG_VERSION"), files)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn files(&self) -> &[PackageFile] {
        &self.files
    }

    /// The root `SKILL.md`.
    pub fn entry_point(&self) -> Option<&PackageFile> {
        self.files.iter().find(|f| f.path == SKILL_MD)
    }

    /// Reject packages that could not be installed safely: no files, no root
    /// SKILL.md, or a path escaping the install directory.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() || !is_plain_relative(&self.name) || self.name.contains('/') {
            return Err(DeployError::InvalidPackage(format!(
                "bad package name '{}'",
                self.name
            )));
        }
        if self.files.is_empty() {
            return Err(DeployError::InvalidPackage("package has no files".into()));
        }
        if self.entry_point().is_none() {
            return Err(DeployError::InvalidPackage(format!(
                "package '{}' has no root {}",
                self.name, SKILL_MD
            )));
        }
        let mut seen = BTreeSet::new();
        for f in &self.files {
            if !is_plain_relative(&f.path) {
                return Err(DeployError::InvalidPackage(format!(
                    "file path escapes the package directory: {}",
                    f.path
                )));
            }
            if !seen.insert(f.path.as_str()) {
                return Err(DeployError::InvalidPackage(format!(
                    "duplicate file path: {}",
                    f.path
                )));
            }
        }
        Ok(())
    }

    /// Entry skill plus every `<dir>/SKILL.md` sub-skill, described by front matter.
    pub fn skills(&self) -> Vec<SkillSummary> {
        let mut skills: Vec<SkillSummary> = self
            .files
            .iter()
            .filter_map(|f| {
                let rel_dir = if f.path == SKILL_MD {
                    ""
                } else {
                    let dir = f.path.strip_suffix(SKILL_MD)?.strip_suffix('/')?;
                    if dir.contains('/') {
                        return None;
                    }
                    dir
                };
                let fallback = if rel_dir.is_empty() { self.name.as_str() } else { rel_dir };
                Some(SkillSummary::from_skill_md(
                    rel_dir,
                    &String::from_utf8_lossy(&f.contents),
                    fallback,
                ))
            })
            .collect();
        skills.sort_by(|a, b| {
            (!a.is_entry_point(), &a.rel_dir).cmp(&(!b.is_entry_point(), &b.rel_dir))
        });
        skills
    }

    /// Write every file under `dest`, creating directories as needed.
    /// Returns the number of files written.
    pub fn write_to(&self, dest: &Path) -> Result<usize> {
        fs::create_dir_all(dest).at(dest)?;
        for f in &self.files {
            let path = f.dest(dest);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).at(parent)?;
            }
            fs::write(&path, &*f.contents).at(&path)?;
            tracing::debug!("Wrote {}", path.display());
        }
        Ok(self.files.len())
    }

    /// True when `dir` holds exactly this package: same files, same bytes,
    /// no extra files or directories. Anything under `dir` that cannot be
    /// walked or read counts as a mismatch.
    pub fn matches_dir(&self, dir: &Path) -> bool {
        if !dir.is_dir() {
            return false;
        }
        match self.compare_dir(dir) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::debug!("Treating {} as modified: {}", dir.display(), e);
                false
            }
        }
    }

    fn compare_dir(&self, dir: &Path) -> io::Result<bool> {
        let expected_files: BTreeSet<&str> = self.files.iter().map(|f| f.path.as_str()).collect();
        let expected_dirs: BTreeSet<String> = self
            .files
            .iter()
            .flat_map(|f| {
                let parts: Vec<&str> = f.path.split('/').collect();
                (1..parts.len())
                    .map(|n| parts[..n].join("/"))
                    .collect::<Vec<_>>()
            })
            .collect();

        let mut found_files = BTreeSet::new();
        for entry in WalkDir::new(dir).min_depth(1) {
            let entry = entry?;
            let rel = relative_slash_path(dir, entry.path());
            let file_type = entry.file_type();
            if file_type.is_dir() {
                if !expected_dirs.contains(&rel) {
                    return Ok(false);
                }
            } else if file_type.is_file() {
                if !expected_files.contains(rel.as_str()) {
                    return Ok(false);
                }
                found_files.insert(rel);
            } else {
                return Ok(false);
            }
        }
        if found_files.len() != expected_files.len() {
            return Ok(false);
        }

        for f in &self.files {
            if fs::read(f.dest(dir))? != &*f.contents {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Relative, non-empty, and made only of normal components.
fn is_plain_relative(path: &str) -> bool {
    let p = Path::new(path);
    !path.is_empty()
        && !path.starts_with('/')
        && !path.contains('\\')
        && p.components().all(|c| matches!(c, Component::Normal(_)))
}

fn relative_slash_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
