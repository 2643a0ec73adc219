//! Skill discovery inside an installed package directory.
//!
//! A package directory holds one entry skill (`SKILL.md` at its root) and any
//! number of sub-skills, each a direct child directory containing `SKILL.md`.

use std::fs;
use std::path::Path;

use super::metadata::{self, SKILL_MD};

/// One skill found in a package, described by its front matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillSummary {
    /// Directory relative to the package root; empty for the entry skill.
    pub rel_dir: String,
    pub name: String,
    pub description: Option<String>,
}

impl SkillSummary {
    /// Build from SKILL.md text. Unparseable front matter falls back to `fallback_name`.
    pub fn from_skill_md(rel_dir: &str, content: &str, fallback_name: &str) -> Self {
        match metadata::parse_front_matter(content) {
            Ok(meta) => Self {
                rel_dir: rel_dir.to_string(),
                name: meta.name,
                description: meta.description,
            },
            Err(e) => {
                tracing::debug!("No usable front matter in {}/{}: {}", rel_dir, SKILL_MD, e);
                Self {
                    rel_dir: rel_dir.to_string(),
                    name: fallback_name.to_string(),
                    description: None,
                }
            }
        }
    }

    pub fn is_entry_point(&self) -> bool {
        self.rel_dir.is_empty()
    }
}

/// List skills in an installed package directory: entry skill first, then
/// sub-skills sorted by directory name. A missing directory yields nothing.
pub fn installed_skills(package_dir: &Path) -> Vec<SkillSummary> {
    let mut skills = Vec::new();
    if !package_dir.is_dir() {
        return skills;
    }

    let root_name = package_dir
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    if let Ok(content) = fs::read_to_string(package_dir.join(SKILL_MD)) {
        skills.push(SkillSummary::from_skill_md("", &content, &root_name));
    }

    let Ok(entries) = fs::read_dir(package_dir) else {
        return skills;
    };
    let mut children: Vec<_> = entries.flatten().collect();
    children.sort_by_key(|e| e.file_name());
    for entry in children {
        let p = entry.path();
        if !p.is_dir() {
            continue;
        }
        let Ok(content) = fs::read_to_string(p.join(SKILL_MD)) else {
            continue;
        };
        let dir_name = entry.file_name().to_string_lossy().to_string();
        skills.push(SkillSummary::from_skill_md(&dir_name, &content, &dir_name));
    }
    skills
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_installed_skills_missing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(installed_skills(&tmp.path().join("nope")).is_empty());
    }

    #[test]
    fn test_installed_skills_entry_first_then_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        let pkg = tmp.path().join("ddd");
        fs::create_dir_all(pkg.join("domain-event")).unwrap();
        fs::create_dir_all(pkg.join("aggregate")).unwrap();
        fs::create_dir_all(pkg.join("templates")).unwrap();
        fs::write(pkg.join(SKILL_MD), "---\nname: ddd\ndescription: entry\n---\n").unwrap();
        fs::write(
            pkg.join("domain-event").join(SKILL_MD),
            "---\nname: domain-event\n---\n",
        )
        .unwrap();
        fs::write(pkg.join("aggregate").join(SKILL_MD), "no front matter").unwrap();
        fs::write(pkg.join("templates").join("context.md"), "# t").unwrap();

        let skills = installed_skills(&pkg);
        let names: Vec<_> = skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["ddd", "aggregate", "domain-event"]);
        assert!(skills[0].is_entry_point());
        assert_eq!(skills[0].description.as_deref(), Some("entry"));
        assert_eq!(skills[1].description, None);
    }
}
