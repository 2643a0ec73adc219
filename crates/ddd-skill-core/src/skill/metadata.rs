use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

/// Entry-point file every skill directory carries.
pub const SKILL_MD: &str = "SKILL.md";

/// Front matter fields the installer cares about. Unknown keys are ignored.
#[derive(Deserialize, Debug, Clone, Default)]
struct FrontMatter {
    #[serde(default)]
    name: String,

    #[serde(default)]
    description: Option<String>,
}

/// Skill metadata parsed from SKILL.md YAML front matter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillMetadata {
    pub name: String,
    pub description: Option<String>,
}

fn front_matter_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)^---\s*\r?\n(.*?)\r?\n---").expect("SKILL.md front matter regex is valid")
    })
}

/// Extract metadata from the `---` delimited YAML block at the top of `content`.
pub fn parse_front_matter(content: &str) -> Result<SkillMetadata> {
    let captures = front_matter_re()
        .captures(content)
        .ok_or_else(|| anyhow::anyhow!("No YAML front matter found in SKILL.md"))?;

    let yaml_content = captures
        .get(1)
        .ok_or_else(|| anyhow::anyhow!("Failed to extract YAML content"))?
        .as_str();

    let front_matter: FrontMatter = serde_yaml::from_str(yaml_content)
        .with_context(|| "Failed to parse YAML front matter")?;

    if front_matter.name.trim().is_empty() {
        anyhow::bail!("Skill name is required in SKILL.md");
    }

    Ok(SkillMetadata {
        name: front_matter.name.trim().to_string(),
        description: front_matter
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
    })
}
