//! `ddd-skill list`

use anyhow::Result;

use ddd_skill_core::skill::SkillPackage;

pub fn cmd_list() -> Result<()> {
    let package = SkillPackage::bundled();
    let skills = package.skills();

    println!(
        "{} v{}: {} skill(s), {} file(s)",
        package.name(),
        package.version(),
        skills.len(),
        package.files().len()
    );
    println!();
    for skill in &skills {
        let location = if skill.is_entry_point() {
            "SKILL.md".to_string()
        } else {
            format!("{}/SKILL.md", skill.rel_dir)
        };
        println!("  {:<16} {}", skill.name, location);
        if let Some(ref desc) = skill.description {
            println!("  {:<16} {}", "", desc);
        }
    }
    Ok(())
}
