use anyhow::Result;

fn main() -> Result<()> {
    ddd_skill::run_cli()
}
