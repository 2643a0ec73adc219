//! ddd-skill CLI library: argument parsing, scope prompt, and command dispatch.

mod cli;
mod commands;
mod prompt;

pub use cli::{Cli, Commands, ScopeArgs};
pub use prompt::{InteractivePrompt, LinePrompt, ScopePrompt};

use anyhow::Result;
use clap::Parser;
use ddd_skill_core::deploy::ScopeRoots;
use ddd_skill_core::observability;

/// Run the CLI: parse args, resolve scope roots from the environment, dispatch.
pub fn run_cli() -> Result<()> {
    observability::init_tracing();
    let cli = Cli::parse();
    let roots = ScopeRoots::from_env()?;
    run(cli, &roots, &mut InteractivePrompt)
}

/// Dispatch a parsed command against explicit scope roots.
pub fn run(cli: Cli, roots: &ScopeRoots, prompt: &mut dyn ScopePrompt) -> Result<()> {
    tracing::debug!("Running {:?}", cli.command);
    match cli.command {
        Commands::Install { scope } => commands::cmd_install(&scope, roots, prompt),
        Commands::Uninstall { scope } => commands::cmd_uninstall(&scope, roots, prompt),
        Commands::Status { scope } => commands::cmd_status(&scope, roots),
        Commands::List => commands::cmd_list(),
    }
}
