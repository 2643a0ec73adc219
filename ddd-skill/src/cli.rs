use clap::{Args, Parser, Subcommand};

use ddd_skill_core::deploy::{select_scope, Scope};
use ddd_skill_core::DeployError;

/// Install or uninstall the DDD skills for Claude Code
#[derive(Parser, Debug)]
#[command(name = "ddd-skill")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install all DDD skills
    Install {
        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Uninstall all DDD skills
    Uninstall {
        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Show whether the DDD skills are installed (both scopes unless one is given)
    Status {
        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// List the skills bundled in this build
    #[command(name = "list", alias = "ls")]
    List,
}

/// Scope selectors shared by every command. At most one may be given.
#[derive(Args, Debug, Clone, Default)]
pub struct ScopeArgs {
    /// Global scope: ~/.claude/skills/ddd/, available in all projects
    #[arg(short = 'g', long = "global")]
    pub global: bool,

    /// Local scope: ./skills/ddd/, only available in this project
    #[arg(short = 'l', long = "local")]
    pub local: bool,

    /// Scope by name (global or local)
    #[arg(long, value_name = "SCOPE")]
    pub scope: Option<String>,
}

impl ScopeArgs {
    /// `Ok(None)` when no selector was given.
    pub fn selected(&self) -> Result<Option<Scope>, DeployError> {
        select_scope(self.global, self.local, self.scope.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_install_flags() {
        let cli = Cli::try_parse_from(["ddd-skill", "install", "-g"]).unwrap();
        let Commands::Install { scope } = cli.command else {
            panic!("expected install");
        };
        assert_eq!(scope.selected().unwrap(), Some(Scope::Global));

        let cli = Cli::try_parse_from(["ddd-skill", "uninstall", "--local"]).unwrap();
        let Commands::Uninstall { scope } = cli.command else {
            panic!("expected uninstall");
        };
        assert_eq!(scope.selected().unwrap(), Some(Scope::Local));
    }

    #[test]
    fn test_parse_scope_option() {
        let cli = Cli::try_parse_from(["ddd-skill", "status", "--scope", "local"]).unwrap();
        let Commands::Status { scope } = cli.command else {
            panic!("expected status");
        };
        assert_eq!(scope.selected().unwrap(), Some(Scope::Local));
    }

    #[test]
    fn test_conflicting_flags_are_invalid_scope() {
        let cli = Cli::try_parse_from(["ddd-skill", "install", "-g", "-l"]).unwrap();
        let Commands::Install { scope } = cli.command else {
            panic!("expected install");
        };
        assert!(matches!(scope.selected(), Err(DeployError::InvalidScope(_))));
    }

    #[test]
    fn test_no_flags_means_prompt() {
        let cli = Cli::try_parse_from(["ddd-skill", "install"]).unwrap();
        let Commands::Install { scope } = cli.command else {
            panic!("expected install");
        };
        assert_eq!(scope.selected().unwrap(), None);
    }

    #[test]
    fn test_missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["ddd-skill"]).is_err());
        assert!(Cli::try_parse_from(["ddd-skill", "upgrade"]).is_err());
    }

    #[test]
    fn test_list_alias() {
        let cli = Cli::try_parse_from(["ddd-skill", "ls"]).unwrap();
        assert!(matches!(cli.command, Commands::List));
    }
}
