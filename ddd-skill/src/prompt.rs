//! Interactive scope selection, used when no scope flag is given.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use ddd_skill_core::deploy::{Scope, ScopeRoots};
use ddd_skill_core::skill::PACKAGE_NAME;
use ddd_skill_core::DeployError;

/// Asks the user which scope to act on.
pub trait ScopePrompt {
    /// `verb` completes "Where would you like to {verb} the DDD skills?".
    fn choose(&mut self, verb: &str, roots: &ScopeRoots) -> Result<Scope, DeployError>;
}

/// One menu line per scope: label, resolved path, and what it means.
fn menu_items(roots: &ScopeRoots) -> Vec<String> {
    Scope::ALL
        .iter()
        .map(|&scope| {
            let path = roots
                .target(scope, PACKAGE_NAME)
                .map(|t| t.dir().display().to_string())
                .unwrap_or_else(|_| "unavailable: no home directory".to_string());
            let hint = match scope {
                Scope::Global => "available in all projects",
                Scope::Local => "only available in this project",
            };
            let label = match scope {
                Scope::Global => "Global",
                Scope::Local => "Local ",
            };
            format!("{}   ({})  {}", label, path, hint)
        })
        .collect()
}

/// Arrow-key menu on a terminal; numbered line input otherwise.
pub struct InteractivePrompt;

impl ScopePrompt for InteractivePrompt {
    fn choose(&mut self, verb: &str, roots: &ScopeRoots) -> Result<Scope, DeployError> {
        if !io::stdin().is_terminal() {
            let stdin = io::stdin();
            return LinePrompt::new(stdin.lock(), io::stderr()).choose(verb, roots);
        }

        let items = menu_items(roots);
        let selection = dialoguer::Select::new()
            .with_prompt(format!("Where would you like to {} the DDD skills?", verb))
            .items(&items)
            .default(0)
            .interact_opt()
            .map_err(|e| match e {
                dialoguer::Error::IO(e) if e.kind() == io::ErrorKind::Interrupted => {
                    DeployError::PromptCancelled
                }
                dialoguer::Error::IO(e) => DeployError::Io {
                    path: PathBuf::from("<terminal>"),
                    source: e,
                },
            })?;
        match selection {
            Some(i) => Scope::ALL
                .get(i)
                .copied()
                .ok_or(DeployError::PromptCancelled),
            None => Err(DeployError::PromptCancelled),
        }
    }
}

/// Reads choices line by line. Re-asks on anything other than `1`/`2` or a
/// scope name; end of input cancels.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn write_menu(&mut self, verb: &str, roots: &ScopeRoots) -> io::Result<()> {
        writeln!(self.output, "Where would you like to {} the DDD skills?", verb)?;
        writeln!(self.output)?;
        for (i, item) in menu_items(roots).iter().enumerate() {
            writeln!(self.output, "  [{}] {}", i + 1, item)?;
        }
        writeln!(self.output)?;
        Ok(())
    }
}

fn parse_choice(answer: &str) -> Option<Scope> {
    match answer.trim() {
        "1" => Some(Scope::Global),
        "2" => Some(Scope::Local),
        other => other.parse().ok(),
    }
}

impl<R: BufRead, W: Write> ScopePrompt for LinePrompt<R, W> {
    fn choose(&mut self, verb: &str, roots: &ScopeRoots) -> Result<Scope, DeployError> {
        let stderr_path = PathBuf::from("<stderr>");
        let stdin_path = PathBuf::from("<stdin>");
        self.write_menu(verb, roots).map_err(|e| DeployError::Io {
            path: stderr_path.clone(),
            source: e,
        })?;

        loop {
            write!(self.output, "Enter choice [1/2]: ")
                .and_then(|_| self.output.flush())
                .map_err(|e| DeployError::Io {
                    path: stderr_path.clone(),
                    source: e,
                })?;

            let mut answer = String::new();
            let read = match self.input.read_line(&mut answer) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                    return Err(DeployError::PromptCancelled)
                }
                Err(e) => {
                    return Err(DeployError::Io {
                        path: stdin_path,
                        source: e,
                    })
                }
            };
            if read == 0 {
                let _ = writeln!(self.output);
                return Err(DeployError::PromptCancelled);
            }
            if let Some(scope) = parse_choice(&answer) {
                return Ok(scope);
            }
            writeln!(self.output, "Invalid choice. Please enter 1 or 2.").map_err(|e| {
                DeployError::Io {
                    path: stderr_path.clone(),
                    source: e,
                }
            })?;
        }
    }
}
