use std::fmt;
use std::str::FromStr;

use crate::error::{DeployError, Result};

/// Installation breadth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Every project of the current user.
    Global,
    /// The current project only.
    Local,
}

impl Scope {
    pub const ALL: [Scope; 2] = [Scope::Global, Scope::Local];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Global => "global",
            Scope::Local => "local",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = DeployError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "global" | "g" => Ok(Scope::Global),
            "local" | "l" => Ok(Scope::Local),
            other => Err(DeployError::InvalidScope(format!(
                "unrecognized scope '{}' (expected 'global' or 'local')",
                other
            ))),
        }
    }
}

/// Combine the CLI scope selectors. More than one selector is an error even
/// when they agree; none at all yields `Ok(None)` so the caller can prompt.
pub fn select_scope(global: bool, local: bool, token: Option<&str>) -> Result<Option<Scope>> {
    let mut picked = Vec::new();
    if global {
        picked.push(Scope::Global);
    }
    if local {
        picked.push(Scope::Local);
    }
    if let Some(t) = token {
        picked.push(t.parse()?);
    }
    match picked.as_slice() {
        [] => Ok(None),
        [one] => Ok(Some(*one)),
        _ => Err(DeployError::InvalidScope(
            "choose exactly one of --global, --local or --scope".to_string(),
        )),
    }
}
