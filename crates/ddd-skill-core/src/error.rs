//! Error taxonomy for deploy operations.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors returned by scope resolution, install, and uninstall.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("Invalid scope: {0}")]
    InvalidScope(String),

    #[error("Scope selection cancelled")]
    PromptCancelled,

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot resolve the global scope: no home directory (set DDD_SKILL_HOME)")]
    HomeDirUnavailable,

    #[error("Invalid skill package: {0}")]
    InvalidPackage(String),
}

impl DeployError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        DeployError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DeployError>;

/// Attach the offending path to a bare `io::Result`.
pub(crate) trait IoResultExt<T> {
    fn at(self, path: &Path) -> Result<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn at(self, path: &Path) -> Result<T> {
        self.map_err(|e| DeployError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_message_names_path() {
        let err = Err::<(), _>(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
            .at(Path::new("/root/skills/ddd"))
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("/root/skills/ddd"));
        assert!(msg.contains("denied"));
    }
}
