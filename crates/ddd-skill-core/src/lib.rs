pub mod config;
pub mod deploy;
pub mod error;
pub mod observability;
pub mod skill;

pub use error::{DeployError, Result};
