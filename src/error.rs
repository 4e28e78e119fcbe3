//! Top-level error type.
//!
//! Every variant is fatal: the entrypoint runs once and has no partial
//! success mode.

use thiserror::Error;

use crate::config::loader::ConfigError;
use crate::supervisor::SupervisorError;
use crate::template::{ResolveError, StoreError, SubstitutionError};

pub type Result<T, E = EntrypointError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum EntrypointError {
    #[error(transparent)]
    Settings(#[from] ConfigError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Substitution(#[from] SubstitutionError),

    #[error(transparent)]
    Child(#[from] SupervisorError),
}

impl EntrypointError {
    /// Exit code for the entrypoint process.
    pub fn exit_code(&self) -> u8 {
        match self {
            EntrypointError::Child(e) => e.exit_code(),
            _ => 1,
        }
    }
}
