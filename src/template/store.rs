//! Template storage.
//!
//! The template is an opaque byte buffer: read once, rewritten, written back
//! to the same location.

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("unable to read config file at {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to write config file at {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Source and sink for the template buffer.
pub trait TemplateStore {
    /// Human-readable location for logs.
    fn location(&self) -> String;

    /// Fails with [`StoreError::NotFound`] when there is nothing to read.
    fn ensure_exists(&self) -> Result<(), StoreError>;

    fn read(&self) -> Result<Vec<u8>, StoreError>;

    fn write(&self, contents: &[u8]) -> Result<(), StoreError>;
}

/// Template kept in a file on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TemplateStore for FileStore {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn ensure_exists(&self) -> Result<(), StoreError> {
        fs::metadata(&self.path)
            .map(|_| ())
            .map_err(|_| StoreError::NotFound(self.path.clone()))
    }

    fn read(&self) -> Result<Vec<u8>, StoreError> {
        fs::read(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, contents: &[u8]) -> Result<(), StoreError> {
        fs::write(&self.path, contents).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
