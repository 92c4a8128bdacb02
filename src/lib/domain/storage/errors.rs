//! Storage errors

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when reading from storage
#[derive(Debug, Error)]
pub enum StorageError {
    /// Nothing exists at the path
    #[error("{} does not exist", .path.display())]
    NotFound {
        /// The missing path
        path: PathBuf,
    },

    /// The resource exists but could not be read
    #[error("could not read {}", .path.display())]
    Io {
        /// The unreadable path
        path: PathBuf,

        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The resource is not valid UTF-8 text
    #[error("{} is not valid UTF-8", .path.display())]
    NotUtf8 {
        /// The offending path
        path: PathBuf,
    },
}

impl StorageError {
    /// The path the error refers to
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound { path } | Self::Io { path, .. } | Self::NotUtf8 { path } => path,
        }
    }
}
