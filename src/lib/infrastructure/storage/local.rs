//! Local filesystem storage

use std::{fs, io, path::Path};

use crate::domain::storage::{Storage, StorageError};

/// Reads resources from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl Storage for LocalStorage {
    fn is_file(&self, path: &Path) -> bool {
        fs::metadata(path).is_ok_and(|meta| !meta.is_dir())
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, StorageError> {
        fs::read(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound {
                path: path.to_path_buf(),
            },
            _ => StorageError::Io {
                path: path.to_path_buf(),
                source,
            },
        })
    }
}
