//! Read-only access to layout, template and recipient files

use std::path::Path;

#[cfg(test)]
use mockall::mock;

mod errors;

pub use errors::StorageError;

/// Storage the campaign core reads its resources from
pub trait Storage: Send + Sync + 'static {
    /// Returns `true` if `path` exists and is not a directory.
    fn is_file(&self, path: &Path) -> bool;

    /// Reads the whole resource at `path`.
    fn read(&self, path: &Path) -> Result<Vec<u8>, StorageError>;

    /// Reads the resource at `path` as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> Result<String, StorageError> {
        let bytes = self.read(path)?;

        String::from_utf8(bytes).map_err(|_| StorageError::NotUtf8 {
            path: path.to_path_buf(),
        })
    }
}

#[cfg(test)]
mock! {
    pub Storage {}

    impl Storage for Storage {
        fn is_file(&self, path: &Path) -> bool;
        fn read(&self, path: &Path) -> Result<Vec<u8>, StorageError>;
    }
}
