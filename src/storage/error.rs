//! Storage-specific error types.

use std::path::PathBuf;

/// Errors that can occur while persisting or restoring the application
/// document.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// File path was not set
    #[error("Storage file path not set")]
    FilePathNotSet,

    /// Failed to find home directory
    #[error("Failed to find home directory")]
    HomeDirectoryNotFound,

    /// Failed to load the state document
    #[error("Failed to load state from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save the state document
    #[error("Failed to save state to {path}: {source}")]
    SaveFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to create storage directory
    #[error("Failed to create storage directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to serialize the state document
    #[error("Failed to serialize state: {0}")]
    SerializationFailed(String),

    /// Failed to deserialize the state document
    #[error("Failed to deserialize state: {0}")]
    DeserializationFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let error = StorageError::FilePathNotSet;
        assert!(error.to_string().contains("file path not set"));

        let error = StorageError::HomeDirectoryNotFound;
        assert!(error.to_string().contains("home directory"));

        let error = StorageError::SerializationFailed("test".to_string());
        assert!(error.to_string().contains("test"));

        let error = StorageError::DeserializationFailed("test".to_string());
        assert!(error.to_string().contains("test"));
    }

    #[test]
    fn test_storage_error_with_path() {
        let path = PathBuf::from("/test/path");
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "Not found");
        let error = StorageError::SaveFailed {
            path: path.clone(),
            source: io_error,
        };
        let error_str = error.to_string();
        assert!(error_str.contains("/test/path"));
    }
}
