use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Settings file not found: {path}\nRun `buildsync init` to create one, or pass --settings.")]
    SettingsNotFound { path: PathBuf },

    #[error("Failed to parse settings file: {path}\nCause: {source}\nCheck that the file is valid JSON.")]
    SettingsParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read directory: {path}\nCause: {source}\nCheck that the directory exists and you have read permissions.")]
    ReadDirError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read {extension} file: {path}\nCause: {source}")]
    ReadError {
        path: PathBuf,
        extension: String,
        source: std::io::Error,
    },

    #[error("Failed to write {extension} file: {path}\nCause: {source}\nCheck disk space and write permissions on the destination.")]
    WriteError {
        path: PathBuf,
        extension: String,
        source: std::io::Error,
    },

    #[error("Failed to delete stale {extension} file: {path}\nCause: {source}\nCheck that the file is not locked by another process.")]
    DeleteError {
        path: PathBuf,
        extension: String,
        source: std::io::Error,
    },

    #[error("Invalid file pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Invalid path: {path}\nPaths must be valid UTF-8 and not contain invalid characters.")]
    InvalidPath { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, SyncError>;
