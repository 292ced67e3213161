//! Settings persistence error types.
//!
//! None of these are fatal: loading falls back to defaults and a failed save
//! leaves the in-memory settings authoritative.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// No per-user data directory on this platform.
    #[error("Failed to locate the per-user data directory")]
    DataDirNotFound,

    /// Failed to create the settings directory.
    #[error("Failed to create settings directory {path}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to read the settings file.
    #[error("Failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write the settings file.
    #[error("Failed to write settings file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to delete the settings file.
    #[error("Failed to remove settings file {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file exists but is not a valid settings record.
    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to serialize settings.
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl SettingsError {
    /// Returns true if the file content, not the filesystem, is at fault.
    #[must_use]
    pub fn is_corrupt_file(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::DataDirNotFound => "Pass --settings-file or set EYECARE_SETTINGS_FILE",
            Self::DirectoryCreation { .. } | Self::Write { .. } | Self::Remove { .. } => {
                "Check permissions on the settings directory"
            }
            Self::Read { .. } => "Check that the settings file is readable",
            Self::Parse { .. } => "Run `eyecare settings reset` to restore defaults",
            Self::Serialize(_) => "Report this as a bug",
        }
    }
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
