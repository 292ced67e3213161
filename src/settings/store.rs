//! File-backed store for the duration settings.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::error::{Result, SettingsError};
use crate::types::TimerSettings;

/// Application subfolder under the per-user data directory
pub const APP_DIR_NAME: &str = "EyeCareReminder";

/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Reads and writes the single settings record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Creates a store backed by an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at `<local data dir>/EyeCareReminder/settings.json`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::DataDirNotFound`] if the platform has no
    /// per-user data directory.
    pub fn default_location() -> Result<Self> {
        let base = dirs::data_local_dir().ok_or(SettingsError::DataDirNotFound)?;
        Ok(Self::new(base.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME)))
    }

    /// Returns the settings file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Clamps `settings` into range, in place.
    pub fn validate(settings: &mut TimerSettings) {
        settings.validate();
    }

    /// Loads the persisted settings.
    ///
    /// A missing file yields the defaults. Loaded values are clamped.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn try_load(&self) -> Result<TimerSettings> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No settings file at {:?}, using defaults", self.path);
                return Ok(TimerSettings::default());
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let mut settings: TimerSettings =
            serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
                path: self.path.clone(),
                source,
            })?;
        settings.validate();
        Ok(settings)
    }

    /// Loads the persisted settings, falling back to defaults on any error.
    pub async fn load(&self) -> TimerSettings {
        match self.try_load().await {
            Ok(settings) => settings,
            Err(e) => {
                warn!("{}; using default settings", e);
                TimerSettings::default()
            }
        }
    }

    /// Validates and writes `settings`, creating the directory if needed.
    ///
    /// Returns the clamped value that was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written. The
    /// caller keeps its in-memory settings either way.
    pub async fn save(&self, settings: &TimerSettings) -> Result<TimerSettings> {
        let mut validated = *settings;
        validated.validate();

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|source| {
                    SettingsError::DirectoryCreation {
                        path: parent.to_path_buf(),
                        source,
                    }
                })?;
            }
        }

        let json = serde_json::to_string_pretty(&validated).map_err(SettingsError::Serialize)?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|source| SettingsError::Write {
                path: self.path.clone(),
                source,
            })?;

        info!("Saved settings to {:?}", self.path);
        Ok(validated)
    }

    /// Deletes the settings file so the next load returns defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be removed.
    pub async fn reset(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                info!("Removed settings file {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SettingsError::Remove {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
