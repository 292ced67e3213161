//! Settings persistence for the EyeCare reminder.
//!
//! - `store`: JSON settings file in the per-user data directory
//! - `error`: recoverable persistence errors

pub mod error;
pub mod store;

pub use self::error::SettingsError;
pub use self::store::{SettingsStore, APP_DIR_NAME, SETTINGS_FILE_NAME};
