//! CLI module for the EyeCare reminder.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `session`: Interactive terminal session driving the timer
//! - `display`: Output formatting and display logic

pub mod commands;
pub mod display;
pub mod session;

pub use commands::{Cli, Commands, RunArgs, SetArgs, SettingsCommand};
pub use display::{Display, ViewMode};
pub use session::{Session, SessionCommand};
