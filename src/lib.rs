//! EyeCare Reminder Library
//!
//! This library provides the core functionality for the 20-20-20 eye-care
//! reminder. It includes:
//! - Timer core alternating work and rest countdowns
//! - Settings persistence with range clamping
//! - Phase-completion notifications
//! - CLI command parsing, display and the interactive session

pub mod cli;
pub mod notification;
pub mod settings;
pub mod timer;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{TimerPhase, TimerSettings, TimerSnapshot, TimerState};

pub use timer::{TickClock, TimerCore, TimerEvent};

pub use settings::{SettingsError, SettingsStore};

pub use notification::{
    MockNotifier, NotificationContent, NotificationError, PhaseNotifier, TerminalNotifier,
};
