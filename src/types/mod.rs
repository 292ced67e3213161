//! Core data types for the EyeCare reminder.
//!
//! This module defines the data structures used for:
//! - The work/rest phase of the timer
//! - Duration settings with clamping validation
//! - Timer state and the snapshot published on every state change

use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Default work duration in minutes
pub const DEFAULT_WORK_MINUTES: u32 = 20;
/// Default rest duration in seconds
pub const DEFAULT_REST_SECONDS: u32 = 20;
/// Minimum work duration in minutes
pub const MIN_WORK_MINUTES: u32 = 5;
/// Maximum work duration in minutes
pub const MAX_WORK_MINUTES: u32 = 60;
/// Minimum rest duration in seconds
pub const MIN_REST_SECONDS: u32 = 10;
/// Maximum rest duration in seconds
pub const MAX_REST_SECONDS: u32 = 60;

// ============================================================================
// TimerPhase
// ============================================================================

/// The two alternating countdown modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    /// Focused work, counting down toward the next rest
    #[default]
    Work,
    /// Short rest for the eyes
    Rest,
}

impl TimerPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Work => "work",
            TimerPhase::Rest => "rest",
        }
    }

    /// Returns a capitalized label for display.
    pub fn label(&self) -> &'static str {
        match self {
            TimerPhase::Work => "Work",
            TimerPhase::Rest => "Rest",
        }
    }

    /// Returns the other phase.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            TimerPhase::Work => TimerPhase::Rest,
            TimerPhase::Rest => TimerPhase::Work,
        }
    }
}

// ============================================================================
// TimerSettings
// ============================================================================

fn default_work_duration_seconds() -> u32 {
    DEFAULT_WORK_MINUTES * 60
}

fn default_rest_duration_seconds() -> u32 {
    DEFAULT_REST_SECONDS
}

/// Work and rest durations.
///
/// Both fields are kept inside their bounds by [`TimerSettings::validate`];
/// out-of-range values are clamped, never rejected. The persisted JSON uses
/// camelCase keys, missing keys fall back to the defaults and unknown keys
/// are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSettings {
    /// Work duration in seconds (300-3600)
    #[serde(default = "default_work_duration_seconds")]
    pub work_duration_seconds: u32,
    /// Rest duration in seconds (10-60)
    #[serde(default = "default_rest_duration_seconds")]
    pub rest_duration_seconds: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            work_duration_seconds: default_work_duration_seconds(),
            rest_duration_seconds: default_rest_duration_seconds(),
        }
    }
}

impl TimerSettings {
    /// Creates validated settings from raw second values.
    pub fn new(work_duration_seconds: u32, rest_duration_seconds: u32) -> Self {
        let mut settings = Self {
            work_duration_seconds,
            rest_duration_seconds,
        };
        settings.validate();
        settings
    }

    /// Clamps both durations into their allowed ranges, in place.
    pub fn validate(&mut self) {
        self.work_duration_seconds = self
            .work_duration_seconds
            .clamp(MIN_WORK_MINUTES * 60, MAX_WORK_MINUTES * 60);
        self.rest_duration_seconds = self
            .rest_duration_seconds
            .clamp(MIN_REST_SECONDS, MAX_REST_SECONDS);
    }

    /// Returns the work duration in whole minutes.
    pub fn work_duration_minutes(&self) -> u32 {
        self.work_duration_seconds / 60
    }

    /// Sets the work duration from minutes, clamped to 5-60.
    pub fn set_work_duration_minutes(&mut self, minutes: u32) {
        self.work_duration_seconds = minutes.clamp(MIN_WORK_MINUTES, MAX_WORK_MINUTES) * 60;
    }

    /// Sets the rest duration, clamped to 10-60 seconds.
    pub fn set_rest_duration_seconds(&mut self, seconds: u32) {
        self.rest_duration_seconds = seconds.clamp(MIN_REST_SECONDS, MAX_REST_SECONDS);
    }

    /// Builder-style variant of [`set_work_duration_minutes`](Self::set_work_duration_minutes).
    #[must_use]
    pub fn with_work_minutes(mut self, minutes: u32) -> Self {
        self.set_work_duration_minutes(minutes);
        self
    }

    /// Builder-style variant of [`set_rest_duration_seconds`](Self::set_rest_duration_seconds).
    #[must_use]
    pub fn with_rest_seconds(mut self, seconds: u32) -> Self {
        self.set_rest_duration_seconds(seconds);
        self
    }

    /// Returns the configured duration for `phase`, in seconds.
    pub fn duration_for(&self, phase: TimerPhase) -> u32 {
        match phase {
            TimerPhase::Work => self.work_duration_seconds,
            TimerPhase::Rest => self.rest_duration_seconds,
        }
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// Countdown bookkeeping owned by the timer core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    /// Seconds left in the current phase
    pub remaining_seconds: u32,
    /// Length of the current phase when it was last reset
    pub total_seconds: u32,
    /// Current phase
    pub phase: TimerPhase,
    /// Whether ticks are being applied
    pub running: bool,
}

impl TimerState {
    /// Creates an idle state at the start of `phase`.
    pub fn new(phase: TimerPhase, settings: &TimerSettings) -> Self {
        let total = settings.duration_for(phase);
        Self {
            remaining_seconds: total,
            total_seconds: total,
            phase,
            running: false,
        }
    }

    /// Elapsed share of the current phase, 0-100.
    pub fn progress_percentage(&self) -> f64 {
        if self.total_seconds == 0 {
            return 0.0;
        }
        let elapsed = self.total_seconds.saturating_sub(self.remaining_seconds);
        f64::from(elapsed) / f64::from(self.total_seconds) * 100.0
    }

    /// Remaining time as `MM:SS`.
    pub fn formatted_remaining(&self) -> String {
        format_mm_ss(self.remaining_seconds)
    }
}

/// Formats seconds as zero-padded `MM:SS`.
pub fn format_mm_ss(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

// ============================================================================
// TimerSnapshot
// ============================================================================

/// Point-in-time view of the timer, published with every state change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    /// Seconds left in the current phase
    pub remaining_seconds: u32,
    /// Length of the current phase
    pub total_seconds: u32,
    /// Current phase
    pub phase: TimerPhase,
    /// Whether the countdown is running
    pub running: bool,
    /// Elapsed share of the current phase, 0-100
    pub progress_percentage: f64,
}

impl From<&TimerState> for TimerSnapshot {
    fn from(state: &TimerState) -> Self {
        Self {
            remaining_seconds: state.remaining_seconds,
            total_seconds: state.total_seconds,
            phase: state.phase,
            running: state.running,
            progress_percentage: state.progress_percentage(),
        }
    }
}

impl TimerSnapshot {
    /// Remaining time as `MM:SS`.
    pub fn formatted_remaining(&self) -> String {
        format_mm_ss(self.remaining_seconds)
    }
}

// ============================================================================
// Tests
// ============================================================================
