//! Display utilities for the EyeCare reminder CLI.
//!
//! This module provides formatted output for:
//! - The live status line (normal and compact views)
//! - Settings summaries
//! - Error and warning messages

use std::io::{self, Write};

use tracing::debug;

use crate::types::{TimerSettings, TimerSnapshot};

/// Width of the progress bar in the normal view
const PROGRESS_BAR_WIDTH: usize = 20;

// ============================================================================
// ViewMode
// ============================================================================

/// How much of the timer to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Phase, time, progress bar, percentage and running state
    #[default]
    Normal,
    /// Phase initial and time only
    Compact,
}

impl ViewMode {
    /// Returns the other view mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Normal => ViewMode::Compact,
            ViewMode::Compact => ViewMode::Normal,
        }
    }
}

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Renders the one-line status for `snapshot`.
    pub fn render_status(snapshot: &TimerSnapshot, view: ViewMode) -> String {
        let time = snapshot.formatted_remaining();
        match view {
            ViewMode::Compact => {
                let initial = &snapshot.phase.label()[..1];
                format!("{} {}", initial, time)
            }
            ViewMode::Normal => format!(
                "{:<4}  {}  [{}]  {:>5.1}%  {}",
                snapshot.phase.label(),
                time,
                Self::progress_bar(snapshot.progress_percentage, PROGRESS_BAR_WIDTH),
                snapshot.progress_percentage,
                if snapshot.running { "running" } else { "paused" },
            ),
        }
    }

    /// Redraws the status line in place on stdout.
    pub fn show_status_line(snapshot: &TimerSnapshot, view: ViewMode) {
        if let Err(e) = Self::write_status_line(&mut io::stdout().lock(), snapshot, view) {
            debug!("Failed to redraw status line: {}", e);
        }
    }

    /// Writes the status line to `out` and flushes it.
    pub fn write_status_line<W: Write>(
        out: &mut W,
        snapshot: &TimerSnapshot,
        view: ViewMode,
    ) -> io::Result<()> {
        // Clear to end of line so a shorter render leaves no residue.
        write!(out, "\r{}\x1b[K", Self::render_status(snapshot, view))?;
        out.flush()
    }

    /// Builds a `#`/`-` progress bar of `width` cells.
    pub fn progress_bar(percentage: f64, width: usize) -> String {
        let ratio = (percentage / 100.0).clamp(0.0, 1.0);
        let filled = ((ratio * width as f64).round() as usize).min(width);
        format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
    }

    /// Renders a settings summary.
    pub fn render_settings(settings: &TimerSettings) -> String {
        format!(
            "Work: {} min ({} s)\nRest: {} s",
            settings.work_duration_minutes(),
            settings.work_duration_seconds,
            settings.rest_duration_seconds
        )
    }

    /// Shows the saved settings.
    pub fn show_settings(settings: &TimerSettings) {
        println!("{}", Self::render_settings(settings));
    }

    /// Shows a confirmation after saving settings.
    pub fn show_settings_saved(settings: &TimerSettings) {
        println!("* Settings saved");
        println!("{}", Self::render_settings(settings));
    }

    /// Shows a confirmation after deleting the settings file.
    pub fn show_settings_reset(defaults: &TimerSettings) {
        println!("* Settings reset to defaults");
        println!("{}", Self::render_settings(defaults));
    }

    /// Shows the session banner.
    pub fn show_session_banner(settings: &TimerSettings) {
        println!(
            "EyeCare reminder: {} min work / {} s rest. Type `help` for commands.",
            settings.work_duration_minutes(),
            settings.rest_duration_seconds
        );
    }

    /// Returns the interactive command help.
    pub fn help_text() -> &'static str {
        "Commands:\n\
         \x20 start | s        start the countdown\n\
         \x20 pause | p        pause the countdown\n\
         \x20 toggle | t       start or pause\n\
         \x20 reset | r        restart the current phase\n\
         \x20 work | w         stop and return to a fresh work phase\n\
         \x20 skip | n         switch to the other phase\n\
         \x20 mini | m         toggle compact view\n\
         \x20 set <min> <sec>  change and save work minutes / rest seconds\n\
         \x20 help | h | ?     show this help\n\
         \x20 quit | q         exit"
    }

    /// Shows the interactive command help.
    pub fn show_help() {
        println!("\n{}", Self::help_text());
    }

    /// Shows a hint for an unrecognised command.
    pub fn show_unknown_command(input: &str) {
        println!("\nUnknown command: {:?} (type `help`)", input.trim());
    }

    /// Shows a non-fatal warning.
    pub fn show_warning(message: &str) {
        eprintln!("\nWarning: {}", message);
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Error: {}", message);
    }
}

// ============================================================================
// Tests
// ============================================================================
