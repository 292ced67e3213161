//! Command definitions for the EyeCare reminder CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// ============================================================================
// CLI Structure
// ============================================================================

/// EyeCare reminder - alternate work and rest countdowns (20-20-20 rule)
#[derive(Parser, Debug)]
#[command(
    name = "eyecare",
    version,
    about = "20-20-20 eye-care reminder for the terminal",
    long_about = "Alternates a work countdown (default 20 minutes) with a short rest \
                  countdown (default 20 seconds) and reminds you to look away from \
                  the screen when each phase ends.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file to use instead of the per-user default
    #[arg(long, global = true, env = "EYECARE_SETTINGS_FILE", value_name = "PATH")]
    pub settings_file: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the work/rest cycle in this terminal
    Run(RunArgs),

    /// Inspect or change the saved durations
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Settings subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SettingsCommand {
    /// Show the saved durations
    Show,

    /// Change and save durations (out-of-range values are clamped)
    Set(SetArgs),

    /// Delete the settings file and return to defaults
    Reset,

    /// Print the settings file location
    Path,
}

// ============================================================================
// Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Work duration in minutes for this session only (5-60)
    #[arg(short, long, value_name = "MINUTES")]
    pub work: Option<u32>,

    /// Rest duration in seconds for this session only (10-60)
    #[arg(short, long, value_name = "SECONDS")]
    pub rest: Option<u32>,

    /// Start in the compact one-line view
    #[arg(short, long)]
    pub compact: bool,

    /// Do not start counting until `start` is entered
    #[arg(short, long)]
    pub paused: bool,

    /// Do not ring the terminal bell on phase changes
    #[arg(long)]
    pub no_bell: bool,
}

/// Arguments for `settings set`
#[derive(Args, Debug, Clone, Default)]
pub struct SetArgs {
    /// Work duration in minutes (clamped to 5-60)
    #[arg(short, long, value_name = "MINUTES")]
    pub work: Option<u32>,

    /// Rest duration in seconds (clamped to 10-60)
    #[arg(short, long, value_name = "SECONDS")]
    pub rest: Option<u32>,
}

// ============================================================================
// Tests
// ============================================================================
