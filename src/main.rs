//! EyeCare reminder CLI - the 20-20-20 rule in a terminal
//!
//! Every 20 minutes of screen time, look at something 20 feet away for
//! 20 seconds. Both durations are adjustable and persisted per user.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use eyecare::cli::{Cli, Commands, Display, RunArgs, Session, SetArgs, SettingsCommand, ViewMode};
use eyecare::{SettingsStore, TerminalNotifier, TimerSettings};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => {
            let store = resolve_store(cli.settings_file)?;
            run_session(store, args).await?;
        }
        Some(Commands::Settings(command)) => {
            let store = resolve_store(cli.settings_file)?;
            execute_settings(&store, command).await?;
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Picks the explicit settings file or the per-user default.
fn resolve_store(settings_file: Option<PathBuf>) -> Result<SettingsStore> {
    match settings_file {
        Some(path) => Ok(SettingsStore::new(path)),
        None => SettingsStore::default_location().context("Cannot determine settings location"),
    }
}

/// Applies optional overrides on top of `settings`, clamping each.
fn apply_overrides(mut settings: TimerSettings, work: Option<u32>, rest: Option<u32>) -> TimerSettings {
    if let Some(minutes) = work {
        settings.set_work_duration_minutes(minutes);
    }
    if let Some(seconds) = rest {
        settings.set_rest_duration_seconds(seconds);
    }
    settings
}

/// Runs the interactive session until the user quits.
async fn run_session(store: SettingsStore, args: RunArgs) -> Result<()> {
    let settings = apply_overrides(store.load().await, args.work, args.rest);
    tracing::info!(
        "Starting session: work={}s rest={}s",
        settings.work_duration_seconds,
        settings.rest_duration_seconds
    );

    let view = if args.compact {
        ViewMode::Compact
    } else {
        ViewMode::Normal
    };
    let notifier = TerminalNotifier::stdout(!args.no_bell);

    Session::new(settings, store, notifier, view)
        .run(!args.paused)
        .await
}

/// Executes a `settings` subcommand.
async fn execute_settings(store: &SettingsStore, command: SettingsCommand) -> Result<()> {
    match command {
        SettingsCommand::Show => {
            let settings = store.load().await;
            Display::show_settings(&settings);
        }
        SettingsCommand::Set(SetArgs { work, rest }) => {
            let settings = apply_overrides(store.load().await, work, rest);
            let saved = store.save(&settings).await?;
            Display::show_settings_saved(&saved);
        }
        SettingsCommand::Reset => {
            store.reset().await?;
            Display::show_settings_reset(&TimerSettings::default());
        }
        SettingsCommand::Path => {
            println!("{}", store.path().display());
        }
    }
    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
