//! Interactive terminal session.
//!
//! The session is the shell around [`TimerCore`]: it owns the one-second
//! clock, reads line commands from stdin, redraws the status line and turns
//! every phase completion into a reminder followed by an immediate start of
//! the next phase.

use std::io::{self, BufRead};
use std::thread;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

use crate::notification::{NotificationContent, PhaseNotifier};
use crate::settings::SettingsStore;
use crate::timer::{TickClock, TimerCore, TimerEvent};
use crate::types::{TimerPhase, TimerSettings};

use super::display::{Display, ViewMode};

// ============================================================================
// SessionCommand
// ============================================================================

/// A line command typed during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Start,
    Pause,
    /// Start if paused, pause if running
    Toggle,
    /// Restart the current phase
    Reset,
    /// Pause and return to a fresh work phase
    Work,
    /// Switch to the other phase
    Skip,
    /// Toggle compact/normal view
    ToggleView,
    /// Change durations and save them
    Set {
        work_minutes: u32,
        rest_seconds: u32,
    },
    Help,
    Quit,
}

impl SessionCommand {
    /// Parses a command line. Returns `None` for anything unrecognised.
    pub fn parse(input: &str) -> Option<Self> {
        let mut words = input.split_whitespace();
        let command = words.next()?.to_ascii_lowercase();

        let parsed = match command.as_str() {
            "start" | "s" => Self::Start,
            "pause" | "p" => Self::Pause,
            "toggle" | "t" => Self::Toggle,
            "reset" | "r" => Self::Reset,
            "work" | "w" => Self::Work,
            "skip" | "n" => Self::Skip,
            "mini" | "m" => Self::ToggleView,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            "set" => {
                let work_minutes = words.next()?.parse().ok()?;
                let rest_seconds = words.next()?.parse().ok()?;
                Self::Set {
                    work_minutes,
                    rest_seconds,
                }
            }
            _ => return None,
        };

        if words.next().is_some() {
            return None;
        }
        Some(parsed)
    }
}

// ============================================================================
// Session
// ============================================================================

/// Drives a [`TimerCore`] from a clock and user commands.
pub struct Session<N: PhaseNotifier> {
    core: TimerCore,
    events: mpsc::UnboundedReceiver<TimerEvent>,
    clock: TickClock,
    notifier: N,
    store: SettingsStore,
    view: ViewMode,
    completed_phases: u32,
}

impl<N: PhaseNotifier> Session<N> {
    /// Creates an idle session at the start of a work phase.
    ///
    /// Must be called inside a tokio runtime (the clock is created here).
    pub fn new(settings: TimerSettings, store: SettingsStore, notifier: N, view: ViewMode) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            core: TimerCore::new(settings, tx),
            events: rx,
            clock: TickClock::every_second(),
            notifier,
            store,
            view,
            completed_phases: 0,
        }
    }

    pub fn core(&self) -> &TimerCore {
        &self.core
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Number of phases that have run to completion.
    pub fn completed_phases(&self) -> u32 {
        self.completed_phases
    }

    /// Handles one clock tick.
    pub fn on_clock_tick(&mut self) {
        if self.core.is_running() {
            self.core.on_tick();
        }
        self.process_events();
    }

    /// Applies a user command. `Quit` is left to the caller.
    pub async fn apply(&mut self, command: SessionCommand) {
        let was_running = self.core.is_running();

        match command {
            SessionCommand::Start => self.core.start(),
            SessionCommand::Pause => self.core.pause(),
            SessionCommand::Toggle => {
                if was_running {
                    self.core.pause();
                } else {
                    self.core.start();
                }
            }
            SessionCommand::Reset => self.core.reset_current_phase(),
            SessionCommand::Work => self.core.reset_to_work_phase(),
            SessionCommand::Skip => self.core.switch_phase(),
            SessionCommand::ToggleView => self.view = self.view.toggled(),
            SessionCommand::Set {
                work_minutes,
                rest_seconds,
            } => self.update_durations(work_minutes, rest_seconds).await,
            SessionCommand::Help => Display::show_help(),
            SessionCommand::Quit => {}
        }

        let refilled = matches!(command, SessionCommand::Reset | SessionCommand::Skip);
        if self.core.is_running() && (!was_running || refilled) {
            self.clock.reset();
        }
        self.process_events();
    }

    /// Waits for the next clock tick and applies it.
    pub async fn next_tick(&mut self) {
        self.clock.tick().await;
        self.on_clock_tick();
    }

    /// Runs until `quit` or Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin or the signal handler fails.
    pub async fn run(mut self, autostart: bool) -> Result<()> {
        Display::show_session_banner(self.core.settings());
        if autostart {
            self.apply(SessionCommand::Start).await;
        }
        Display::show_status_line(&self.core.snapshot(), self.view);

        let mut lines = spawn_stdin_reader()?;
        let mut stdin_open = true;
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = self.next_tick() => {}
                line = lines.recv(), if stdin_open => {
                    match line.transpose().context("Failed to read from stdin")? {
                        Some(line) => match SessionCommand::parse(&line) {
                            Some(SessionCommand::Quit) => break,
                            Some(command) => self.apply(command).await,
                            None if line.trim().is_empty() => {}
                            None => Display::show_unknown_command(&line),
                        },
                        None => {
                            debug!("stdin closed; continuing without commands");
                            stdin_open = false;
                        }
                    }
                }
                result = &mut shutdown => {
                    result.context("Failed to listen for Ctrl-C")?;
                    break;
                }
            }

            Display::show_status_line(&self.core.snapshot(), self.view);
        }

        println!();
        Ok(())
    }

    fn process_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                TimerEvent::Tick { remaining_seconds } => trace!(remaining_seconds, "tick"),
                TimerEvent::StateChanged(snapshot) => trace!(?snapshot, "state changed"),
                TimerEvent::PhaseCompleted { phase } => self.advance_after(phase),
            }
        }
    }

    /// Announces the finished phase and starts the next one straight away.
    fn advance_after(&mut self, completed: TimerPhase) {
        self.completed_phases += 1;

        let content = NotificationContent::for_completed(completed, self.core.settings());
        if !self.notifier.is_available() {
            debug!(title = %content.title, "notifier unavailable; reminder skipped");
        } else if let Err(e) = self.notifier.notify(&content) {
            warn!("Failed to show reminder: {}", e);
        }

        self.core.switch_phase();
        self.core.start();
        self.clock.reset();
    }

    async fn update_durations(&mut self, work_minutes: u32, rest_seconds: u32) {
        let settings = TimerSettings::default()
            .with_work_minutes(work_minutes)
            .with_rest_seconds(rest_seconds);
        self.core.update_settings(settings);

        if let Err(e) = self.store.save(&settings).await {
            warn!("{}", e);
            Display::show_warning(&format!("{} ({})", e, e.suggestion()));
        }
    }
}

/// Forwards stdin lines from a detached thread.
///
/// A read pending on this thread never holds up runtime shutdown, so Ctrl-C
/// ends the process even while stdin stays open.
fn spawn_stdin_reader() -> Result<mpsc::UnboundedReceiver<io::Result<String>>> {
    let (tx, rx) = mpsc::unbounded_channel();
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                if tx.send(line).is_err() {
                    break;
                }
            }
        })
        .context("Failed to spawn stdin reader")?;
    Ok(rx)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::MockNotifier;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;
    use tokio::time::Instant;

    fn create_session(settings: TimerSettings) -> (TempDir, Arc<MockNotifier>, Session<Arc<MockNotifier>>) {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));
        let notifier = Arc::new(MockNotifier::new());
        let session = Session::new(settings, store, notifier.clone(), ViewMode::Normal);
        (dir, notifier, session)
    }

    fn tick_n(session: &mut Session<Arc<MockNotifier>>, n: u32) {
        for _ in 0..n {
            session.on_clock_tick();
        }
    }

    mod parse_tests {
        use super::*;

        #[test]
        fn test_parse_simple_commands() {
            assert_eq!(SessionCommand::parse("start"), Some(SessionCommand::Start));
            assert_eq!(SessionCommand::parse("s"), Some(SessionCommand::Start));
            assert_eq!(SessionCommand::parse("  PAUSE "), Some(SessionCommand::Pause));
            assert_eq!(SessionCommand::parse("t"), Some(SessionCommand::Toggle));
            assert_eq!(SessionCommand::parse("r"), Some(SessionCommand::Reset));
            assert_eq!(SessionCommand::parse("w"), Some(SessionCommand::Work));
            assert_eq!(SessionCommand::parse("n"), Some(SessionCommand::Skip));
            assert_eq!(SessionCommand::parse("mini"), Some(SessionCommand::ToggleView));
            assert_eq!(SessionCommand::parse("?"), Some(SessionCommand::Help));
            assert_eq!(SessionCommand::parse("q"), Some(SessionCommand::Quit));
        }

        #[test]
        fn test_parse_set() {
            assert_eq!(
                SessionCommand::parse("set 25 30"),
                Some(SessionCommand::Set {
                    work_minutes: 25,
                    rest_seconds: 30
                })
            );
        }

        #[test]
        fn test_parse_rejects_malformed() {
            assert_eq!(SessionCommand::parse(""), None);
            assert_eq!(SessionCommand::parse("   "), None);
            assert_eq!(SessionCommand::parse("dance"), None);
            assert_eq!(SessionCommand::parse("set 25"), None);
            assert_eq!(SessionCommand::parse("set a b"), None);
            assert_eq!(SessionCommand::parse("set 25 30 40"), None);
            assert_eq!(SessionCommand::parse("start now"), None);
        }
    }

    mod session_tests {
        use super::*;

        #[tokio::test]
        async fn test_new_session_is_idle_work() {
            let (_dir, _notifier, session) = create_session(TimerSettings::default());

            assert_eq!(session.core().phase(), TimerPhase::Work);
            assert!(!session.core().is_running());
            assert_eq!(session.core().remaining_seconds(), 1200);
            assert_eq!(session.view(), ViewMode::Normal);
        }

        #[tokio::test]
        async fn test_ticks_are_ignored_until_started() {
            let (_dir, _notifier, mut session) = create_session(TimerSettings::default());

            tick_n(&mut session, 5);
            assert_eq!(session.core().remaining_seconds(), 1200);

            session.apply(SessionCommand::Start).await;
            tick_n(&mut session, 5);
            assert_eq!(session.core().remaining_seconds(), 1195);
        }

        #[tokio::test]
        async fn test_work_completion_notifies_and_starts_rest() {
            let (_dir, notifier, mut session) = create_session(TimerSettings::new(300, 15));
            session.apply(SessionCommand::Start).await;

            tick_n(&mut session, 300);

            assert_eq!(session.completed_phases(), 1);
            assert_eq!(session.core().phase(), TimerPhase::Rest);
            assert!(session.core().is_running());
            assert_eq!(session.core().remaining_seconds(), 15);

            let sent = notifier.get_notifications();
            assert_eq!(sent.len(), 1);
            assert_eq!(sent[0].title, "Time to Rest!");
            assert!(sent[0].body.contains("15-second"));
        }

        #[tokio::test]
        async fn test_full_cycle_returns_to_work() {
            let (_dir, notifier, mut session) = create_session(TimerSettings::new(300, 10));
            session.apply(SessionCommand::Start).await;

            tick_n(&mut session, 300 + 10);

            assert_eq!(session.completed_phases(), 2);
            assert_eq!(session.core().phase(), TimerPhase::Work);
            assert!(session.core().is_running());
            assert_eq!(session.core().remaining_seconds(), 300);

            let titles: Vec<_> = notifier
                .get_notifications()
                .into_iter()
                .map(|c| c.title)
                .collect();
            assert_eq!(titles, vec!["Time to Rest!", "Rest Complete!"]);
        }

        #[tokio::test]
        async fn test_unavailable_notifier_is_skipped() {
            let (_dir, notifier, mut session) = create_session(TimerSettings::new(300, 10));
            notifier.set_available(false);
            session.apply(SessionCommand::Start).await;

            tick_n(&mut session, 300);

            assert_eq!(session.completed_phases(), 1);
            assert_eq!(session.core().phase(), TimerPhase::Rest);
            assert!(session.core().is_running());
            assert_eq!(notifier.notification_count(), 0);
        }

        #[tokio::test]
        async fn test_notifier_failure_does_not_stop_cycle() {
            let (_dir, notifier, mut session) = create_session(TimerSettings::new(300, 10));
            notifier.set_should_fail(true);
            session.apply(SessionCommand::Start).await;

            tick_n(&mut session, 300);

            assert_eq!(session.core().phase(), TimerPhase::Rest);
            assert!(session.core().is_running());
            assert_eq!(notifier.notification_count(), 0);
        }

        #[tokio::test]
        async fn test_toggle_and_work_commands() {
            let (_dir, _notifier, mut session) = create_session(TimerSettings::default());

            session.apply(SessionCommand::Toggle).await;
            assert!(session.core().is_running());
            session.apply(SessionCommand::Toggle).await;
            assert!(!session.core().is_running());

            session.apply(SessionCommand::Skip).await;
            session.apply(SessionCommand::Start).await;
            tick_n(&mut session, 3);
            assert_eq!(session.core().phase(), TimerPhase::Rest);

            session.apply(SessionCommand::Work).await;
            assert_eq!(session.core().phase(), TimerPhase::Work);
            assert!(!session.core().is_running());
            assert_eq!(session.core().remaining_seconds(), 1200);
        }

        #[tokio::test]
        async fn test_reset_restarts_current_phase() {
            let (_dir, _notifier, mut session) = create_session(TimerSettings::default());
            session.apply(SessionCommand::Start).await;
            tick_n(&mut session, 42);

            session.apply(SessionCommand::Reset).await;

            assert_eq!(session.core().remaining_seconds(), 1200);
            assert!(session.core().is_running());
        }

        #[tokio::test]
        async fn test_toggle_view() {
            let (_dir, _notifier, mut session) = create_session(TimerSettings::default());

            session.apply(SessionCommand::ToggleView).await;
            assert_eq!(session.view(), ViewMode::Compact);
            session.apply(SessionCommand::ToggleView).await;
            assert_eq!(session.view(), ViewMode::Normal);
        }

        #[tokio::test]
        async fn test_set_updates_core_and_saves() {
            let (dir, _notifier, mut session) = create_session(TimerSettings::default());

            session
                .apply(SessionCommand::Set {
                    work_minutes: 200,
                    rest_seconds: 1,
                })
                .await;

            assert_eq!(session.core().settings().work_duration_seconds, 3600);
            assert_eq!(session.core().settings().rest_duration_seconds, 10);
            assert_eq!(session.core().remaining_seconds(), 3600);

            let store = SettingsStore::new(dir.path().join("settings.json"));
            assert_eq!(store.load().await, TimerSettings::new(3600, 10));
        }

        #[tokio::test]
        async fn test_set_while_running_applies_on_next_phase() {
            let (_dir, _notifier, mut session) = create_session(TimerSettings::new(300, 10));
            session.apply(SessionCommand::Start).await;
            tick_n(&mut session, 1);

            session
                .apply(SessionCommand::Set {
                    work_minutes: 5,
                    rest_seconds: 40,
                })
                .await;
            assert_eq!(session.core().remaining_seconds(), 299);

            tick_n(&mut session, 299);
            assert_eq!(session.core().phase(), TimerPhase::Rest);
            assert_eq!(session.core().remaining_seconds(), 40);
        }

        #[tokio::test]
        async fn test_set_with_failing_store_keeps_new_settings() {
            let dir = tempfile::tempdir().unwrap();
            let blocker = dir.path().join("blocker");
            std::fs::write(&blocker, "not a directory").unwrap();
            let store = SettingsStore::new(blocker.join("settings.json"));
            let mut session = Session::new(
                TimerSettings::default(),
                store,
                MockNotifier::new(),
                ViewMode::Compact,
            );

            session
                .apply(SessionCommand::Set {
                    work_minutes: 30,
                    rest_seconds: 30,
                })
                .await;

            assert_eq!(session.core().settings().work_duration_minutes(), 30);
            assert_eq!(session.core().remaining_seconds(), 1800);
        }
    }

    mod clock_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_first_tick_comes_one_second_after_start() {
            let (_dir, _notifier, mut session) = create_session(TimerSettings::default());
            tokio::time::advance(Duration::from_millis(600)).await;

            session.apply(SessionCommand::Start).await;
            let started = Instant::now();

            tokio::time::advance(Duration::from_millis(600)).await;
            let early = tokio::time::timeout(Duration::ZERO, session.next_tick()).await;
            assert!(early.is_err());
            assert_eq!(session.core().remaining_seconds(), 1200);

            session.next_tick().await;
            assert_eq!(started.elapsed(), Duration::from_secs(1));
            assert_eq!(session.core().remaining_seconds(), 1199);
        }

        #[tokio::test(start_paused = true)]
        async fn test_reset_while_running_restarts_the_second() {
            let (_dir, _notifier, mut session) = create_session(TimerSettings::default());
            session.apply(SessionCommand::Start).await;
            tokio::time::advance(Duration::from_millis(600)).await;

            session.apply(SessionCommand::Reset).await;
            let reset_at = Instant::now();
            session.next_tick().await;

            assert_eq!(reset_at.elapsed(), Duration::from_secs(1));
            assert_eq!(session.core().remaining_seconds(), 1199);
        }

        #[tokio::test(start_paused = true)]
        async fn test_skip_while_running_restarts_the_second() {
            let (_dir, _notifier, mut session) = create_session(TimerSettings::default());
            session.apply(SessionCommand::Start).await;
            tokio::time::advance(Duration::from_millis(600)).await;

            session.apply(SessionCommand::Skip).await;
            let skipped_at = Instant::now();
            session.next_tick().await;

            assert_eq!(skipped_at.elapsed(), Duration::from_secs(1));
            assert_eq!(session.core().phase(), TimerPhase::Rest);
            assert_eq!(session.core().remaining_seconds(), 19);
        }

        #[tokio::test(start_paused = true)]
        async fn test_pause_then_start_waits_a_full_second() {
            let (_dir, _notifier, mut session) = create_session(TimerSettings::default());
            session.apply(SessionCommand::Start).await;
            session.next_tick().await;
            tokio::time::advance(Duration::from_millis(300)).await;
            session.apply(SessionCommand::Pause).await;
            tokio::time::advance(Duration::from_millis(900)).await;

            session.apply(SessionCommand::Start).await;
            let resumed_at = Instant::now();
            session.next_tick().await;

            assert_eq!(resumed_at.elapsed(), Duration::from_secs(1));
            assert_eq!(session.core().remaining_seconds(), 1198);
        }
    }
}
