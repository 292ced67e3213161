//! Phase-completion notifications.
//!
//! When a countdown reaches zero the session announces it before moving on to
//! the next phase. The announcement goes through [`PhaseNotifier`] so the
//! session can be tested without a terminal:
//!
//! - [`TerminalNotifier`] prints the reminder, with an optional bell
//! - [`MockNotifier`] records reminders for assertions
//!
//! Failures are reported to the caller, which logs them and keeps going.

mod content;
pub mod error;

use std::io::{self, Write};
use std::sync::Mutex;

pub use self::content::NotificationContent;
pub use self::error::NotificationError;

/// ASCII BEL, the terminal's attention sound
const BELL: &str = "\x07";

/// Something that can announce a finished phase.
pub trait PhaseNotifier {
    /// Delivers a reminder.
    ///
    /// # Errors
    ///
    /// Returns an error if the reminder could not be delivered.
    fn notify(&self, content: &NotificationContent) -> Result<(), NotificationError>;

    /// Returns true if reminders can currently be delivered.
    fn is_available(&self) -> bool {
        true
    }
}

// ============================================================================
// TerminalNotifier
// ============================================================================

/// Prints reminders to a terminal (stdout by default).
pub struct TerminalNotifier<W: Write = io::Stdout> {
    out: Mutex<W>,
    bell: bool,
}

impl TerminalNotifier {
    /// Creates a notifier writing to stdout.
    #[must_use]
    pub fn stdout(bell: bool) -> Self {
        Self::with_writer(io::stdout(), bell)
    }
}

impl<W: Write> TerminalNotifier<W> {
    /// Creates a notifier writing to `out`.
    pub fn with_writer(out: W, bell: bool) -> Self {
        Self {
            out: Mutex::new(out),
            bell,
        }
    }

    /// Returns whether the bell is rung with each reminder.
    pub fn bell_enabled(&self) -> bool {
        self.bell
    }

    /// Consumes the notifier, returning the writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write> PhaseNotifier for TerminalNotifier<W> {
    fn notify(&self, content: &NotificationContent) -> Result<(), NotificationError> {
        let mut out = self
            .out
            .lock()
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

        let bell = if self.bell { BELL } else { "" };
        writeln!(out, "\n{}*** {} ***", bell, content.title)
            .and_then(|()| writeln!(out, "    {}", content.body))
            .and_then(|()| out.flush())
            .map_err(|e| NotificationError::SendFailed(e.to_string()))
    }
}

// ============================================================================
// MockNotifier
// ============================================================================

/// Test double that records every reminder it is given.
pub struct MockNotifier {
    notifications: std::sync::Mutex<Vec<NotificationContent>>,
    available: std::sync::atomic::AtomicBool,
    should_fail: std::sync::atomic::AtomicBool,
}

impl MockNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self {
            notifications: std::sync::Mutex::new(Vec::new()),
            available: std::sync::atomic::AtomicBool::new(true),
            should_fail: std::sync::atomic::AtomicBool::new(false),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available
            .store(available, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail
            .store(should_fail, std::sync::atomic::Ordering::SeqCst);
    }

    #[must_use]
    pub fn get_notifications(&self) -> Vec<NotificationContent> {
        self.notifications.lock().unwrap().clone()
    }

    #[must_use]
    pub fn notification_count(&self) -> usize {
        self.notifications.lock().unwrap().len()
    }

    pub fn clear_recorded(&self) {
        self.notifications.lock().unwrap().clear();
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseNotifier for MockNotifier {
    fn notify(&self, content: &NotificationContent) -> Result<(), NotificationError> {
        if !self.is_available() {
            return Err(NotificationError::NotAvailable);
        }
        if self.should_fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(NotificationError::SendFailed("Mock failure".to_string()));
        }
        self.notifications.lock().unwrap().push(content.clone());
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.available.load(std::sync::atomic::Ordering::SeqCst)
    }
}

impl<N: PhaseNotifier + ?Sized> PhaseNotifier for std::sync::Arc<N> {
    fn notify(&self, content: &NotificationContent) -> Result<(), NotificationError> {
        (**self).notify(content)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}
