//! Notification content for phase completion.

use crate::types::{TimerPhase, TimerSettings};

/// Title and body of a phase-completion reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
}

impl NotificationContent {
    /// Creates content from a title and body.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Builds the reminder shown when `completed` has just finished.
    pub fn for_completed(completed: TimerPhase, settings: &TimerSettings) -> Self {
        match completed {
            TimerPhase::Work => Self::new(
                "Time to Rest!",
                format!(
                    "Take a {}-second break and look at something 20 feet away!",
                    settings.rest_duration_seconds
                ),
            ),
            TimerPhase::Rest => Self::new("Rest Complete!", "Great job! Starting next work session."),
        }
    }
}
