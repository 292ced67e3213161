//! Notification error types.

use thiserror::Error;

/// Errors that can occur while announcing a phase change.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotificationError {
    /// Failed to deliver the notification.
    #[error("Failed to send notification: {0}")]
    SendFailed(String),

    /// The notification channel is not available.
    #[error("Notifications are not available")]
    NotAvailable,
}
