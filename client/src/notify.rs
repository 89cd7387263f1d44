//! User-facing notification side effect.
//!
//! The submission path reports outcomes through a sink rather than returning
//! display strings; embedders plug in their own renderer, and [`LogNotifier`]
//! covers terminal use.

use crate::logs::{
    log_error,
    log_info,
    log_success,
    log_warning,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub description: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn new(
        kind: NotificationKind,
        message: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            description: description.into(),
            kind,
        }
    }

    pub fn success(message: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message, description)
    }

    pub fn error(message: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message, description)
    }
}

pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Default sink: renders notifications through the colored logger.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&self, notification: Notification) {
        let Notification {
            message,
            description,
            kind,
        } = notification;

        match kind {
            NotificationKind::Info => log_info(message, description),
            NotificationKind::Success => log_success(message, description),
            NotificationKind::Warning => log_warning(message, description),
            NotificationKind::Error => log_error(message, description),
        }
    }
}
