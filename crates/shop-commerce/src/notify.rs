//! User-facing notices.
//!
//! Stores emit a [`Notice`] after each user action. Delivery is fire and
//! forget: a notifier cannot fail the action that produced the notice.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Mutex;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    #[default]
    Info,
    Success,
    /// A rejected action the user should notice.
    Destructive,
}

/// A short title and description, like a toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub level: NoticeLevel,
}

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level,
        }
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, title, description)
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, title, description)
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Destructive, title, description)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

/// Sink for notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

/// Writes notices to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: &Notice) {
        match notice.level {
            NoticeLevel::Destructive => {
                tracing::warn!(title = %notice.title, "{}", notice.description)
            }
            _ => tracing::info!(title = %notice.title, "{}", notice.description),
        }
    }
}

/// Keeps every notice in memory, for tests and for front ends that render
/// notices after the action completes.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the notices so far.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }

    /// Remove and return the notices so far.
    pub fn take(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|mut n| std::mem::take(&mut *n))
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().ok().and_then(|n| n.last().cloned())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice.clone());
        }
    }
}
