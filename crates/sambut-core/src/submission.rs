//! Contact submissions and the newest-first submission history.

use serde::{Deserialize, Serialize};

/// One accepted contact form submission.
///
/// Field names match the persisted JSON record exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    /// Locale-formatted creation time, stored as display text.
    pub timestamp: String,
}

/// Every accepted submission, newest first.
///
/// Grows without bound; there is no eviction and no deduplication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionHistory {
    entries: Vec<ContactSubmission>,
}

impl SubmissionHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from entries already in newest-first order.
    #[must_use]
    pub fn from_newest_first(entries: Vec<ContactSubmission>) -> Self {
        Self { entries }
    }

    /// Insert at the head.
    pub fn prepend(&mut self, submission: ContactSubmission) {
        self.entries.insert(0, submission);
    }

    /// Up to `limit` most recent entries.
    #[must_use]
    pub fn recent(&self, limit: usize) -> &[ContactSubmission] {
        &self.entries[..self.entries.len().min(limit)]
    }

    #[must_use]
    pub fn latest(&self) -> Option<&ContactSubmission> {
        self.entries.first()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContactSubmission> {
        self.entries.iter()
    }
}

/// Produces the display timestamp stamped on new submissions.
pub trait TimestampSource {
    fn now_label(&self) -> String;
}

/// Always returns the same label. Useful for tests and replays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedTimestamp(String);

impl FixedTimestamp {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }
}

impl TimestampSource for FixedTimestamp {
    fn now_label(&self) -> String {
        self.0.clone()
    }
}

/// System local time in the `id-ID` shape: `d/m/yyyy, HH.MM.SS`.
#[cfg(feature = "clock")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

#[cfg(feature = "clock")]
impl LocalClock {
    pub const FORMAT: &'static str = "%-d/%-m/%Y, %H.%M.%S";
}

#[cfg(feature = "clock")]
impl TimestampSource for LocalClock {
    fn now_label(&self) -> String {
        chrono::Local::now().format(Self::FORMAT).to_string()
    }
}
