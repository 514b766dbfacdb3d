//! History panel rendering.
//!
//! A pure function of the in-memory [`SubmissionHistory`]: the newest
//! `preview_limit` entries as blocks, then a note counting the rest.

use crate::markup::Markup;
use crate::messages;
use crate::submission::{ContactSubmission, SubmissionHistory};

/// The slice of history the panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryPreview<'a> {
    pub entries: &'a [ContactSubmission],
    /// Entries not shown.
    pub remaining: usize,
}

impl<'a> HistoryPreview<'a> {
    #[must_use]
    pub fn of(history: &'a SubmissionHistory, limit: usize) -> Self {
        let entries = history.recent(limit);
        Self {
            entries,
            remaining: history.len() - entries.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryRenderer {
    preview_limit: usize,
}

impl Default for HistoryRenderer {
    fn default() -> Self {
        Self::new(5)
    }
}

impl HistoryRenderer {
    #[must_use]
    pub const fn new(preview_limit: usize) -> Self {
        Self { preview_limit }
    }

    #[must_use]
    pub fn preview<'a>(&self, history: &'a SubmissionHistory) -> HistoryPreview<'a> {
        HistoryPreview::of(history, self.preview_limit)
    }

    /// Panel markup for `history`.
    #[must_use]
    pub fn render(&self, history: &SubmissionHistory) -> Markup {
        let mut out = Markup::new();
        if history.is_empty() {
            out.raw("<p>").text(messages::HISTORY_EMPTY).raw("</p>");
            return out;
        }

        let preview = self.preview(history);
        for entry in preview.entries {
            out.append(&render_entry(entry));
        }
        if preview.remaining > 0 {
            out.raw(r#"<p style="text-align:center">"#)
                .text(&messages::more_messages(preview.remaining))
                .raw("</p>");
        }
        out
    }
}

fn render_entry(entry: &ContactSubmission) -> Markup {
    let mut m = Markup::new();
    m.raw(r#"<div class="message-item">"#)
        .raw("<strong>")
        .text(&entry.name)
        .raw("</strong> <span>")
        .text(&entry.timestamp)
        .raw("</span>")
        .raw("<p>Email: ")
        .text(&entry.email)
        .raw("</p><p>Phone: ")
        .text(&entry.phone)
        .raw("</p><p>Message: ")
        .text(&entry.message)
        .raw("</p></div>");
    m
}
