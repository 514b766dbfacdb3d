#![forbid(unsafe_code)]

//! Transient alert overlay.
//!
//! At most one alert is visible. Showing a new alert removes the previous one
//! and cancels its pending timers, so a stale auto-dismiss can never remove
//! the newer alert. Each alert:
//!
//! - is inserted off-screen (`translateX(450px)`),
//! - slides in after the reveal delay,
//! - removes itself after the timeout unless dismissed first.
//!
//! Dismissal is idempotent.

use core::time::Duration;

use crate::markup::Markup;
use crate::timer::{TimerId, TimerQueue, TimerTask};
use crate::view::PageView;

/// DOM id of the overlay node.
pub const ALERT_DOM_ID: &str = "customAlert";
/// DOM id of the shared alert stylesheet.
pub const ALERT_STYLESHEET_ID: &str = "alert-styles";

const HIDDEN_TRANSFORM: &str = "translateX(450px)";
const SHOWN_TRANSFORM: &str = "translateX(0)";

/// Rules shared by every alert, injected once per document.
pub const ALERT_STYLESHEET: &str = "\
.alert-content { display: flex; align-items: center; padding: 1rem 1.5rem; gap: 0.75rem; }
.alert-icon { font-size: 1.2rem; flex-shrink: 0; }
.alert-message { flex-grow: 1; font-weight: 500; line-height: 1.4; }
.alert-close { background: none; border: none; color: white; font-size: 1.5rem; cursor: pointer; padding: 0; width: 24px; height: 24px; display: flex; align-items: center; justify-content: center; border-radius: 50%; transition: background 0.2s ease; flex-shrink: 0; }
.alert-close:hover { background: rgba(255,255,255,0.2); }
";

/// Unique identifier for an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlertId(pub u64);

/// Message type, selecting icon and background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertKind {
    Success,
    Error,
    #[default]
    Info,
}

impl AlertKind {
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Success => "\u{2705}", // ✅
            Self::Error => "\u{274C}",   // ❌
            Self::Info => "\u{2139}",    // ℹ
        }
    }

    #[must_use]
    pub const fn background(self) -> &'static str {
        match self {
            Self::Success => "linear-gradient(135deg, #48bb78, #38a169)",
            Self::Error => "linear-gradient(135deg, #e53e3e, #c53030)",
            Self::Info => "linear-gradient(135deg, #4299e1, #3182ce)",
        }
    }

    /// Parse the host-facing name; anything unknown is `Info`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "success" => Self::Success,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }
}

/// A fully rendered alert node, ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertOverlay {
    pub id: AlertId,
    pub kind: AlertKind,
    /// Unescaped message, for inspection.
    pub message: String,
    /// Inner markup with the message escaped.
    pub markup: Markup,
    /// Inline `style` attribute.
    pub css_text: String,
}

impl AlertOverlay {
    #[must_use]
    pub fn new(id: AlertId, kind: AlertKind, message: &str) -> Self {
        let mut markup = Markup::new();
        markup
            .raw(r#"<div class="alert-content"><span class="alert-icon">"#)
            .raw(kind.icon())
            .raw(r#"</span><span class="alert-message">"#)
            .text(message)
            .raw(r#"</span><button class="alert-close" type="button">&times;</button></div>"#);

        let css_text = format!(
            "position: fixed; top: 100px; right: 20px; max-width: 400px; \
             background: {}; color: white; border-radius: 12px; \
             box-shadow: 0 10px 30px rgba(0,0,0,0.2); z-index: 10000; \
             transform: {HIDDEN_TRANSFORM}; transition: transform 0.3s ease;",
            kind.background()
        );

        Self {
            id,
            kind,
            message: message.to_string(),
            markup,
            css_text,
        }
    }

    /// Transform at insertion time (off-screen).
    #[must_use]
    pub const fn initial_transform(&self) -> &'static str {
        HIDDEN_TRANSFORM
    }
}

/// Bookkeeping for the visible alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveAlert {
    pub id: AlertId,
    pub kind: AlertKind,
    pub message: String,
    pub revealed: bool,
    reveal_timer: TimerId,
    dismiss_timer: TimerId,
}

/// Shows, reveals, and dismisses the single alert overlay.
#[derive(Debug, Clone)]
pub struct AlertPresenter {
    reveal_delay: Duration,
    timeout: Duration,
    next_id: u64,
    active: Option<ActiveAlert>,
}

impl AlertPresenter {
    #[must_use]
    pub fn new(reveal_delay: Duration, timeout: Duration) -> Self {
        Self {
            reveal_delay,
            timeout,
            next_id: 1,
            active: None,
        }
    }

    /// Replace any visible alert with a new one.
    pub fn show<V: PageView + ?Sized>(
        &mut self,
        view: &mut V,
        timers: &mut TimerQueue,
        message: &str,
        kind: AlertKind,
    ) -> AlertId {
        if let Some(previous) = self.take_active(timers) {
            view.remove_alert();
            tracing::debug!(alert = previous.id.0, "alert superseded");
        }

        let id = AlertId(self.next_id);
        self.next_id += 1;

        view.ensure_stylesheet(ALERT_STYLESHEET_ID, ALERT_STYLESHEET);
        view.mount_alert(&AlertOverlay::new(id, kind, message));

        let reveal_timer = timers.schedule_after(self.reveal_delay, TimerTask::RevealAlert(id));
        let dismiss_timer = timers.schedule_after(self.timeout, TimerTask::DismissAlert(id));
        self.active = Some(ActiveAlert {
            id,
            kind,
            message: message.to_string(),
            revealed: false,
            reveal_timer,
            dismiss_timer,
        });

        tracing::debug!(alert = id.0, ?kind, "alert shown");
        id
    }

    /// Remove the visible alert now. No-op when none is visible.
    pub fn dismiss<V: PageView + ?Sized>(&mut self, view: &mut V, timers: &mut TimerQueue) -> bool {
        match self.take_active(timers) {
            Some(alert) => {
                view.remove_alert();
                tracing::debug!(alert = alert.id.0, "alert dismissed");
                true
            }
            None => false,
        }
    }

    /// Apply a fired timer. Tasks for alerts that are no longer visible are
    /// ignored. Returns `true` if the task belonged to the alert presenter.
    pub fn on_timer<V: PageView + ?Sized>(
        &mut self,
        view: &mut V,
        timers: &mut TimerQueue,
        task: TimerTask,
    ) -> bool {
        match task {
            TimerTask::RevealAlert(id) => {
                if let Some(active) = self.active.as_mut().filter(|a| a.id == id) {
                    active.revealed = view.set_alert_transform(SHOWN_TRANSFORM);
                }
                true
            }
            TimerTask::DismissAlert(id) => {
                if self.active.as_ref().is_some_and(|a| a.id == id) {
                    self.dismiss(view, timers);
                }
                true
            }
            TimerTask::SettlePulse => false,
        }
    }

    #[must_use]
    pub fn active(&self) -> Option<&ActiveAlert> {
        self.active.as_ref()
    }

    fn take_active(&mut self, timers: &mut TimerQueue) -> Option<ActiveAlert> {
        let alert = self.active.take()?;
        timers.cancel(alert.reveal_timer);
        timers.cancel(alert.dismiss_timer);
        Some(alert)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::MemoryView;

    fn presenter() -> AlertPresenter {
        AlertPresenter::new(Duration::from_millis(100), Duration::from_secs(5))
    }

    fn fire(
        alerts: &mut AlertPresenter,
        view: &mut MemoryView,
        timers: &mut TimerQueue,
        now: Duration,
    ) {
        for task in timers.advance_to(now) {
            alerts.on_timer(view, timers, task);
        }
    }

    #[test]
    fn overlay_escapes_message_and_styles_per_kind() {
        let overlay = AlertOverlay::new(AlertId(1), AlertKind::Error, "<b>Gagal</b>");
        assert!(overlay.markup.as_str().contains("&lt;b&gt;Gagal&lt;/b&gt;"));
        assert!(overlay.markup.as_str().contains("\u{274C}"));
        assert!(overlay.css_text.contains("#e53e3e"));
        assert!(overlay.css_text.contains("translateX(450px)"));
    }

    #[test]
    fn kinds_are_distinct() {
        let kinds = [AlertKind::Success, AlertKind::Error, AlertKind::Info];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a.icon(), b.icon());
                assert_ne!(a.background(), b.background());
            }
        }
        assert_eq!(AlertKind::default(), AlertKind::Info);
        assert_eq!(AlertKind::from_name("warning"), AlertKind::Info);
        assert_eq!(AlertKind::from_name("success"), AlertKind::Success);
    }

    #[test]
    fn slides_in_then_auto_dismisses() {
        let (mut alerts, mut view, mut timers) = (presenter(), MemoryView::new(), TimerQueue::new());
        alerts.show(&mut view, &mut timers, "Halo", AlertKind::Info);
        assert_eq!(view.alert().unwrap().transform, "translateX(450px)");

        fire(&mut alerts, &mut view, &mut timers, Duration::from_millis(100));
        assert_eq!(view.alert().unwrap().transform, "translateX(0)");
        assert!(alerts.active().unwrap().revealed);

        fire(&mut alerts, &mut view, &mut timers, Duration::from_millis(4999));
        assert!(view.alert().is_some());
        fire(&mut alerts, &mut view, &mut timers, Duration::from_secs(5));
        assert!(view.alert().is_none());
        assert!(alerts.active().is_none());
        assert!(timers.is_empty());
    }

    #[test]
    fn second_alert_replaces_first_and_cancels_its_timers() {
        let (mut alerts, mut view, mut timers) = (presenter(), MemoryView::new(), TimerQueue::new());
        alerts.show(&mut view, &mut timers, "pertama", AlertKind::Info);
        timers.advance_to(Duration::from_secs(3));
        let second = alerts.show(&mut view, &mut timers, "kedua", AlertKind::Success);

        assert_eq!(view.alert_mounts(), 2);
        assert_eq!(view.alert().unwrap().overlay.message, "kedua");
        assert_eq!(timers.len(), 2);

        // The first alert's 5s deadline passes; the second stays.
        fire(&mut alerts, &mut view, &mut timers, Duration::from_millis(5500));
        assert_eq!(view.alert().unwrap().overlay.id, second);
        fire(&mut alerts, &mut view, &mut timers, Duration::from_secs(8));
        assert!(view.alert().is_none());
    }

    #[test]
    fn dismiss_is_idempotent() {
        let (mut alerts, mut view, mut timers) = (presenter(), MemoryView::new(), TimerQueue::new());
        alerts.show(&mut view, &mut timers, "x", AlertKind::Error);
        assert!(alerts.dismiss(&mut view, &mut timers));
        assert!(!alerts.dismiss(&mut view, &mut timers));
        assert!(view.alert().is_none());
        assert!(timers.is_empty());
    }

    #[test]
    fn stylesheet_injected_once() {
        let (mut alerts, mut view, mut timers) = (presenter(), MemoryView::new(), TimerQueue::new());
        alerts.show(&mut view, &mut timers, "a", AlertKind::Info);
        alerts.show(&mut view, &mut timers, "b", AlertKind::Info);
        assert_eq!(view.stylesheets(), [ALERT_STYLESHEET_ID.to_string()]);
    }

    #[test]
    fn stale_tasks_are_ignored() {
        let (mut alerts, mut view, mut timers) = (presenter(), MemoryView::new(), TimerQueue::new());
        let first = alerts.show(&mut view, &mut timers, "a", AlertKind::Info);
        alerts.show(&mut view, &mut timers, "b", AlertKind::Info);
        assert!(alerts.on_timer(&mut view, &mut timers, TimerTask::DismissAlert(first)));
        assert!(view.alert().is_some());
        assert!(!alerts.on_timer(&mut view, &mut timers, TimerTask::SettlePulse));
    }
}
