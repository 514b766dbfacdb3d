#![forbid(unsafe_code)]

//! Host-driven page runner.
//!
//! [`Page`] owns the view, the store adapter, the timer queue and every
//! controller. The host controls the event loop:
//!
//! 1. Call [`Page::handle`] with [`PageEvent::Loaded`] once the document is
//!    ready.
//! 2. Forward visitor events via [`Page::handle`].
//! 3. After each event, arm a single host timer for [`Page::next_deadline`]
//!    and, when it fires, call [`Page::advance_to`] with the elapsed
//!    monotonic time.
//!
//! # Lifecycle
//!
//! ```text
//!  Loaded ──► load saved name, load + render history
//!  FieldBlur / FieldInput / FormSubmit ──► MessageForm
//!  GreetingSubmit / NameInputKey("Enter") ──► GreetingController
//!  MenuToggle / AnchorClick ──► NavigationController
//!  Scroll ──► ScrollStyler
//!  AlertClose ──► AlertPresenter::dismiss
//!  advance_to ──► RevealAlert / DismissAlert / SettlePulse
//! ```

use core::time::Duration;

use crate::alert::{AlertId, AlertKind, AlertPresenter};
use crate::config::PageConfig;
use crate::form::{MessageForm, SubmitOutcome};
use crate::greeting::{GreetingController, GreetingOutcome};
use crate::history::HistoryRenderer;
use crate::navigation::{AnchorOutcome, NavigationController};
use crate::scroll::{HeaderShadow, ScrollStyler};
use crate::storage::{KeyValueStore, PersistentStore};
use crate::submission::{SubmissionHistory, TimestampSource};
use crate::timer::TimerQueue;
use crate::validation::FormField;
use crate::view::{ElementId, PageView};

/// A visitor or browser event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// The document finished loading.
    Loaded,
    /// A key was pressed in the greeting input.
    NameInputKey(String),
    /// The greeting button was clicked.
    GreetingSubmit,
    FieldBlur(FormField),
    FieldInput(FormField),
    FormSubmit,
    MenuToggle,
    /// An in-page link was clicked; carries its `href`.
    AnchorClick(String),
    Scroll,
    /// The alert's close button was clicked.
    AlertClose,
}

/// Borrowed services a controller needs while handling one event.
pub struct PageContext<'a, V: PageView + ?Sized, S> {
    pub view: &'a mut V,
    pub store: &'a PersistentStore<S>,
    pub alerts: &'a mut AlertPresenter,
    pub timers: &'a mut TimerQueue,
}

impl<V: PageView + ?Sized, S: KeyValueStore> PageContext<'_, V, S> {
    /// Show an alert, replacing any visible one.
    pub fn alert(&mut self, message: &str, kind: AlertKind) -> AlertId {
        self.alerts.show(&mut *self.view, &mut *self.timers, message, kind)
    }
}

/// The whole page, driven by host events and host time.
pub struct Page<V, S> {
    config: PageConfig,
    view: V,
    store: PersistentStore<S>,
    timers: TimerQueue,
    alerts: AlertPresenter,
    greeting: GreetingController,
    form: MessageForm,
    navigation: NavigationController,
    scroll: ScrollStyler,
    clock: Box<dyn TimestampSource>,
}

impl<V: PageView, S: KeyValueStore> Page<V, S> {
    #[must_use]
    pub fn new(
        view: V,
        backend: S,
        config: PageConfig,
        clock: impl TimestampSource + 'static,
    ) -> Self {
        Self {
            store: PersistentStore::new(backend, config.storage_keys.clone()),
            timers: TimerQueue::new(),
            alerts: AlertPresenter::new(config.alert_reveal_delay(), config.alert_timeout()),
            greeting: GreetingController::new(config.pulse_duration()),
            form: MessageForm::new(HistoryRenderer::new(config.history_preview_limit)),
            navigation: NavigationController::new(config.header_offset_px),
            scroll: ScrollStyler::new(config.shadow_threshold_px),
            clock: Box::new(clock),
            config,
            view,
        }
    }

    /// Dispatch one event.
    pub fn handle(&mut self, event: PageEvent) {
        tracing::trace!(?event, "page event");
        match event {
            PageEvent::Loaded => self.load(),
            PageEvent::NameInputKey(key) => {
                if key == "Enter" {
                    self.update_greeting();
                }
            }
            PageEvent::GreetingSubmit => {
                self.update_greeting();
            }
            PageEvent::FieldBlur(field) => {
                self.form.on_blur(&mut self.view, field);
            }
            PageEvent::FieldInput(field) => self.form.on_input(&mut self.view, field),
            PageEvent::FormSubmit => {
                self.submit_form();
            }
            PageEvent::MenuToggle => {
                self.navigation.toggle_menu(&mut self.view);
            }
            PageEvent::AnchorClick(href) => {
                self.follow_anchor(&href);
            }
            PageEvent::Scroll => {
                self.restyle_header();
            }
            PageEvent::AlertClose => {
                self.alerts.dismiss(&mut self.view, &mut self.timers);
            }
        }
    }

    /// Restore the saved name and the submission history.
    pub fn load(&mut self) {
        self.greeting.load_saved_name(&mut self.view, &self.store);
        self.form.load_history(&mut self.view, &self.store);
        tracing::info!(
            backend = self.store.backend().name(),
            submissions = self.form.history().len(),
            "page loaded"
        );
    }

    /// Apply the greeting input's current value.
    pub fn update_greeting(&mut self) -> GreetingOutcome {
        let raw = self.view.value(&ElementId::NameInput).unwrap_or_default();
        let mut ctx = PageContext {
            view: &mut self.view,
            store: &self.store,
            alerts: &mut self.alerts,
            timers: &mut self.timers,
        };
        self.greeting.update_welcome_message(&mut ctx, &raw)
    }

    pub fn submit_form(&mut self) -> SubmitOutcome {
        let mut ctx = PageContext {
            view: &mut self.view,
            store: &self.store,
            alerts: &mut self.alerts,
            timers: &mut self.timers,
        };
        self.form.submit(&mut ctx, self.clock.as_ref())
    }

    pub fn follow_anchor(&mut self, href: &str) -> AnchorOutcome {
        self.navigation.follow_anchor(&mut self.view, href)
    }

    pub fn restyle_header(&mut self) -> HeaderShadow {
        self.scroll.apply(&mut self.view)
    }

    /// Show an arbitrary alert.
    pub fn show_alert(&mut self, message: &str, kind: AlertKind) -> AlertId {
        self.alerts.show(&mut self.view, &mut self.timers, message, kind)
    }

    /// Advance page time to `now` and run every timer that came due.
    /// Returns the number of tasks run.
    pub fn advance_to(&mut self, now: Duration) -> usize {
        let due = self.timers.advance_to(now);
        for &task in &due {
            tracing::trace!(?task, "timer fired");
            if !self.alerts.on_timer(&mut self.view, &mut self.timers, task) {
                self.greeting.on_timer(&mut self.view, task);
            }
        }
        due.len()
    }

    /// When the host should next call [`Page::advance_to`].
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    #[must_use]
    pub fn history(&self) -> &SubmissionHistory {
        self.form.history()
    }

    #[must_use]
    pub fn alerts(&self) -> &AlertPresenter {
        &self.alerts
    }

    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.navigation.is_menu_open(&self.view)
    }

    #[must_use]
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &PersistentStore<S> {
        &self.store
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Tear down, returning the view and the storage backend.
    pub fn into_parts(self) -> (V, S) {
        (self.view, self.store.into_backend())
    }
}
