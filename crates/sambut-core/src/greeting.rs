//! Personalized greeting.

use core::time::Duration;

use crate::alert::AlertKind;
use crate::messages;
use crate::page::PageContext;
use crate::storage::{KeyValueStore, PersistentStore};
use crate::timer::{TimerId, TimerTask};
use crate::validation::{
    ValidationError, ValidationResult, trim_browser, validate_display_name,
};
use crate::view::{ElementId, PageView, StyleProperty};

const PULSE_TRANSFORM: &str = "scale(1.1)";
const REST_TRANSFORM: &str = "scale(1)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GreetingOutcome {
    /// The trimmed name was displayed and saved.
    Updated(String),
    Rejected(ValidationError),
}

/// Reads, validates, shows, and saves the visitor's display name.
#[derive(Debug, Clone)]
pub struct GreetingController {
    pulse_duration: Duration,
    pulse_timer: Option<TimerId>,
}

impl GreetingController {
    #[must_use]
    pub fn new(pulse_duration: Duration) -> Self {
        Self {
            pulse_duration,
            pulse_timer: None,
        }
    }

    /// Mirror a saved name into the greeting display and its input.
    pub fn load_saved_name<V, S>(&self, view: &mut V, store: &PersistentStore<S>) -> Option<String>
    where
        V: PageView + ?Sized,
        S: KeyValueStore,
    {
        let name = store.load_user_name()?;
        view.set_text(&ElementId::UserName, &name);
        view.set_value(&ElementId::NameInput, &name);
        Some(name)
    }

    /// Validate `raw`, then display, save, and celebrate it.
    ///
    /// On failure nothing changes except the error alert.
    pub fn update_welcome_message<V, S>(
        &mut self,
        ctx: &mut PageContext<'_, V, S>,
        raw: &str,
    ) -> GreetingOutcome
    where
        V: PageView + ?Sized,
        S: KeyValueStore,
    {
        let name = trim_browser(raw);
        if let ValidationResult::Invalid(err) = validate_display_name(name) {
            tracing::debug!(code = err.code, "greeting name rejected");
            ctx.alert(err.message, AlertKind::Error);
            return GreetingOutcome::Rejected(err);
        }

        ctx.view.set_text(&ElementId::UserName, name);
        if let Err(err) = ctx.store.save_user_name(name) {
            tracing::warn!(error = %err, "could not save display name");
        }

        ctx.view
            .set_style(&ElementId::UserName, StyleProperty::Transform, PULSE_TRANSFORM);
        if let Some(previous) = self.pulse_timer.take() {
            ctx.timers.cancel(previous);
        }
        self.pulse_timer = Some(
            ctx.timers
                .schedule_after(self.pulse_duration, TimerTask::SettlePulse),
        );

        ctx.view.set_value(&ElementId::NameInput, "");
        ctx.alert(&messages::welcome(name), AlertKind::Success);
        tracing::info!("greeting updated");
        GreetingOutcome::Updated(name.to_string())
    }

    /// Apply a fired timer. Returns `true` if the task was the pulse.
    pub fn on_timer<V: PageView + ?Sized>(&mut self, view: &mut V, task: TimerTask) -> bool {
        if task != TimerTask::SettlePulse {
            return false;
        }
        self.pulse_timer = None;
        view.set_style(&ElementId::UserName, StyleProperty::Transform, REST_TRANSFORM);
        true
    }

    #[must_use]
    pub fn is_pulsing(&self) -> bool {
        self.pulse_timer.is_some()
    }
}
