//! Contact form controller.
//!
//! Owns the in-memory submission history. The history is read from the store
//! once at load, updated in memory on every accepted submission, and then
//! written back in full.

use crate::alert::AlertKind;
use crate::history::HistoryRenderer;
use crate::messages;
use crate::page::PageContext;
use crate::storage::{KeyValueStore, PersistentStore};
use crate::submission::{ContactSubmission, SubmissionHistory, TimestampSource};
use crate::validation::{FormField, ValidationError, ValidationResult, trim_browser};
use crate::view::{ElementId, PageView, StyleProperty};

const BORDER_INVALID: &str = "#e53e3e";
const BORDER_VALID: &str = "#48bb78";
const BORDER_NEUTRAL: &str = "#e2e8f0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Stored at the head of the history.
    Accepted(ContactSubmission),
    /// Every failing field, in display order. Nothing was stored.
    Rejected(Vec<(FormField, ValidationError)>),
}

impl SubmitOutcome {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct MessageForm {
    history: SubmissionHistory,
    renderer: HistoryRenderer,
}

impl MessageForm {
    #[must_use]
    pub fn new(renderer: HistoryRenderer) -> Self {
        Self {
            history: SubmissionHistory::new(),
            renderer,
        }
    }

    /// Replace the in-memory history with the stored one and render it.
    pub fn load_history<V, S>(&mut self, view: &mut V, store: &PersistentStore<S>)
    where
        V: PageView + ?Sized,
        S: KeyValueStore,
    {
        self.history = store.load_history();
        tracing::debug!(entries = self.history.len(), "submission history loaded");
        self.render(view);
    }

    /// Re-render the history panel from the in-memory history.
    pub fn render<V: PageView + ?Sized>(&self, view: &mut V) {
        view.set_markup(&ElementId::SubmissionDisplay, &self.renderer.render(&self.history));
    }

    /// Validate one field as it loses focus and show the outcome inline.
    pub fn on_blur<V: PageView + ?Sized>(&self, view: &mut V, field: FormField) -> ValidationResult {
        let value = view.value(&ElementId::Field(field)).unwrap_or_default();
        let result = field.validate(&value);
        view.set_text(&ElementId::FieldError(field), result.inline_text());
        let border = if result.is_valid() {
            BORDER_VALID
        } else {
            BORDER_INVALID
        };
        view.set_style(&ElementId::Field(field), StyleProperty::BorderColor, border);
        result
    }

    /// Clear a field's inline error while the visitor types. Does not
    /// re-validate.
    pub fn on_input<V: PageView + ?Sized>(&self, view: &mut V, field: FormField) {
        view.set_style(&ElementId::Field(field), StyleProperty::BorderColor, BORDER_NEUTRAL);
        view.set_text(&ElementId::FieldError(field), "");
    }

    /// Validate every field, then either store the submission or reject the
    /// whole form.
    ///
    /// All four validators always run and all four error slots are written,
    /// so the visitor sees every problem at once.
    pub fn submit<V, S>(
        &mut self,
        ctx: &mut PageContext<'_, V, S>,
        clock: &dyn TimestampSource,
    ) -> SubmitOutcome
    where
        V: PageView + ?Sized,
        S: KeyValueStore,
    {
        let values = FormField::ALL.map(|field| {
            let raw = ctx.view.value(&ElementId::Field(field)).unwrap_or_default();
            trim_browser(&raw).to_string()
        });

        let mut errors = Vec::new();
        for (field, value) in FormField::ALL.into_iter().zip(&values) {
            let result = field.validate(value);
            ctx.view
                .set_text(&ElementId::FieldError(field), result.inline_text());
            if let ValidationResult::Invalid(err) = result {
                errors.push((field, err));
            }
        }

        if !errors.is_empty() {
            tracing::debug!(
                invalid = ?errors.iter().map(|(f, e)| (f.dom_id(), e.code)).collect::<Vec<_>>(),
                "contact form rejected"
            );
            ctx.alert(messages::FORM_REJECTED, AlertKind::Error);
            return SubmitOutcome::Rejected(errors);
        }

        let [name, email, phone, message] = values;
        let submission = ContactSubmission {
            name,
            email,
            phone,
            message,
            timestamp: clock.now_label(),
        };

        self.history.prepend(submission.clone());
        if let Err(err) = ctx.store.save_history(&self.history) {
            tracing::warn!(
                error = %err,
                entries = self.history.len(),
                "could not persist submission history"
            );
        }

        self.render(&mut *ctx.view);
        ctx.view.reset_form();
        ctx.alert(messages::FORM_ACCEPTED, AlertKind::Success);
        tracing::info!(entries = self.history.len(), "contact form accepted");
        SubmitOutcome::Accepted(submission)
    }

    #[must_use]
    pub fn history(&self) -> &SubmissionHistory {
        &self.history
    }
}
