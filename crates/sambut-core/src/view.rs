//! The page's capability surface.
//!
//! Controllers never touch a document directly. They ask a [`PageView`] to
//! read field values and to set text, markup, styles and classes on elements
//! named by [`ElementId`]. `sambut-web` implements the trait over the DOM;
//! [`MemoryView`] implements it over plain maps for tests and native hosts.
//!
//! Operations on elements the page does not contain are no-ops, mirroring a
//! page that omits an optional section.

use std::collections::{BTreeSet, HashMap};

use crate::alert::AlertOverlay;
use crate::markup::Markup;
use crate::validation::FormField;

/// A stable element of the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementId {
    /// Greeting display (`#user-name`).
    UserName,
    /// Greeting input (`#nameInput`).
    NameInput,
    /// Contact form (`#messageForm`).
    MessageForm,
    /// A contact form input.
    Field(FormField),
    /// Inline error slot of a contact form input.
    FieldError(FormField),
    /// History panel (`#submissionDisplay`).
    SubmissionDisplay,
    /// Navigation menu (`#nav-menu`).
    NavMenu,
    /// The page header (`header`).
    Header,
    /// Target of an in-page link, by element id.
    Anchor(String),
}

impl ElementId {
    /// The element's DOM id, or its tag selector for [`ElementId::Header`].
    #[must_use]
    pub fn dom_id(&self) -> &str {
        match self {
            Self::UserName => "user-name",
            Self::NameInput => "nameInput",
            Self::MessageForm => "messageForm",
            Self::Field(f) => f.dom_id(),
            Self::FieldError(f) => f.error_dom_id(),
            Self::SubmissionDisplay => "submissionDisplay",
            Self::NavMenu => "nav-menu",
            Self::Header => "header",
            Self::Anchor(id) => id.as_str(),
        }
    }
}

/// Inline style properties the page writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    BorderColor,
    Transform,
    BoxShadow,
}

impl StyleProperty {
    #[must_use]
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::BorderColor => "border-color",
            Self::Transform => "transform",
            Self::BoxShadow => "box-shadow",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

/// Everything the controllers need from a document.
pub trait PageView {
    /// Current value of an input or textarea; `None` if the element is absent.
    fn value(&self, id: &ElementId) -> Option<String>;

    fn set_value(&mut self, id: &ElementId, value: &str);

    /// Replace the element's text content.
    fn set_text(&mut self, id: &ElementId, text: &str);

    /// Replace the element's children with `markup`.
    fn set_markup(&mut self, id: &ElementId, markup: &Markup);

    fn set_style(&mut self, id: &ElementId, property: StyleProperty, value: &str);

    /// Add (`on = true`) or remove a class.
    fn set_class(&mut self, id: &ElementId, class: &str, on: bool);

    #[must_use]
    fn has_class(&self, id: &ElementId, class: &str) -> bool;

    /// Reset every control of the contact form to its initial value.
    fn reset_form(&mut self);

    /// Distance from the document top to the element, in CSS pixels.
    #[must_use]
    fn offset_top(&self, id: &ElementId) -> Option<f64>;

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);

    /// Current vertical scroll offset.
    #[must_use]
    fn scroll_y(&self) -> f64;

    /// Insert a stylesheet once; later calls with the same id do nothing.
    fn ensure_stylesheet(&mut self, id: &str, css: &str);

    /// Insert the alert overlay node.
    fn mount_alert(&mut self, overlay: &AlertOverlay);

    /// Remove the alert overlay node. Returns `false` if none was present.
    fn remove_alert(&mut self) -> bool;

    /// Set the alert overlay's transform. Returns `false` if none is present.
    fn set_alert_transform(&mut self, transform: &str) -> bool;
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory view
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
struct ElementState {
    value: String,
    text: String,
    markup: Option<Markup>,
    styles: HashMap<StyleProperty, String>,
    classes: BTreeSet<String>,
    offset_top: f64,
}

/// Alert overlay currently attached to a [`MemoryView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountedAlert {
    pub overlay: AlertOverlay,
    pub transform: String,
}

/// A [`PageView`] over plain maps.
///
/// Only registered elements exist; writes to anything else are ignored, the
/// way the browser page ignores sections it does not contain.
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    elements: HashMap<ElementId, ElementState>,
    stylesheets: Vec<String>,
    alert: Option<MountedAlert>,
    alert_mounts: usize,
    scroll_y: f64,
    scroll_log: Vec<(f64, ScrollBehavior)>,
}

impl MemoryView {
    /// An empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A document with every element the contact page defines.
    #[must_use]
    pub fn contact_page() -> Self {
        let mut view = Self::new()
            .with_element(ElementId::UserName)
            .with_element(ElementId::NameInput)
            .with_element(ElementId::MessageForm)
            .with_element(ElementId::SubmissionDisplay)
            .with_element(ElementId::NavMenu)
            .with_element(ElementId::Header);
        for field in FormField::ALL {
            view = view
                .with_element(ElementId::Field(field))
                .with_element(ElementId::FieldError(field));
        }
        view
    }

    #[must_use]
    pub fn with_element(mut self, id: ElementId) -> Self {
        self.elements.entry(id).or_default();
        self
    }

    /// Register an in-page link target at `offset_top`.
    #[must_use]
    pub fn with_anchor(mut self, id: impl Into<String>, offset_top: f64) -> Self {
        self.elements
            .entry(ElementId::Anchor(id.into()))
            .or_default()
            .offset_top = offset_top;
        self
    }

    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.elements.contains_key(id)
    }

    /// Type into a contact form field.
    pub fn set_input(&mut self, field: FormField, value: &str) {
        self.set_value(&ElementId::Field(field), value);
    }

    /// Value of a contact form field; empty if absent.
    #[must_use]
    pub fn input(&self, field: FormField) -> &str {
        self.elements
            .get(&ElementId::Field(field))
            .map_or("", |e| e.value.as_str())
    }

    #[must_use]
    pub fn field_error(&self, field: FormField) -> &str {
        self.text(&ElementId::FieldError(field))
    }

    #[must_use]
    pub fn text(&self, id: &ElementId) -> &str {
        self.elements.get(id).map_or("", |e| e.text.as_str())
    }

    #[must_use]
    pub fn markup(&self, id: &ElementId) -> Option<&Markup> {
        self.elements.get(id).and_then(|e| e.markup.as_ref())
    }

    #[must_use]
    pub fn style(&self, id: &ElementId, property: StyleProperty) -> Option<&str> {
        self.elements
            .get(id)
            .and_then(|e| e.styles.get(&property))
            .map(String::as_str)
    }

    #[must_use]
    pub fn alert(&self) -> Option<&MountedAlert> {
        self.alert.as_ref()
    }

    /// Number of alert overlays ever inserted.
    #[must_use]
    pub fn alert_mounts(&self) -> usize {
        self.alert_mounts
    }

    #[must_use]
    pub fn stylesheets(&self) -> &[String] {
        &self.stylesheets
    }

    /// Simulate the visitor scrolling the window.
    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y;
    }

    /// Every programmatic scroll, in order.
    #[must_use]
    pub fn scroll_log(&self) -> &[(f64, ScrollBehavior)] {
        &self.scroll_log
    }
}

impl PageView for MemoryView {
    fn value(&self, id: &ElementId) -> Option<String> {
        self.elements.get(id).map(|e| e.value.clone())
    }

    fn set_value(&mut self, id: &ElementId, value: &str) {
        if let Some(e) = self.elements.get_mut(id) {
            e.value = value.to_string();
        }
    }

    fn set_text(&mut self, id: &ElementId, text: &str) {
        if let Some(e) = self.elements.get_mut(id) {
            e.text = text.to_string();
            e.markup = None;
        }
    }

    fn set_markup(&mut self, id: &ElementId, markup: &Markup) {
        if let Some(e) = self.elements.get_mut(id) {
            e.text.clear();
            e.markup = Some(markup.clone());
        }
    }

    fn set_style(&mut self, id: &ElementId, property: StyleProperty, value: &str) {
        if let Some(e) = self.elements.get_mut(id) {
            e.styles.insert(property, value.to_string());
        }
    }

    fn set_class(&mut self, id: &ElementId, class: &str, on: bool) {
        if let Some(e) = self.elements.get_mut(id) {
            if on {
                e.classes.insert(class.to_string());
            } else {
                e.classes.remove(class);
            }
        }
    }

    fn has_class(&self, id: &ElementId, class: &str) -> bool {
        self.elements
            .get(id)
            .is_some_and(|e| e.classes.contains(class))
    }

    fn reset_form(&mut self) {
        if !self.contains(&ElementId::MessageForm) {
            return;
        }
        for field in FormField::ALL {
            self.set_value(&ElementId::Field(field), "");
        }
    }

    fn offset_top(&self, id: &ElementId) -> Option<f64> {
        self.elements.get(id).map(|e| e.offset_top)
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        self.scroll_y = top.max(0.0);
        self.scroll_log.push((top, behavior));
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn ensure_stylesheet(&mut self, id: &str, _css: &str) {
        if !self.stylesheets.iter().any(|s| s == id) {
            self.stylesheets.push(id.to_string());
        }
    }

    fn mount_alert(&mut self, overlay: &AlertOverlay) {
        self.alert = Some(MountedAlert {
            overlay: overlay.clone(),
            transform: overlay.initial_transform().to_string(),
        });
        self.alert_mounts += 1;
    }

    fn remove_alert(&mut self) -> bool {
        self.alert.take().is_some()
    }

    fn set_alert_transform(&mut self, transform: &str) -> bool {
        match self.alert.as_mut() {
            Some(alert) => {
                alert.transform = transform.to_string();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_ids_match_page_markup() {
        assert_eq!(ElementId::UserName.dom_id(), "user-name");
        assert_eq!(ElementId::NameInput.dom_id(), "nameInput");
        assert_eq!(ElementId::FieldError(FormField::Phone).dom_id(), "phone-error");
        assert_eq!(ElementId::Anchor("kontak".into()).dom_id(), "kontak");
    }

    #[test]
    fn writes_to_missing_elements_are_ignored() {
        let mut view = MemoryView::new();
        view.set_text(&ElementId::UserName, "Rina");
        view.set_class(&ElementId::NavMenu, "active", true);
        assert_eq!(view.value(&ElementId::UserName), None);
        assert!(!view.has_class(&ElementId::NavMenu, "active"));
    }

    #[test]
    fn text_and_markup_replace_each_other() {
        let mut view = MemoryView::contact_page();
        let mut m = Markup::new();
        m.raw("<p>x</p>");
        view.set_markup(&ElementId::SubmissionDisplay, &m);
        view.set_text(&ElementId::SubmissionDisplay, "plain");
        assert!(view.markup(&ElementId::SubmissionDisplay).is_none());
        assert_eq!(view.text(&ElementId::SubmissionDisplay), "plain");
    }

    #[test]
    fn reset_form_clears_only_form_fields() {
        let mut view = MemoryView::contact_page();
        for field in FormField::ALL {
            view.set_input(field, "x");
        }
        view.set_value(&ElementId::NameInput, "Rina");
        view.reset_form();
        for field in FormField::ALL {
            assert_eq!(view.input(field), "");
        }
        assert_eq!(view.value(&ElementId::NameInput).as_deref(), Some("Rina"));
    }

    #[test]
    fn stylesheets_are_inserted_once() {
        let mut view = MemoryView::new();
        view.ensure_stylesheet("alert-styles", "a{}");
        view.ensure_stylesheet("alert-styles", "a{}");
        assert_eq!(view.stylesheets(), ["alert-styles".to_string()]);
    }
}
