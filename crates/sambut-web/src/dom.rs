#![forbid(unsafe_code)]

//! [`PageView`] over the live document.
//!
//! Elements are looked up on every call. The page markup is static, so this
//! costs one `getElementById` per write and never holds stale nodes.

use sambut_core::alert::ALERT_DOM_ID;
use sambut_core::{AlertOverlay, ElementId, Markup, PageView, ScrollBehavior, StyleProperty};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement,
    ScrollToOptions, Window,
};

use crate::storage::js_error_text;

pub(crate) struct DomView {
    window: Window,
    document: Document,
}

impl DomView {
    pub(crate) fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    fn element(&self, id: &ElementId) -> Option<Element> {
        match id {
            ElementId::Header => self.document.query_selector("header").ok().flatten(),
            other => self.document.get_element_by_id(other.dom_id()),
        }
    }

    fn html_element(&self, id: &ElementId) -> Option<HtmlElement> {
        self.element(id)?.dyn_into::<HtmlElement>().ok()
    }

    fn set_inline_style(element: &HtmlElement, property: &str, value: &str) {
        if let Err(err) = element.style().set_property(property, value) {
            tracing::debug!(property, error = %js_error_text(&err), "style write rejected");
        }
    }
}

impl PageView for DomView {
    fn value(&self, id: &ElementId) -> Option<String> {
        let element = self.element(id)?;
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            return Some(input.value());
        }
        element
            .dyn_ref::<HtmlTextAreaElement>()
            .map(HtmlTextAreaElement::value)
    }

    fn set_value(&mut self, id: &ElementId, value: &str) {
        let Some(element) = self.element(id) else {
            return;
        };
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        }
    }

    fn set_text(&mut self, id: &ElementId, text: &str) {
        if let Some(element) = self.element(id) {
            element.set_text_content(Some(text));
        }
    }

    fn set_markup(&mut self, id: &ElementId, markup: &Markup) {
        if let Some(element) = self.element(id) {
            element.set_inner_html(markup.as_str());
        }
    }

    fn set_style(&mut self, id: &ElementId, property: StyleProperty, value: &str) {
        if let Some(element) = self.html_element(id) {
            Self::set_inline_style(&element, property.css_name(), value);
        }
    }

    fn set_class(&mut self, id: &ElementId, class: &str, on: bool) {
        if let Some(element) = self.element(id) {
            let _ = element.class_list().toggle_with_force(class, on);
        }
    }

    fn has_class(&self, id: &ElementId, class: &str) -> bool {
        self.element(id)
            .is_some_and(|element| element.class_list().contains(class))
    }

    fn reset_form(&mut self) {
        if let Some(form) = self
            .element(&ElementId::MessageForm)
            .and_then(|element| element.dyn_into::<HtmlFormElement>().ok())
        {
            form.reset();
        }
    }

    fn offset_top(&self, id: &ElementId) -> Option<f64> {
        self.html_element(id)
            .map(|element| f64::from(element.offset_top()))
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match behavior {
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn scroll_y(&self) -> f64 {
        self.window.page_y_offset().unwrap_or(0.0)
    }

    fn ensure_stylesheet(&mut self, id: &str, css: &str) {
        if self.document.get_element_by_id(id).is_some() {
            return;
        }
        let Some(head) = self.document.head() else {
            return;
        };
        let style = match self.document.create_element("style") {
            Ok(style) => style,
            Err(err) => {
                tracing::warn!(error = %js_error_text(&err), "could not create stylesheet");
                return;
            }
        };
        style.set_id(id);
        style.set_text_content(Some(css));
        if let Err(err) = head.append_child(&style) {
            tracing::warn!(error = %js_error_text(&err), "could not insert stylesheet");
        }
    }

    fn mount_alert(&mut self, overlay: &AlertOverlay) {
        let Some(body) = self.document.body() else {
            return;
        };
        let node = match self.document.create_element("div") {
            Ok(node) => node,
            Err(err) => {
                tracing::warn!(error = %js_error_text(&err), "could not create alert");
                return;
            }
        };
        node.set_id(ALERT_DOM_ID);
        let _ = node.set_attribute("style", &overlay.css_text);
        node.set_inner_html(overlay.markup.as_str());
        if let Err(err) = body.append_child(&node) {
            tracing::warn!(error = %js_error_text(&err), "could not insert alert");
        }
    }

    fn remove_alert(&mut self) -> bool {
        match self.document.get_element_by_id(ALERT_DOM_ID) {
            Some(node) => {
                node.remove();
                true
            }
            None => false,
        }
    }

    fn set_alert_transform(&mut self, transform: &str) -> bool {
        let Some(node) = self
            .document
            .get_element_by_id(ALERT_DOM_ID)
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
        else {
            return false;
        };
        Self::set_inline_style(&node, StyleProperty::Transform.css_name(), transform);
        true
    }
}
