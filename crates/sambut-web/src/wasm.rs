#![forbid(unsafe_code)]

use std::cell::RefCell;

use sambut_core::{AlertKind, FormField, Page, PageConfig, PageEvent, TimestampSource};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_time::Instant;

use crate::dom::DomView;
use crate::storage::LocalStorageStore;
use crate::timing::timeout_delay_ms;
use crate::{console, options};

type WebPage = Page<DomView, LocalStorageStore>;
type EventHandler = Closure<dyn FnMut(web_sys::Event)>;

/// An attached DOM listener, detached again on unmount.
struct Listener {
    target: web_sys::EventTarget,
    event: &'static str,
    callback: EventHandler,
}

/// Everything the mounted page needs between browser callbacks.
struct Host {
    page: WebPage,
    origin: Instant,
    timer_handle: Option<i32>,
}

thread_local! {
    static HOST: RefCell<Option<Host>> = const { RefCell::new(None) };
    static LISTENERS: RefCell<Vec<Listener>> = const { RefCell::new(Vec::new()) };
    static TIMER_CALLBACK: RefCell<Option<Closure<dyn FnMut()>>> = const { RefCell::new(None) };
}

/// Timestamp labels in the visitor's Indonesian locale format.
struct LocaleTimestamp;

impl TimestampSource for LocaleTimestamp {
    fn now_label(&self) -> String {
        js_sys::Date::new_0()
            .to_locale_string("id-ID", &JsValue::UNDEFINED)
            .into()
    }
}

/// Handle to the page mounted on the current document.
///
/// The page itself lives in thread-local state so DOM listeners can reach it;
/// this handle only forwards calls. Mounting twice replaces the first page.
#[wasm_bindgen]
pub struct SambutPage {
    _private: (),
}

#[wasm_bindgen]
impl SambutPage {
    /// Mount the page. `options` is an optional JSON object overriding
    /// [`PageConfig`] fields.
    #[wasm_bindgen(constructor)]
    pub fn new(options: Option<String>) -> Result<SambutPage, JsValue> {
        let config = options::page_config(options.as_deref());
        console::install(&config.log_level);
        mount(config)?;
        Ok(Self { _private: () })
    }

    #[wasm_bindgen(js_name = updateWelcomeMessage)]
    pub fn update_welcome_message(&self) {
        dispatch(PageEvent::GreetingSubmit);
    }

    /// `kind` is `"success"`, `"error"` or `"info"`; anything else is info.
    #[wasm_bindgen(js_name = showAlert)]
    pub fn show_alert(&self, message: &str, kind: Option<String>) {
        show_alert(message, kind);
    }

    #[wasm_bindgen(js_name = closeAlert)]
    pub fn close_alert(&self) {
        dispatch(PageEvent::AlertClose);
    }

    /// Number of stored submissions.
    #[wasm_bindgen(js_name = historyLength)]
    pub fn history_length(&self) -> usize {
        HOST.with(|host| {
            host.borrow()
                .as_ref()
                .map_or(0, |host| host.page.history().len())
        })
    }

    /// Detach every listener, cancel the pending timer, and drop the page.
    pub fn destroy(&self) {
        unmount();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Global entry points for inline handlers
// ─────────────────────────────────────────────────────────────────────────────

#[wasm_bindgen(js_name = updateWelcomeMessage)]
pub fn update_welcome_message() {
    dispatch(PageEvent::GreetingSubmit);
}

#[wasm_bindgen(js_name = showAlert)]
pub fn show_alert(message: &str, kind: Option<String>) {
    let kind = AlertKind::from_name(kind.as_deref().unwrap_or_default());
    with_host(|host| {
        host.page.show_alert(message, kind);
    });
}

#[wasm_bindgen(js_name = closeAlert)]
pub fn close_alert() {
    dispatch(PageEvent::AlertClose);
}

// ─────────────────────────────────────────────────────────────────────────────
// Mounting
// ─────────────────────────────────────────────────────────────────────────────

fn mount(config: PageConfig) -> Result<(), JsValue> {
    unmount();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let store = LocalStorageStore::from_window(&window);
    let view = DomView::new(window.clone(), document.clone());
    HOST.with(|host| {
        *host.borrow_mut() = Some(Host {
            page: Page::new(view, store, config, LocaleTimestamp),
            origin: Instant::now(),
            timer_handle: None,
        });
    });

    TIMER_CALLBACK.with(|slot| {
        if slot.borrow().is_none() {
            *slot.borrow_mut() = Some(Closure::<dyn FnMut()>::wrap(Box::new(on_timer)));
        }
    });

    if document.ready_state() == "loading" {
        listen(&document, "DOMContentLoaded", |_event| {
            if let Err(err) = boot() {
                tracing::error!(error = ?err, "page boot failed");
            }
        })?;
        Ok(())
    } else {
        boot()
    }
}

/// Bind every listener and load persisted state. Runs once the document is
/// parsed.
fn boot() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if let Some(input) = document.get_element_by_id("nameInput") {
        listen(&input, "keypress", |event| {
            if let Some(key) = event.dyn_ref::<web_sys::KeyboardEvent>() {
                dispatch(PageEvent::NameInputKey(key.key()));
            }
        })?;
    }

    if let Some(form) = document.get_element_by_id("messageForm") {
        for field in FormField::ALL {
            let Some(input) = document.get_element_by_id(field.dom_id()) else {
                continue;
            };
            listen(&input, "blur", move |_event| dispatch(PageEvent::FieldBlur(field)))?;
            listen(&input, "input", move |_event| dispatch(PageEvent::FieldInput(field)))?;
        }
        listen(&form, "submit", |event| {
            event.prevent_default();
            dispatch(PageEvent::FormSubmit);
        })?;
    }

    if let Some(button) = document.query_selector(".mobile-menu")? {
        listen(&button, "click", |_event| dispatch(PageEvent::MenuToggle))?;
    }

    let links = document.query_selector_all(r##"nav a[href^="#"]"##)?;
    for i in 0..links.length() {
        let Some(link) = links
            .get(i)
            .and_then(|node| node.dyn_into::<web_sys::Element>().ok())
        else {
            continue;
        };
        let href = link.get_attribute("href").unwrap_or_default();
        listen(&link, "click", move |event| {
            event.prevent_default();
            dispatch(PageEvent::AnchorClick(href.clone()));
        })?;
    }

    // The close button is created with each alert, so listen on the document.
    listen(&document, "click", |event| {
        let on_close = event
            .target()
            .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
            .and_then(|element| element.closest(".alert-close").ok().flatten())
            .is_some();
        if on_close {
            dispatch(PageEvent::AlertClose);
        }
    })?;

    listen(&window, "scroll", |_event| dispatch(PageEvent::Scroll))?;

    dispatch(PageEvent::Loaded);
    Ok(())
}

fn unmount() {
    let listeners = LISTENERS.with(|listeners| std::mem::take(&mut *listeners.borrow_mut()));
    for listener in listeners {
        let _ = listener.target.remove_event_listener_with_callback(
            listener.event,
            listener.callback.as_ref().unchecked_ref(),
        );
    }
    if let Some(host) = HOST.with(|host| host.borrow_mut().take()) {
        if let (Some(handle), Some(window)) = (host.timer_handle, web_sys::window()) {
            window.clear_timeout_with_handle(handle);
        }
    }
}

/// Attach `handler` to `target` and keep the closure alive until unmount.
fn listen(
    target: &web_sys::EventTarget,
    event: &'static str,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> Result<(), JsValue> {
    let callback: EventHandler = Closure::wrap(Box::new(handler));
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    LISTENERS.with(|listeners| {
        listeners.borrow_mut().push(Listener {
            target: target.clone(),
            event,
            callback,
        });
    });
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Event and timer pump
// ─────────────────────────────────────────────────────────────────────────────

fn dispatch(event: PageEvent) {
    with_host(|host| host.page.handle(event));
}

/// Catch the page clock up to wall time, run `f` against the mounted page,
/// then re-arm the browser timer.
///
/// New timers are scheduled relative to the page clock, so it must be
/// current before any event is handled.
fn with_host(f: impl FnOnce(&mut Host)) {
    HOST.with(|slot| {
        let Ok(mut slot) = slot.try_borrow_mut() else {
            tracing::debug!("page busy, event dropped");
            return;
        };
        let Some(host) = slot.as_mut() else {
            return;
        };
        let elapsed = host.origin.elapsed();
        host.page.advance_to(elapsed);
        f(host);
        arm_timer(host);
    });
}

fn on_timer() {
    with_host(|host| host.timer_handle = None);
}

/// Point the single browser timer at the page's next deadline.
fn arm_timer(host: &mut Host) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Some(handle) = host.timer_handle.take() {
        window.clear_timeout_with_handle(handle);
    }
    let Some(deadline) = host.page.next_deadline() else {
        return;
    };
    let delay = timeout_delay_ms(deadline, host.origin.elapsed());
    TIMER_CALLBACK.with(|slot| {
        let slot = slot.borrow();
        let Some(callback) = slot.as_ref() else {
            return;
        };
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay,
        ) {
            Ok(handle) => host.timer_handle = Some(handle),
            Err(err) => tracing::warn!(error = ?err, "could not arm page timer"),
        }
    });
}
