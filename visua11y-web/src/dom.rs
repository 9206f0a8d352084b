//! Window and document access, DOM errors, readiness and the console logger.

use js_sys::Promise;
use log::{LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AddEventListenerOptions, Document, Element, HtmlElement, Window};

#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("window unavailable")]
    NoWindow,
    #[error("document unavailable")]
    NoDocument,
    #[error("DOM error: {0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        Self::Js(js_error_message(&value))
    }
}

/// Retrieve the global `window` object, if running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Retrieve the document object for DOM interactions.
#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

/// Document or a [`DomError`] naming what was missing.
///
/// # Errors
/// Returns an error outside a browser context.
pub fn require_document() -> Result<Document, DomError> {
    window()
        .ok_or(DomError::NoWindow)?
        .document()
        .ok_or(DomError::NoDocument)
}

/// The `<html>` element.
///
/// # Errors
/// Returns an error when there is no document or it has no root element.
pub fn root_element() -> Result<Element, DomError> {
    require_document()?
        .document_element()
        .ok_or(DomError::NoDocument)
}

/// Every element matching `selectors`, cast to `HtmlElement`.
///
/// # Errors
/// Returns an error for an invalid selector or a missing document.
pub fn query_html_elements(selectors: &str) -> Result<Vec<HtmlElement>, DomError> {
    let list = require_document()?.query_selector_all(selectors)?;
    Ok((0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect())
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Resolve once the document has left the `loading` state.
///
/// # Errors
/// Returns an error if there is no document or the listener cannot be added.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn document_ready() -> Result<(), DomError> {
    let document = require_document()?;
    if document.ready_state() != "loading" {
        return Ok(());
    }

    let mut listen_error = None;
    let promise = Promise::new(&mut |resolve, _reject| {
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        let callback = Closure::once_into_js(move || {
            let _ = resolve.call0(&JsValue::UNDEFINED);
        });
        if let Err(err) = document.add_event_listener_with_callback_and_add_event_listener_options(
            "readystatechange",
            callback.unchecked_ref(),
            &options,
        ) {
            listen_error = Some(err);
        }
    });
    if let Some(err) = listen_error {
        return Err(err.into());
    }

    JsFuture::from(promise).await?;
    Ok(())
}

/// `log` backend writing to the browser console.
pub struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = JsValue::from(format!("[visua11y-agent] {}", record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&message),
            log::Level::Warn => web_sys::console::warn_1(&message),
            log::Level::Info => web_sys::console::info_1(&message),
            log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&message),
        }
    }

    fn flush(&self) {}
}

/// Parse a level name, `warn` when absent or unknown.
#[must_use]
pub fn parse_log_level(raw: Option<&str>) -> LevelFilter {
    raw.and_then(|value| value.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn)
}

/// Install the console logger. Later calls only adjust the level.
pub fn init_logger(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_err() {
        log::debug!("console logger already installed");
    }
    log::set_max_level(level);
}
