//! Bundled dictionaries, page language detection and widget translation.

use js_sys::Array;
use visua11y_core::constants::{CONTAINER_CLASS, DEFAULT_LANGUAGE, TRANSLATE_CLASS};
use visua11y_core::{Dictionary, KeyValueStore, LanguageRegistry, WidgetSession};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, MutationObserver, MutationObserverInit, MutationRecord};

use crate::dom::{DomError, document, require_document, root_element, window};

const LOCALE_TABLE: &[(&str, &str)] = &[
    ("en", include_str!("../i18n/en.json")),
    ("de", include_str!("../i18n/de.json")),
    ("es", include_str!("../i18n/es.json")),
    ("fr", include_str!("../i18n/fr.json")),
    ("it", include_str!("../i18n/it.json")),
    ("nl", include_str!("../i18n/nl.json")),
    ("pt", include_str!("../i18n/pt.json")),
    ("zh-Hans", include_str!("../i18n/zh-Hans.json")),
];

/// Parsed bundled dictionary for `code`, if one ships with the widget.
#[must_use]
pub fn embedded_dictionary(code: &str) -> Option<Dictionary> {
    let (_, raw) = LOCALE_TABLE.iter().find(|(c, _)| *c == code)?;
    serde_json::from_str(raw)
        .map_err(|err| log::warn!("bundled dictionary {code} is malformed: {err}"))
        .ok()
}

/// Fill in dictionaries for every registered language that lacks one.
///
/// Languages without a bundled dictionary are logged and skipped.
pub fn load_languages(registry: &mut LanguageRegistry) {
    for code in registry.missing_dictionaries() {
        match embedded_dictionary(&code) {
            Some(dictionary) => registry.insert_dictionary(&code, dictionary),
            None => log::warn!("no dictionary available for language {code}"),
        }
    }
}

/// First non-blank candidate, trimmed.
#[must_use]
pub fn first_language<I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    candidates
        .into_iter()
        .flatten()
        .map(|lang| lang.trim().to_string())
        .find(|lang| !lang.is_empty())
}

/// Language the page asks for: the explicit option, then `<html lang>`,
/// the browser language, a `Content-Language` meta tag, then English.
#[must_use]
pub fn default_language(explicit: Option<&str>) -> String {
    let doc = document();
    let html_lang = || {
        doc.as_ref()
            .and_then(web_sys::Document::document_element)
            .and_then(|root| root.get_attribute("lang"))
    };
    let navigator_lang = || window().and_then(|win| win.navigator().language());
    let meta_lang = || {
        doc.as_ref()
            .and_then(|d| {
                d.query_selector(r#"meta[http-equiv="Content-Language"]"#)
                    .ok()
                    .flatten()
            })
            .and_then(|meta| meta.get_attribute("content"))
    };

    first_language([
        explicit.map(ToString::to_string),
        html_lang(),
        navigator_lang(),
        meta_lang(),
    ])
    .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
}

/// Rewrite every translatable widget label in the active language.
///
/// # Errors
/// Returns an error if the document cannot be queried.
pub fn translate_widget<P: KeyValueStore, F: KeyValueStore>(
    session: &WidgetSession<P, F>,
) -> Result<(), DomError> {
    let document = require_document()?;
    let labels = document.query_selector_all(&format!(".{TRANSLATE_CLASS}"))?;
    for index in 0..labels.length() {
        let Some(element) = labels
            .item(index)
            .and_then(|node| node.dyn_into::<web_sys::Element>().ok())
        else {
            continue;
        };
        let label = match element.get_attribute("data-translate") {
            Some(label) => label,
            None => {
                let original = element.text_content().unwrap_or_default().trim().to_string();
                element.set_attribute("data-translate", &original)?;
                original
            }
        };
        element.set_text_content(Some(&session.translate(&label)));
    }

    if let Some(container) = document.query_selector(&format!(".{CONTAINER_CLASS}"))? {
        container.set_attribute("lang", session.current_language())?;
    }
    Ok(())
}

/// Watches `<html lang>` until dropped.
pub struct LangObserver {
    observer: MutationObserver,
    _callback: Closure<dyn FnMut(Array, MutationObserver)>,
}

impl Drop for LangObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Call `on_change` whenever the root element's `lang` attribute changes.
///
/// # Errors
/// Returns an error if the observer cannot be created or attached.
pub fn observe_html_lang(mut on_change: impl FnMut() + 'static) -> Result<LangObserver, DomError> {
    let callback = Closure::wrap(Box::new(move |records: Array, _observer: MutationObserver| {
        let lang_changed = records.iter().any(|record| {
            record
                .dyn_into::<MutationRecord>()
                .is_ok_and(|record| record.attribute_name().as_deref() == Some("lang"))
        });
        if lang_changed {
            on_change();
        }
    }) as Box<dyn FnMut(Array, MutationObserver)>);

    let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
    let init = MutationObserverInit::new();
    init.set_attributes(true);
    init.set_attribute_filter(&Array::of1(&"lang".into()));
    let root: Element = root_element()?;
    observer.observe_with_options(&root, &init)?;

    Ok(LangObserver {
        observer,
        _callback: callback,
    })
}
