//! Custom events dispatched on the host document.

use serde::Serialize;
use visua11y_core::LanguageEntry;
use visua11y_core::constants::{
    EVENT_LANGUAGE_CHANGED, EVENT_LANGUAGES_UPDATED, EVENT_MENU_CLOSE, EVENT_MENU_OPEN,
};
use web_sys::{CustomEvent, CustomEventInit};

use crate::dom::{DomError, require_document};

#[derive(Serialize)]
struct LanguageChanged<'a> {
    code: &'a str,
}

#[derive(Serialize)]
struct LanguagesUpdated<'a> {
    languages: &'a [LanguageEntry],
}

fn dispatch<T: Serialize>(name: &str, detail: Option<&T>) -> Result<(), DomError> {
    let init = CustomEventInit::new();
    if let Some(detail) = detail {
        let value = detail
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|err| DomError::Js(err.to_string()))?;
        init.set_detail(&value);
    }
    let event = CustomEvent::new_with_event_init_dict(name, &init)?;
    require_document()?.dispatch_event(&event)?;
    Ok(())
}

fn report(name: &str, result: Result<(), DomError>) {
    if let Err(err) = result {
        log::error!("failed to dispatch {name}: {err}");
    }
}

pub fn language_changed(code: &str) {
    report(
        EVENT_LANGUAGE_CHANGED,
        dispatch(EVENT_LANGUAGE_CHANGED, Some(&LanguageChanged { code })),
    );
}

pub fn languages_updated(languages: &[LanguageEntry]) {
    report(
        EVENT_LANGUAGES_UPDATED,
        dispatch(EVENT_LANGUAGES_UPDATED, Some(&LanguagesUpdated { languages })),
    );
}

/// Ask the presentation layer to open or close the menu.
pub fn menu_requested(open: bool) {
    let name = if open { EVENT_MENU_OPEN } else { EVENT_MENU_CLOSE };
    report(name, dispatch::<()>(name, None));
}
