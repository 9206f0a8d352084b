use std::cell::RefCell;

use visua11y_core::FeatureStates;
use visua11y_core::constants::{CONTAINER_CLASS, namespaced};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, FocusEvent, SpeechSynthesisUtterance};

use crate::dom::{DomError, document, require_document, window};
use crate::stylesheet::set_root_class;

type FocusListener = Closure<dyn FnMut(FocusEvent)>;

thread_local! {
    static LISTENER: RefCell<Option<FocusListener>> = const { RefCell::new(None) };
}

pub(super) fn apply(states: &FeatureStates) -> Result<(), DomError> {
    screen_reader(states.is_enabled(super::SCREEN_READER))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text a screen reader would announce for `element`.
#[must_use]
pub fn accessible_name(element: &Element) -> Option<String> {
    let labelled_by = || {
        let ids = element.get_attribute("aria-labelledby")?;
        let doc = document()?;
        let text = ids
            .split_whitespace()
            .filter_map(|id| doc.get_element_by_id(id))
            .filter_map(|label| label.text_content())
            .collect::<Vec<_>>()
            .join(" ");
        Some(text)
    };

    [
        element.get_attribute("aria-label"),
        labelled_by(),
        element.get_attribute("alt"),
        element.get_attribute("title"),
        element.get_attribute("placeholder"),
        element.text_content(),
    ]
    .into_iter()
    .flatten()
    .map(|text| collapse_whitespace(&text))
    .find(|text| !text.is_empty())
}

fn speak(text: &str) -> Result<(), DomError> {
    let synth = window().ok_or(DomError::NoWindow)?.speech_synthesis()?;
    let utterance = SpeechSynthesisUtterance::new_with_text(text)?;
    if let Some(lang) = document()
        .and_then(|doc| doc.query_selector(&format!(".{CONTAINER_CLASS}")).ok().flatten())
        .and_then(|container| container.get_attribute("lang"))
    {
        utterance.set_lang(&lang);
    }
    synth.cancel();
    synth.speak(&utterance);
    Ok(())
}

/// Announce focused elements through speech synthesis while enabled.
///
/// # Errors
/// Returns an error if the listener or marker class cannot be changed.
pub fn screen_reader(enable: bool) -> Result<(), DomError> {
    let document = require_document()?;
    set_root_class(&namespaced(super::SCREEN_READER), enable)?;

    if !enable {
        if let Some(listener) = LISTENER.with(|cell| cell.borrow_mut().take()) {
            document.remove_event_listener_with_callback(
                "focusin",
                listener.as_ref().unchecked_ref(),
            )?;
            if let Ok(synth) = window().ok_or(DomError::NoWindow).and_then(|win| {
                win.speech_synthesis().map_err(DomError::from)
            }) {
                synth.cancel();
            }
        }
        return Ok(());
    }
    if LISTENER.with(|cell| cell.borrow().is_some()) {
        return Ok(());
    }

    let listener = Closure::wrap(Box::new(move |event: FocusEvent| {
        let Some(name) = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .and_then(|element| accessible_name(&element))
        else {
            return;
        };
        if let Err(err) = speak(&name) {
            log::warn!("speech synthesis failed: {err}");
        }
    }) as Box<dyn FnMut(FocusEvent)>);

    document.add_event_listener_with_callback("focusin", listener.as_ref().unchecked_ref())?;
    LISTENER.with(|cell| cell.replace(Some(listener)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::collapse_whitespace;

    #[test]
    fn whitespace_collapses_to_single_spaces() {
        assert_eq!(collapse_whitespace("  Save \n\t draft "), "Save draft");
        assert_eq!(collapse_whitespace("   "), "");
    }
}
