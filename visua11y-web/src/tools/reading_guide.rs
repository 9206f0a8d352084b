use std::cell::RefCell;

use visua11y_core::FeatureStates;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, HtmlElement, MouseEvent};

use crate::dom::{DomError, require_document, window};

const GUIDE_CLASS: &str = "visua11y-agent-rg-container";
const MARGIN: f64 = 20.0;

const GUIDE_MARKUP: &str = r#"<style>.visua11y-agent-rg{position:fixed;left:0;right:0;width:100%;pointer-events:none;background-color:rgba(0,0,0,.8);z-index:2147483647}.visua11y-agent-rg-top{top:0}.visua11y-agent-rg-bottom{bottom:0}</style><div class="visua11y-agent-rg visua11y-agent-rg-top"></div><div class="visua11y-agent-rg visua11y-agent-rg-bottom"></div>"#;

type MoveListener = Closure<dyn FnMut(MouseEvent)>;

thread_local! {
    static LISTENER: RefCell<Option<MoveListener>> = const { RefCell::new(None) };
}

pub(super) fn apply(states: &FeatureStates) -> Result<(), DomError> {
    reading_guide(states.is_enabled(super::READABLE_GUIDE))
}

fn bar(guide: &HtmlElement, class: &str) -> Result<HtmlElement, DomError> {
    guide
        .query_selector(&format!(".{class}"))?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| DomError::Js(format!("reading guide is missing .{class}")))
}

/// Show or hide the reading guide that masks everything but a band around
/// the pointer.
///
/// # Errors
/// Returns an error if the overlay or its listener cannot be installed.
pub fn reading_guide(enable: bool) -> Result<(), DomError> {
    let document = require_document()?;
    let existing = document.query_selector(&format!(".{GUIDE_CLASS}"))?;

    if !enable {
        if let Some(guide) = existing {
            guide.remove();
        }
        if let Some(listener) = LISTENER.with(|cell| cell.borrow_mut().take()) {
            document.remove_event_listener_with_callback(
                "mousemove",
                listener.as_ref().unchecked_ref(),
            )?;
        }
        return Ok(());
    }
    if existing.is_some() {
        return Ok(());
    }

    let guide = document
        .create_element("div")?
        .dyn_into::<HtmlElement>()
        .map_err(JsValue::from)?;
    guide.class_list().add_1(GUIDE_CLASS)?;
    guide.set_inner_html(GUIDE_MARKUP);
    let top = bar(&guide, "visua11y-agent-rg-top")?;
    let bottom = bar(&guide, "visua11y-agent-rg-bottom")?;

    let listener = Closure::wrap(Box::new(move |event: MouseEvent| {
        let y = f64::from(event.client_y());
        let viewport = window()
            .and_then(|win| win.inner_height().ok())
            .and_then(|height| height.as_f64())
            .unwrap_or_default();
        let _ = top
            .style()
            .set_property("height", &format!("{}px", (y - MARGIN).max(0.0)));
        let _ = bottom.style().set_property(
            "height",
            &format!("{}px", (viewport - y - MARGIN * 2.0).max(0.0)),
        );
    }) as Box<dyn FnMut(MouseEvent)>);

    document
        .body()
        .ok_or(DomError::NoDocument)?
        .append_child(&guide)?;

    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    if let Err(err) = document.add_event_listener_with_callback_and_add_event_listener_options(
        "mousemove",
        listener.as_ref().unchecked_ref(),
        &options,
    ) {
        guide.remove();
        return Err(err.into());
    }
    LISTENER.with(|cell| cell.replace(Some(listener)));
    Ok(())
}
