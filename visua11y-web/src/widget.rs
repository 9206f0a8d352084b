//! The floating launcher button: placement, size and icon.

use std::cell::RefCell;

use visua11y_core::constants::{CONTAINER_CLASS, TRANSLATE_CLASS};
use visua11y_core::{EffectiveConfig, Offset, Position};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, HtmlElement, HtmlTemplateElement, MouseEvent};

use crate::dom::{DomError, require_document};
use crate::events;

const BUTTON_CLASS: &str = "visua11y-agent-menu-btn";
const ICON_CLASS: &str = "visua11y-agent-menu-icon";
const MIN_ICON_SIZE: u32 = 20;

const DEFAULT_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" width="100%" height="100%" fill="currentColor" aria-hidden="true"><path d="M12 2a2 2 0 1 1 0 4 2 2 0 0 1 0-4zm9 7h-6v13h-2v-6h-2v6H9V9H3V7h18v2z"/></svg>"#;

const WIDGET_CSS: &str = ".visua11y-agent-container .visua11y-agent-menu-btn{position:fixed;z-index:2147483646;display:flex;align-items:center;justify-content:center;border:none;border-radius:50%;cursor:pointer;background:#0048ff;color:#fff;box-shadow:0 4px 12px rgba(0,0,0,.25);padding:0}.visua11y-agent-container .visua11y-agent-menu-icon{display:flex;width:var(--visua11y-agent-icon-size);height:var(--visua11y-agent-icon-size)}.visua11y-agent-container .visua11y-agent-menu-icon img,.visua11y-agent-container .visua11y-agent-menu-icon svg{width:100%;height:100%}.visua11y-agent-container .visua11y-agent-sr-only{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap}";

/// Where the button icon comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconSource {
    Default,
    Markup(String),
    Url(String),
    /// Id of a `<template>` in the host page.
    Template(String),
}

impl IconSource {
    #[must_use]
    pub fn classify(icon: Option<&str>) -> Self {
        let Some(icon) = icon.map(str::trim).filter(|i| !i.is_empty()) else {
            return Self::Default;
        };
        if let Some(id) = icon.strip_prefix('#') {
            Self::Template(id.to_string())
        } else if icon.starts_with('<') {
            Self::Markup(icon.to_string())
        } else {
            Self::Url(icon.to_string())
        }
    }
}

/// Inline `top/right/bottom/left/transform` values for a button anchored at
/// `position`, `offset` pixels from its edges.
#[must_use]
pub fn position_styles(position: Position, [x, y]: Offset) -> [(&'static str, String); 5] {
    let px = |value: i32| format!("{value}px");
    let auto = || "auto".to_string();
    let (top, right, bottom, left, transform) = match position {
        Position::BottomLeft => (auto(), auto(), px(y), px(x), "none"),
        Position::BottomRight => (auto(), px(x), px(y), auto(), "none"),
        Position::BottomCenter => (auto(), auto(), px(y), "50%".into(), "translateX(-50%)"),
        Position::TopLeft => (px(y), auto(), auto(), px(x), "none"),
        Position::TopRight => (px(y), px(x), auto(), auto(), "none"),
        Position::TopCenter => (px(y), auto(), auto(), "50%".into(), "translateX(-50%)"),
        Position::CenterLeft => ("50%".into(), auto(), auto(), px(x), "translateY(-50%)"),
        Position::CenterRight => ("50%".into(), px(x), auto(), auto(), "translateY(-50%)"),
    };
    [
        ("top", top),
        ("right", right),
        ("bottom", bottom),
        ("left", left),
        ("transform", transform.to_string()),
    ]
}

/// Icon edge length for a button of `size` pixels.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn icon_size(size: u32) -> u32 {
    ((f64::from(size) * 0.62).round() as u32).max(MIN_ICON_SIZE)
}

thread_local! {
    static CLICK: RefCell<Option<Closure<dyn FnMut(MouseEvent)>>> = const { RefCell::new(None) };
}

fn find_html(selector: &str) -> Result<Option<HtmlElement>, DomError> {
    Ok(require_document()?
        .query_selector(selector)?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok()))
}

fn create(tag: &str, class: &str) -> Result<Element, DomError> {
    let element = require_document()?.create_element(tag)?;
    element.set_class_name(class);
    Ok(element)
}

/// Insert the widget container and button once; later calls only refresh
/// placement and icon.
///
/// # Errors
/// Returns an error if the DOM cannot be built.
pub fn render_widget(config: &EffectiveConfig) -> Result<(), DomError> {
    if find_html(&format!(".{CONTAINER_CLASS}"))?.is_none() {
        let document = require_document()?;
        let container = create("div", CONTAINER_CLASS)?;
        container.set_attribute("lang", &config.lang)?;

        let style = document.create_element("style")?;
        style.set_text_content(Some(WIDGET_CSS));
        container.append_child(&style)?;

        let button = create("button", BUTTON_CLASS)?;
        button.set_attribute("type", "button")?;
        button.set_attribute("aria-haspopup", "dialog")?;
        let icon = create("span", ICON_CLASS)?;
        icon.set_attribute("aria-hidden", "true")?;
        button.append_child(&icon)?;
        let label = create("span", &format!("{TRANSLATE_CLASS} visua11y-agent-sr-only"))?;
        label.set_attribute("data-translate", "Accessibility Menu")?;
        label.set_text_content(Some("Accessibility Menu"));
        button.append_child(&label)?;
        container.append_child(&button)?;

        let click = Closure::wrap(Box::new(move |_event: MouseEvent| {
            events::menu_requested(true);
        }) as Box<dyn FnMut(MouseEvent)>);
        button.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
        CLICK.with(|cell| cell.replace(Some(click)));

        document
            .body()
            .ok_or(DomError::NoDocument)?
            .append_child(&container)?;
    }

    apply_button_position(config)?;
    apply_button_icon(config)
}

/// Place and size the button from `config`.
///
/// # Errors
/// Returns an error if the button's style cannot be written.
pub fn apply_button_position(config: &EffectiveConfig) -> Result<(), DomError> {
    let Some(button) = find_html(&format!(".{BUTTON_CLASS}"))? else {
        return Ok(());
    };
    let style = button.style();
    for (property, value) in position_styles(config.position, config.offset) {
        style.set_property(property, &value)?;
    }
    let size = format!("{}px", config.size);
    style.set_property("width", &size)?;
    style.set_property("height", &size)?;
    style.set_property("--visua11y-agent-button-size", &size)?;
    style.set_property(
        "--visua11y-agent-icon-size",
        &format!("{}px", icon_size(config.size)),
    )?;
    Ok(())
}

fn template_markup(id: &str) -> Result<Option<String>, DomError> {
    Ok(require_document()?
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlTemplateElement>().ok())
        .map(|template| template.inner_html()))
}

/// Render `config.icon` into the button, falling back to the built-in icon.
///
/// # Errors
/// Returns an error if the icon cannot be inserted.
pub fn apply_button_icon(config: &EffectiveConfig) -> Result<(), DomError> {
    let Some(container) = find_html(&format!(".{ICON_CLASS}"))? else {
        return Ok(());
    };

    match IconSource::classify(config.icon.as_deref()) {
        IconSource::Default => container.set_inner_html(DEFAULT_ICON),
        IconSource::Markup(markup) => container.set_inner_html(&markup),
        IconSource::Template(id) => match template_markup(&id)? {
            Some(markup) => container.set_inner_html(&markup),
            None => {
                log::warn!("icon template #{id} not found; using the default icon");
                container.set_inner_html(DEFAULT_ICON);
            }
        },
        IconSource::Url(url) => {
            container.set_inner_html("");
            let img = require_document()?.create_element("img")?;
            img.set_attribute("src", &url)?;
            img.set_attribute("alt", "")?;
            img.set_attribute("role", "presentation")?;
            img.set_attribute("aria-hidden", "true")?;
            container.append_child(&img)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icons_are_classified_by_shape() {
        assert_eq!(IconSource::classify(None), IconSource::Default);
        assert_eq!(IconSource::classify(Some("  ")), IconSource::Default);
        assert_eq!(
            IconSource::classify(Some("#my-icon")),
            IconSource::Template("my-icon".into())
        );
        assert_eq!(
            IconSource::classify(Some("<span>Custom</span>")),
            IconSource::Markup("<span>Custom</span>".into())
        );
        assert_eq!(
            IconSource::classify(Some("https://example.com/icon.png")),
            IconSource::Url("https://example.com/icon.png".into())
        );
    }

    #[test]
    fn corner_positions_use_offset_axes() {
        let styles = position_styles(Position::TopRight, [15, 10]);
        assert_eq!(styles[0], ("top", "10px".to_string()));
        assert_eq!(styles[1], ("right", "15px".to_string()));
        assert_eq!(styles[2], ("bottom", "auto".to_string()));
        assert_eq!(styles[3], ("left", "auto".to_string()));

        let styles = position_styles(Position::BottomLeft, [20, 25]);
        assert_eq!(styles[2], ("bottom", "25px".to_string()));
        assert_eq!(styles[3], ("left", "20px".to_string()));
    }

    #[test]
    fn centered_positions_translate() {
        let styles = position_styles(Position::CenterLeft, [5, 99]);
        assert_eq!(styles[0].1, "50%");
        assert_eq!(styles[4].1, "translateY(-50%)");
    }

    #[test]
    fn icon_scales_with_floor() {
        assert_eq!(icon_size(60), 37);
        assert_eq!(icon_size(58), 36);
        assert_eq!(icon_size(20), 20);
    }
}
