//! `<style>` element management and root marker classes.

use visua11y_core::{ToolConfig, generate_css_from_config};

use crate::dom::{DomError, require_document, root_element};

/// Create or update the `<style id=...>` element.
///
/// An existing element always receives `css`; a new one is only created for
/// non-empty css, so repeated calls never add nodes.
///
/// # Errors
/// Returns an error if the document is unavailable or the element cannot be
/// created or attached.
pub fn add_stylesheet(id: &str, css: Option<&str>) -> Result<(), DomError> {
    let document = require_document()?;
    let css = css.unwrap_or_default();

    if let Some(existing) = document.get_element_by_id(id) {
        existing.set_text_content(Some(css));
        return Ok(());
    }
    if css.is_empty() {
        return Ok(());
    }

    let style = document.create_element("style")?;
    style.set_id(id);
    style.set_text_content(Some(css));

    match document.head() {
        Some(head) => head.append_child(&style)?,
        None => root_element()?.append_child(&style)?,
    };
    Ok(())
}

/// Remove the `<style>` element with `id`, if present.
///
/// # Errors
/// Returns an error if the document is unavailable.
pub fn remove_stylesheet(id: &str) -> Result<(), DomError> {
    if let Some(existing) = require_document()?.get_element_by_id(id) {
        existing.remove();
    }
    Ok(())
}

/// Add or remove a class on the `<html>` element.
///
/// # Errors
/// Returns an error if the root element is missing or the class is invalid.
pub fn set_root_class(class: &str, enabled: bool) -> Result<(), DomError> {
    let classes = root_element()?.class_list();
    if enabled {
        classes.add_1(class)?;
    } else {
        classes.remove_1(class)?;
    }
    Ok(())
}

/// Whether the `<html>` element currently carries `class`.
#[must_use]
pub fn has_root_class(class: &str) -> bool {
    root_element().is_ok_and(|root| root.class_list().contains(class))
}

/// Switch a CSS tool on or off.
///
/// Enabling writes the tool's stylesheet under its namespaced id and adds the
/// matching marker class; disabling removes both.
///
/// # Errors
/// Returns an error if the DOM cannot be updated.
pub fn inject_tool_css(config: &ToolConfig, enable: bool) -> Result<(), DomError> {
    inject_css_as(&config.stylesheet_id(), &config.marker_class(), config, enable)
}

/// [`inject_tool_css`] with an explicit style id and marker class, used by
/// tools that share one stylesheet between several presets.
///
/// # Errors
/// Returns an error if the DOM cannot be updated.
pub fn inject_css_as(
    style_id: &str,
    marker_class: &str,
    config: &ToolConfig,
    enable: bool,
) -> Result<(), DomError> {
    if enable {
        let css = generate_css_from_config(config);
        add_stylesheet(style_id, Some(&css))?;
        set_root_class(marker_class, true)
    } else {
        remove_stylesheet(style_id)?;
        set_root_class(marker_class, false)
    }
}
