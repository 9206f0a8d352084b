//! Host configuration read from `data-visua11y-agent-*` attributes.

use visua11y_core::InitOptions;
use visua11y_core::constants::DATA_ATTRIBUTE_PREFIX;

use crate::dom::document;

/// Value of `data-visua11y-agent-<name>`.
///
/// The executing `<script>` wins; otherwise the first element in the page
/// carrying the attribute is used.
#[must_use]
pub fn script_data_attribute(name: &str) -> Option<String> {
    let key = format!("{DATA_ATTRIBUTE_PREFIX}{name}");
    let document = document()?;

    if let Some(script) = document.current_script()
        && script.has_attribute(&key)
    {
        return script.get_attribute(&key);
    }

    document
        .query_selector(&format!("[{key}]"))
        .ok()
        .flatten()
        .and_then(|element| element.get_attribute(&key))
}

#[must_use]
pub fn read_init_options() -> InitOptions {
    InitOptions::from_attributes(script_data_attribute)
}
