//! Centralized names and tuning constants for the Visua11y Agent.
//!
//! Everything the host page can observe (storage keys, class names, event
//! names, attribute prefixes) lives here so the public contract only changes
//! through a reviewed edit of this file.

// Namespacing ----------------------------------------------------------------
pub const NAMESPACE: &str = "visua11y-agent";
pub const STORAGE_KEY: &str = "visua11y-agent-user-settings";
pub const DATA_ATTRIBUTE_PREFIX: &str = "data-visua11y-agent-";
pub const CONTAINER_CLASS: &str = "visua11y-agent-container";
pub const TRANSLATE_CLASS: &str = "visua11y-agent-translate";
pub const GLOBAL_API_NAME: &str = "Visua11yAgentPlugin";
pub const WIDGET_SCOPE_EXCLUSION: &str = ":not(.visua11y-agent-container *)";
pub const CONTENT_SCOPE: &str =
    ":where(:not(.visua11y-agent-container):not(.visua11y-agent-container *))";

// Filters and palette --------------------------------------------------------
pub const FILTER_STYLE_ID: &str = "visua11y-agent-filter-style";
pub const FILTER_MARKER_CLASS: &str = "aws-filter";
pub const FILTER_SCOPE_SELECTOR: &str = "html.aws-filter";
pub const PALETTE_STYLE_ID: &str = "visua11y-agent-custom-palette-style";
pub const PALETTE_MARKER_CLASS: &str = "visua11y-agent-custom-palette";

// Events -----------------------------------------------------------------------
pub const EVENT_LANGUAGE_CHANGED: &str = "visua11y-agent:language:changed";
pub const EVENT_LANGUAGES_UPDATED: &str = "visua11y-agent:languages:updated";
pub const EVENT_MENU_OPEN: &str = "visua11y-agent:menu:open";
pub const EVENT_MENU_CLOSE: &str = "visua11y-agent:menu:close";

// Reserved state keys ---------------------------------------------------------
pub const STATE_FONT_SIZE: &str = "fontSize";
pub const STATE_CONTRAST: &str = "contrast";
pub const STATE_CUSTOM_PALETTE: &str = "custom-palette";

// Widget defaults ---------------------------------------------------------------
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_OFFSET: [i32; 2] = [20, 20];
pub const MIN_WIDGET_SIZE: u32 = 40;
pub const MIN_PANEL_WIDTH: u32 = 360;

/// Prefix a tool or element id with the widget namespace.
#[must_use]
pub fn namespaced(id: &str) -> String {
    format!("{NAMESPACE}-{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespaced_ids_use_dash_separator() {
        assert_eq!(namespaced("big-cursor"), "visua11y-agent-big-cursor");
        assert_eq!(namespaced(""), "visua11y-agent-");
    }
}
