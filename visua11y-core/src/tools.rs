//! Catalogue of CSS-backed tools.
//!
//! Each definition is built once on first use and shared afterwards.

use once_cell::sync::Lazy;

use crate::catalog::{
    ALL_ELEMENT_SELECTORS, HEADER_SELECTORS, LINKS_SELECTORS, MEDIA_SELECTORS, filter,
    outside_widget,
};
use crate::constants::CONTENT_SCOPE;
use crate::css::ToolConfig;

pub const STOP_ANIMATIONS: &str = "stop-animations";
pub const LETTER_SPACING: &str = "letter-spacing";
pub const LINE_HEIGHT: &str = "line-height";
pub const FONT_WEIGHT: &str = "font-weight";
pub const HIGHLIGHT_LINKS: &str = "highlight-links";
pub const HIGHLIGHT_TITLE: &str = "highlight-title";
pub const READABLE_FONT: &str = "readable-font";
pub const BIG_CURSOR: &str = "big-cursor";
pub const IMAGE_DESATURATION: &str = "image-desaturation";
pub const LOW_SATURATION: &str = "low-saturation";

const READABLE_FONT_FACE: &str = "@font-face {font-family: OpenDyslexic3;src: url(\"https://website-widgets.pages.dev/fonts/OpenDyslexic3-Regular.woff\") format(\"woff\"), url(\"https://website-widgets.pages.dev/fonts/OpenDyslexic3-Regular.ttf\") format(\"truetype\");}";

const BIG_CURSOR_CSS: &str = "html.visua11y-agent-big-cursor body :where(:not(.visua11y-agent-container):not(.visua11y-agent-container *)) {cursor: url(\"data:image/svg+xml,%3Csvg xmlns='http://www.w3.org/2000/svg' width='48' height='48' viewBox='0 0 24 24'%3E%3Cpath fill='%23000' stroke='%23fff' d='M4 2l16 11-7 1 4 8-3 1-4-8-6 5z'/%3E%3C/svg%3E\") 2 2, auto !important;}";

pub static STOP_ANIMATIONS_CONFIG: Lazy<ToolConfig> = Lazy::new(|| {
    ToolConfig::new(STOP_ANIMATIONS, "html")
        .with_children([
            "*:not(.visua11y-agent-container *)",
            "*:not(.visua11y-agent-container *)::before",
            "*:not(.visua11y-agent-container *)::after",
        ])
        .with_styles(&[
            ("transition", "none"),
            ("animation-fill-mode", "forwards"),
            ("animation-iteration-count", "1"),
            ("animation-duration", ".01s"),
            ("animation-play-state", "paused"),
        ])
});

pub static LETTER_SPACING_CONFIG: Lazy<ToolConfig> = Lazy::new(|| {
    ToolConfig::new(LETTER_SPACING, "html")
        .with_children(outside_widget(ALL_ELEMENT_SELECTORS))
        .with_styles(&[("letter-spacing", "2px")])
});

pub static LINE_HEIGHT_CONFIG: Lazy<ToolConfig> = Lazy::new(|| {
    ToolConfig::new(LINE_HEIGHT, "html")
        .with_children(outside_widget(ALL_ELEMENT_SELECTORS))
        .with_styles(&[("line-height", "3")])
});

pub static FONT_WEIGHT_CONFIG: Lazy<ToolConfig> = Lazy::new(|| {
    ToolConfig::new(FONT_WEIGHT, "html")
        .with_children(outside_widget(ALL_ELEMENT_SELECTORS))
        .with_styles(&[("font-weight", "700")])
});

pub static HIGHLIGHT_LINKS_CONFIG: Lazy<ToolConfig> = Lazy::new(|| {
    ToolConfig::new(HIGHLIGHT_LINKS, "html")
        .with_children(outside_widget(LINKS_SELECTORS))
        .with_styles(&[("outline", "2px solid #0048ff"), ("outline-offset", "2px")])
});

pub static HIGHLIGHT_TITLE_CONFIG: Lazy<ToolConfig> = Lazy::new(|| {
    ToolConfig::new(HIGHLIGHT_TITLE, "html")
        .with_children(outside_widget(HEADER_SELECTORS))
        .with_styles(&[("outline", "2px solid #0048ff"), ("outline-offset", "4px")])
});

pub static READABLE_FONT_CONFIG: Lazy<ToolConfig> = Lazy::new(|| {
    ToolConfig::new(READABLE_FONT, "html")
        .with_children([format!("body {CONTENT_SCOPE}")])
        .with_styles(&[("font-family", "OpenDyslexic3,Comic Sans MS,Arial,Helvetica,sans-serif")])
        .with_css(READABLE_FONT_FACE)
});

pub static BIG_CURSOR_CONFIG: Lazy<ToolConfig> =
    Lazy::new(|| ToolConfig::new(BIG_CURSOR, "html").with_css(BIG_CURSOR_CSS));

pub static IMAGE_DESATURATION_CONFIG: Lazy<ToolConfig> = Lazy::new(|| {
    ToolConfig::new(IMAGE_DESATURATION, "html")
        .with_children(outside_widget(MEDIA_SELECTORS))
        .with_styles(&[("filter", "grayscale(100%)")])
});

pub static LOW_SATURATION_CONFIG: Lazy<ToolConfig> = Lazy::new(|| {
    filter(LOW_SATURATION).map_or_else(
        || ToolConfig::new(LOW_SATURATION, "html"),
        |preset| preset.to_tool_config_with(LOW_SATURATION, "html"),
    )
});

/// Every boolean CSS tool, in application order.
#[must_use]
pub fn css_tools() -> [&'static ToolConfig; 10] {
    [
        &*HIGHLIGHT_TITLE_CONFIG,
        &*HIGHLIGHT_LINKS_CONFIG,
        &*LETTER_SPACING_CONFIG,
        &*LINE_HEIGHT_CONFIG,
        &*FONT_WEIGHT_CONFIG,
        &*READABLE_FONT_CONFIG,
        &*STOP_ANIMATIONS_CONFIG,
        &*BIG_CURSOR_CONFIG,
        &*IMAGE_DESATURATION_CONFIG,
        &*LOW_SATURATION_CONFIG,
    ]
}

/// Find a CSS tool by its feature id.
#[must_use]
pub fn css_tool(id: &str) -> Option<&'static ToolConfig> {
    css_tools().into_iter().find(|tool| tool.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::generate_css_from_config;

    #[test]
    fn highlight_links_uses_link_selectors() {
        let config = &*HIGHLIGHT_LINKS_CONFIG;
        assert_eq!(config.selector, "html");
        assert_eq!(
            config.children_selector,
            vec![
                "a[href]:not(.visua11y-agent-container *)",
                "[role=\"link\"]:not(.visua11y-agent-container *)"
            ]
        );
        assert_eq!(config.styles.get("outline"), Some("2px solid #0048ff"));
        assert_eq!(config.styles.get("outline-offset"), Some("2px"));
    }

    #[test]
    fn readable_font_carries_font_face() {
        let config = &*READABLE_FONT_CONFIG;
        assert_eq!(
            config.children_selector,
            vec!["body :where(:not(.visua11y-agent-container):not(.visua11y-agent-container *))"]
        );
        let css = config.css.as_deref().unwrap_or_default();
        assert!(css.contains("@font-face"));
        assert!(css.contains("font-family: OpenDyslexic3"));
    }

    #[test]
    fn stop_animations_renders_three_blocks() {
        let css = generate_css_from_config(&STOP_ANIMATIONS_CONFIG);
        assert!(css.starts_with("html *:not(.visua11y-agent-container *){transition:none !important;"));
        assert_eq!(css.matches('{').count(), 3);
    }

    #[test]
    fn low_saturation_reuses_filter_preset() {
        let css = generate_css_from_config(&LOW_SATURATION_CONFIG);
        assert!(css.starts_with("html {-o-filter:saturate(50%) !important;"));
    }
}
