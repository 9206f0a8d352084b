//! Static selector tables and contrast filter presets.

use crate::constants::FILTER_SCOPE_SELECTOR;
use crate::css::{StyleMap, ToolConfig};

pub const ALL_ELEMENT_SELECTORS: &[&str] = &[
    "*", "h1", "h2", "h3", "h4", "h5", "h6", "p", "a", "dl", "dt", "li", "ol", "ul", "th", "td",
    "span", "blockquote", "label", "button", "input", "textarea", "select",
];

/// Elements whose font size is scaled by the font-size tool.
pub const TEXT_SELECTORS: &[&str] = &[
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "p",
    "a",
    "dl",
    "dt",
    "li",
    "ol",
    "th",
    "td",
    "span",
    "blockquote",
    ".visua11y-agent-text",
];

pub const HEADER_SELECTORS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6", "[role=\"heading\"]"];

pub const LINKS_SELECTORS: &[&str] = &["a[href]", "[role=\"link\"]"];

pub const MEDIA_SELECTORS: &[&str] = &["img", "picture", "video", "svg", "canvas", "iframe"];

/// Icon font classes left untouched by font scaling.
pub const ICON_CLASSES: &[&str] = &[
    "material-icons",
    "material-icons-outlined",
    "material-symbols-outlined",
    "fa",
    "fas",
    "far",
    "fab",
    "glyphicon",
    "icon",
];

/// Joined selector string suitable for `querySelectorAll`.
#[must_use]
pub fn text_selector_list() -> String {
    TEXT_SELECTORS.join(",")
}

/// Child selectors excluding anything rendered inside the widget itself.
#[must_use]
pub fn outside_widget(selectors: &[&str]) -> Vec<String> {
    selectors
        .iter()
        .map(|s| format!("{s}{}", crate::constants::WIDGET_SCOPE_EXCLUSION))
        .collect()
}

/// A named contrast mode: children and styles, scoped at injection time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterPreset {
    pub name: &'static str,
    pub children_selector: &'static [&'static str],
    pub styles: &'static [(&'static str, &'static str)],
    pub css: Option<&'static str>,
}

impl FilterPreset {
    /// Tool config rooted at `html.aws-filter`.
    #[must_use]
    pub fn to_tool_config(&self) -> ToolConfig {
        self.to_tool_config_with(self.name, FILTER_SCOPE_SELECTOR)
    }

    #[must_use]
    pub fn to_tool_config_with(&self, id: &str, selector: &str) -> ToolConfig {
        ToolConfig {
            id: id.to_string(),
            selector: selector.to_string(),
            children_selector: self
                .children_selector
                .iter()
                .map(ToString::to_string)
                .collect(),
            styles: StyleMap::from_pairs(self.styles),
            css: self.css.map(ToString::to_string),
        }
    }
}

const ROOT_ONLY: &[&str] = &[""];
const CONTRAST_TARGETS: &[&str] = &[
    "*:not(.visua11y-agent-container *)",
    "*:not(.visua11y-agent-container *)::before",
    "*:not(.visua11y-agent-container *)::after",
];

pub const FILTERS: &[FilterPreset] = &[
    FilterPreset {
        name: "dark-contrast",
        children_selector: CONTRAST_TARGETS,
        styles: &[
            ("color", "#FFF"),
            ("fill", "#FFF"),
            ("background-color", "#000"),
        ],
        css: None,
    },
    FilterPreset {
        name: "light-contrast",
        children_selector: CONTRAST_TARGETS,
        styles: &[
            ("color", "#000"),
            ("fill", "#000"),
            ("background-color", "#FFF"),
        ],
        css: None,
    },
    FilterPreset {
        name: "high-contrast",
        children_selector: ROOT_ONLY,
        styles: &[("filter", "contrast(125%)")],
        css: None,
    },
    FilterPreset {
        name: "high-saturation",
        children_selector: ROOT_ONLY,
        styles: &[("filter", "saturate(200%)")],
        css: None,
    },
    FilterPreset {
        name: "low-saturation",
        children_selector: ROOT_ONLY,
        styles: &[("filter", "saturate(50%)")],
        css: None,
    },
    FilterPreset {
        name: "monochrome",
        children_selector: ROOT_ONLY,
        styles: &[("filter", "grayscale(100%)")],
        css: None,
    },
];

/// Look up a contrast mode by name.
#[must_use]
pub fn filter(name: &str) -> Option<&'static FilterPreset> {
    FILTERS.iter().find(|preset| preset.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::generate_css_from_config;

    #[test]
    fn filter_names_are_unique() {
        for (i, a) in FILTERS.iter().enumerate() {
            assert!(FILTERS.iter().skip(i + 1).all(|b| b.name != a.name));
        }
    }

    #[test]
    fn monochrome_targets_scope_root() {
        let css = generate_css_from_config(&filter("monochrome").unwrap().to_tool_config());
        assert!(css.starts_with("html.aws-filter {-o-filter:grayscale(100%) !important;"));
        assert!(css.ends_with("filter:grayscale(100%) !important;}"));
    }

    #[test]
    fn unknown_filter_is_none() {
        assert!(filter("highContrast").is_none());
        assert!(filter("").is_none());
    }

    #[test]
    fn outside_widget_appends_exclusion() {
        assert_eq!(
            outside_widget(&["p"]),
            vec!["p:not(.visua11y-agent-container *)".to_string()]
        );
    }
}
