//! CSS generation engine.
//!
//! Turns small declarative [`ToolConfig`] values into stylesheet text that can
//! be injected into an arbitrary page. Every declaration is forced with
//! `!important` because the host page's own rules are unknown.

use crate::constants::namespaced;

/// Properties that still need vendor-prefixed copies to work everywhere.
const PREFIXED_PROPERTIES: &[&str] = &["filter"];
const VENDOR_PREFIXES: &[&str] = &["-o-", "-ms-", "-moz-", "-webkit-"];

/// Ordered property/value pairs. Output order follows insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap(Vec<(String, String)>);

impl StyleMap {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut map = Self::new();
        for (property, value) in pairs {
            map.insert(property, value);
        }
        map
    }

    /// Set a property, keeping its original position when it already exists.
    pub fn insert(&mut self, property: &str, value: &str) {
        if let Some(slot) = self.0.iter_mut().find(|(p, _)| p == property) {
            slot.1 = value.to_string();
        } else {
            self.0.push((property.to_string(), value.to_string()));
        }
    }

    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.0
            .iter()
            .find_map(|(p, v)| (p == property).then_some(v.as_str()))
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }
}

/// Declarative description of one CSS-backed tool.
///
/// Definitions are immutable; whether the tool is on is decided per call of
/// the injector, never stored here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolConfig {
    pub id: String,
    pub selector: String,
    pub children_selector: Vec<String>,
    pub styles: StyleMap,
    pub css: Option<String>,
}

impl ToolConfig {
    #[must_use]
    pub fn new(id: &str, selector: &str) -> Self {
        Self {
            id: id.to_string(),
            selector: selector.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children_selector = children.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_styles(mut self, pairs: &[(&str, &str)]) -> Self {
        self.styles = StyleMap::from_pairs(pairs);
        self
    }

    #[must_use]
    pub fn with_css(mut self, css: &str) -> Self {
        self.css = Some(css.to_string());
        self
    }

    /// Same tool re-rooted under another scope selector.
    #[must_use]
    pub fn scoped_to(&self, selector: &str) -> Self {
        Self {
            selector: selector.to_string(),
            ..self.clone()
        }
    }

    /// Id of the `<style>` element carrying this tool's rules.
    #[must_use]
    pub fn stylesheet_id(&self) -> String {
        namespaced(&self.id)
    }

    /// Class toggled on the document root while the tool is active.
    #[must_use]
    pub fn marker_class(&self) -> String {
        namespaced(&self.id)
    }
}

/// Render a style map as `!important` declarations.
///
/// Properties in [`PREFIXED_PROPERTIES`] get every vendor-prefixed variant
/// before the standard one.
#[must_use]
pub fn generate_css(styles: &StyleMap) -> String {
    let mut css = String::new();
    for (property, value) in styles.iter() {
        if PREFIXED_PROPERTIES.contains(&property) {
            for prefix in VENDOR_PREFIXES {
                css.push_str(&format!("{prefix}{property}:{value} !important;"));
            }
        }
        css.push_str(&format!("{property}:{value} !important;"));
    }
    css
}

/// Wrap a declaration block once per child selector under `selector`.
///
/// An empty child selector targets the scope root itself, rendered as
/// `"<selector> {css}"`.
#[must_use]
pub fn wrap_css_to_selector<S: AsRef<str>>(
    selector: &str,
    children_selector: &[S],
    css: &str,
) -> String {
    children_selector
        .iter()
        .map(|child| {
            let child = child.as_ref();
            if child.is_empty() {
                format!("{selector} {{{css}}}")
            } else {
                format!("{selector} {child}{{{css}}}")
            }
        })
        .collect()
}

/// Full stylesheet for a tool: wrapped style rules first, raw css after.
///
/// Empty `styles` emit no wrapped blocks at all rather than empty rules.
#[must_use]
pub fn generate_css_from_config(config: &ToolConfig) -> String {
    let raw = config.css.as_deref().unwrap_or_default();
    if config.styles.is_empty() && raw.is_empty() {
        return String::new();
    }

    let mut output = String::new();
    if !config.styles.is_empty() {
        output.push_str(&wrap_css_to_selector(
            &config.selector,
            &config.children_selector,
            &generate_css(&config.styles),
        ));
    }
    output.push_str(raw);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_css_marks_every_declaration_important() {
        let styles = StyleMap::from_pairs(&[("color", "red"), ("font-size", "16px")]);
        assert_eq!(
            generate_css(&styles),
            "color:red !important;font-size:16px !important;"
        );
    }

    #[test]
    fn generate_css_prefixes_filter() {
        let styles = StyleMap::from_pairs(&[("filter", "blur(5px)")]);
        assert_eq!(
            generate_css(&styles),
            "-o-filter:blur(5px) !important;-ms-filter:blur(5px) !important;\
             -moz-filter:blur(5px) !important;-webkit-filter:blur(5px) !important;\
             filter:blur(5px) !important;"
        );
    }

    #[test]
    fn generate_css_of_empty_map_is_empty() {
        assert_eq!(generate_css(&StyleMap::new()), "");
    }

    #[test]
    fn style_map_insert_keeps_position() {
        let mut styles = StyleMap::from_pairs(&[("a", "1"), ("b", "2")]);
        styles.insert("a", "3");
        let keys: Vec<_> = styles.iter().map(|(p, _)| p).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(styles.get("a"), Some("3"));
        assert_eq!(styles.len(), 2);
    }

    #[test]
    fn wrap_handles_empty_child_and_no_children() {
        assert_eq!(
            wrap_css_to_selector("body", &[""], "margin:0;"),
            "body {margin:0;}"
        );
        let none: [&str; 0] = [];
        assert_eq!(wrap_css_to_selector("body", &none, "margin:0;"), "");
        assert_eq!(
            wrap_css_to_selector("html", &["h1", "h2"], "font-weight:bold;"),
            "html h1{font-weight:bold;}html h2{font-weight:bold;}"
        );
    }

    #[test]
    fn config_css_follows_styles() {
        let config = ToolConfig::new("test-tool", "body")
            .with_children(["p"])
            .with_styles(&[("color", "green")])
            .with_css("body{background-color: black;}");
        assert_eq!(
            generate_css_from_config(&config),
            "body p{color:green !important;}body{background-color: black;}"
        );
    }

    #[test]
    fn config_without_styles_or_css_is_empty() {
        let config = ToolConfig::new("test-tool", "body").with_children(["p"]);
        assert_eq!(generate_css_from_config(&config), "");
        assert_eq!(config.stylesheet_id(), "visua11y-agent-test-tool");
    }

    #[test]
    fn raw_css_alone_is_emitted_verbatim() {
        let config = ToolConfig::new("raw", "html").with_css("a{b:c}");
        assert_eq!(generate_css_from_config(&config), "a{b:c}");
    }
}
