//! Custom colour palette state and its stylesheet.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::constants::{CONTENT_SCOPE, PALETTE_MARKER_CLASS};

static HEX_COLOR: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").ok());

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteCategory {
    #[default]
    Backgrounds,
    Headings,
    Contents,
}

impl PaletteCategory {
    pub const ALL: [Self; 3] = [Self::Backgrounds, Self::Headings, Self::Contents];

    #[must_use]
    pub const fn default_color(self) -> &'static str {
        match self {
            Self::Backgrounds => "#ffffff",
            Self::Headings => "#0a53ff",
            Self::Contents => "#111827",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomPaletteState {
    #[serde(default, deserialize_with = "lenient_enabled")]
    pub enabled: bool,
    #[serde(default, deserialize_with = "lenient_category")]
    pub active_category: PaletteCategory,
    #[serde(default, deserialize_with = "lenient_colors")]
    pub colors: BTreeMap<PaletteCategory, String>,
}

fn lenient_enabled<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_bool().unwrap_or_default())
}

fn lenient_category<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<PaletteCategory, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Unknown categories are dropped; non-string colours take the category default.
fn lenient_colors<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<PaletteCategory, String>, D::Error> {
    let Value::Object(map) = Value::deserialize(deserializer)? else {
        return Ok(BTreeMap::new());
    };
    Ok(map
        .into_iter()
        .filter_map(|(key, color)| {
            let category: PaletteCategory = serde_json::from_value(Value::String(key)).ok()?;
            let color = color
                .as_str()
                .map_or_else(|| category.default_color().to_string(), ToString::to_string);
            Some((category, color))
        })
        .collect())
}

/// Whether `value` is a `#rgb` or `#rrggbb` colour.
#[must_use]
pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR.as_ref().is_some_and(|re| re.is_match(value))
}

/// Trimmed colour if valid, otherwise `fallback`.
#[must_use]
pub fn sanitize_color(color: Option<&str>, fallback: &str) -> String {
    let value = color.unwrap_or_default().trim();
    if is_hex_color(value) {
        value.to_string()
    } else {
        fallback.to_string()
    }
}

impl CustomPaletteState {
    /// Effective colour for a category, default when missing or invalid.
    #[must_use]
    pub fn color(&self, category: PaletteCategory) -> String {
        sanitize_color(
            self.colors.get(&category).map(String::as_str),
            category.default_color(),
        )
    }

    /// Copy whose stored colours all satisfy the hex pattern.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let colors = self
            .colors
            .keys()
            .map(|category| (*category, self.color(*category)))
            .collect();
        Self {
            enabled: self.enabled,
            active_category: self.active_category,
            colors,
        }
    }

    /// Store a colour for a category, replacing invalid input with its default.
    pub fn set_color(&mut self, category: PaletteCategory, color: &str) {
        self.colors.insert(
            category,
            sanitize_color(Some(color), category.default_color()),
        );
    }

    /// Stylesheet for an enabled palette, `None` when it should be removed.
    #[must_use]
    pub fn stylesheet(&self) -> Option<String> {
        if !self.enabled {
            return None;
        }

        let root = format!("html.{PALETTE_MARKER_CLASS} body");
        let backgrounds = self.color(PaletteCategory::Backgrounds);
        let headings = self.color(PaletteCategory::Headings);
        let contents = self.color(PaletteCategory::Contents);
        let heading_rules = (1..=6)
            .map(|level| format!("{root} {CONTENT_SCOPE} h{level}"))
            .collect::<Vec<_>>()
            .join(",");

        Some(format!(
            "{root}{{background-color:{backgrounds} !important;}}\
             {root} {CONTENT_SCOPE}{{color:{contents} !important;}}\
             {heading_rules}{{color:{headings} !important;}}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_validation_accepts_short_and_long_forms() {
        assert!(is_hex_color("#fff"));
        assert!(is_hex_color("#A0b1C2"));
        assert!(!is_hex_color("#ffff"));
        assert!(!is_hex_color("red"));
        assert!(!is_hex_color("#gggggg"));
    }

    #[test]
    fn invalid_colors_fall_back_to_category_default() {
        let mut state = CustomPaletteState::default();
        state.set_color(PaletteCategory::Headings, "javascript:alert(1)");
        state.set_color(PaletteCategory::Contents, "  #123  ");
        assert_eq!(state.colors[&PaletteCategory::Headings], "#0a53ff");
        assert_eq!(state.colors[&PaletteCategory::Contents], "#123");
    }

    #[test]
    fn disabled_palette_has_no_stylesheet() {
        assert!(CustomPaletteState::default().stylesheet().is_none());
    }

    #[test]
    fn stylesheet_uses_defaults_for_missing_colors() {
        let mut state = CustomPaletteState {
            enabled: true,
            ..CustomPaletteState::default()
        };
        state
            .colors
            .insert(PaletteCategory::Backgrounds, "nope".to_string());
        let css = state.stylesheet().unwrap_or_default();
        assert!(css.contains("background-color:#ffffff !important"));
        assert!(css.contains("color:#0a53ff !important"));
        assert!(css.contains("color:#111827 !important"));
        assert!(!css.contains("nope"));
    }

    #[test]
    fn state_serializes_camel_case() {
        let state: CustomPaletteState = serde_json::from_str(
            r##"{"enabled":true,"activeCategory":"headings","colors":{"contents":"#000"}}"##,
        )
        .unwrap();
        assert_eq!(state.active_category, PaletteCategory::Headings);
        assert_eq!(state.color(PaletteCategory::Contents), "#000");
        let round = serde_json::to_value(&state).unwrap();
        assert_eq!(round["activeCategory"], "headings");
    }

    #[test]
    fn malformed_entries_degrade_to_defaults() {
        let state: CustomPaletteState = serde_json::from_str(
            r##"{"enabled":true,"activeCategory":"borders","colors":{"backgrounds":null,"headings":"#000","borders":"#111"}}"##,
        )
        .unwrap();
        assert!(state.enabled);
        assert_eq!(state.active_category, PaletteCategory::Backgrounds);
        assert_eq!(state.color(PaletteCategory::Backgrounds), "#ffffff");
        assert_eq!(state.color(PaletteCategory::Headings), "#000");
        assert_eq!(state.colors.len(), 2);
    }
}
