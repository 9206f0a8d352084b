//! Configuration and persisted preference types.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{
    DEFAULT_LANGUAGE, DEFAULT_OFFSET, STATE_CONTRAST, STATE_CUSTOM_PALETTE, STATE_FONT_SIZE,
};
use crate::palette::CustomPaletteState;
use crate::widget_size::{WidgetSize, WidgetSizeInput, WidgetSizePreset, resolve_widget_size};

/// Pixel offset of the widget button from its anchored corner or edge.
pub type Offset = [i32; 2];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    #[default]
    BottomLeft,
    BottomRight,
    BottomCenter,
    TopLeft,
    TopRight,
    TopCenter,
    CenterLeft,
    CenterRight,
}

impl Position {
    pub const ALL: [Self; 8] = [
        Self::BottomLeft,
        Self::BottomRight,
        Self::BottomCenter,
        Self::TopLeft,
        Self::TopRight,
        Self::TopCenter,
        Self::CenterLeft,
        Self::CenterRight,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
            Self::BottomCenter => "bottom-center",
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::TopCenter => "top-center",
            Self::CenterLeft => "center-left",
            Self::CenterRight => "center-right",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|position| position.as_str().eq_ignore_ascii_case(value))
    }
}

/// Deserialize a field, treating malformed values as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Offsets accept any two finite numbers and round them to whole pixels.
fn lenient_offset<'de, D>(deserializer: D) -> Result<Option<Offset>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value::<[f64; 2]>(value)
        .ok()
        .filter(|pair| pair.iter().all(|n| n.is_finite()))
        .map(|[x, y]| [round_px(x), round_px(y)]))
}

fn lenient_states<'de, D>(deserializer: D) -> Result<FeatureStates, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(map) => FeatureStates(map),
        _ => FeatureStates::default(),
    })
}

/// Per-feature states keyed by feature id.
///
/// Only `fontSize`, `contrast` and `custom-palette` have a fixed shape;
/// every other key is kept verbatim so newer features survive older code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureStates(pub Map<String, Value>);

impl FeatureStates {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Truthiness of a feature the way a toggle reads it.
    #[must_use]
    pub fn is_enabled(&self, key: &str) -> bool {
        match self.0.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_) | Value::Object(_)) => true,
            Some(Value::Null) | None => false,
        }
    }

    /// Font size multiplier, `1.0` when unset or invalid.
    #[must_use]
    pub fn font_size(&self) -> f64 {
        self.0
            .get(STATE_FONT_SIZE)
            .and_then(Value::as_f64)
            .filter(|n| n.is_finite() && *n > 0.0)
            .unwrap_or(1.0)
    }

    /// Active contrast mode name, if any.
    #[must_use]
    pub fn contrast(&self) -> Option<&str> {
        self.0
            .get(STATE_CONTRAST)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Stored palette with colours sanitized.
    #[must_use]
    pub fn custom_palette(&self) -> Option<CustomPaletteState> {
        self.0
            .get(STATE_CUSTOM_PALETTE)
            .and_then(|v| serde_json::from_value::<CustomPaletteState>(v.clone()).ok())
            .map(|palette| palette.sanitized())
    }

    /// Shallow merge: keys in `other` overwrite keys here.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// The subset of preferences saved across sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_offset")]
    pub offset: Option<Offset>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub widget_size: Option<WidgetSizeInput>,
    #[serde(default, deserialize_with = "lenient_states")]
    pub states: FeatureStates,
}

impl UserSettings {
    /// Interpret a stored JSON value; anything but an object means "no settings".
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        serde_json::from_value(value).unwrap_or_else(|err| {
            log::warn!("ignoring unreadable saved settings: {err}");
            Self::default()
        })
    }
}

/// Live configuration driving the widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveConfig {
    pub lang: String,
    pub position: Position,
    pub offset: Offset,
    pub size: u32,
    pub size_preset: Option<WidgetSizePreset>,
    pub panel_width: u32,
    pub icon: Option<String>,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        let size = WidgetSize::default();
        Self {
            lang: DEFAULT_LANGUAGE.to_string(),
            position: Position::default(),
            offset: DEFAULT_OFFSET,
            size: size.size,
            size_preset: size.preset,
            panel_width: size.panel_width,
            icon: None,
        }
    }
}

impl EffectiveConfig {
    pub fn apply_widget_size(&mut self, input: Option<&WidgetSizeInput>) {
        let resolved = resolve_widget_size(input);
        self.size = resolved.size;
        self.size_preset = resolved.preset;
        self.panel_width = resolved.panel_width;
    }

    /// Shallow overwrite with host options; size goes through size resolution.
    pub fn apply_options(&mut self, options: &InitOptions) {
        if let Some(lang) = options.lang.as_deref().filter(|l| !l.trim().is_empty()) {
            self.lang = lang.trim().to_string();
        }
        if let Some(raw) = options.position.as_deref() {
            match Position::parse(raw) {
                Some(position) => self.position = position,
                None => log::warn!("ignoring unknown widget position {raw:?}"),
            }
        }
        if let Some(offset) = options.offset {
            self.offset = offset;
        }
        if options.size.is_some() {
            self.apply_widget_size(options.size.as_ref());
        }
        if options.icon.is_some() {
            self.icon.clone_from(&options.icon);
        }
    }
}

/// Initial values captured after host options, used by reset.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginDefaults(EffectiveConfig);

impl PluginDefaults {
    #[must_use]
    pub fn snapshot(config: &EffectiveConfig) -> Self {
        Self(config.clone())
    }

    #[must_use]
    pub const fn config(&self) -> &EffectiveConfig {
        &self.0
    }

    pub fn restore_into(&self, config: &mut EffectiveConfig) {
        config.clone_from(&self.0);
    }
}

/// Options supplied by the host page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitOptions {
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "lenient_offset")]
    pub offset: Option<Offset>,
    #[serde(default, deserialize_with = "lenient")]
    pub size: Option<WidgetSizeInput>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub disable_observe_lang: bool,
    #[serde(default)]
    pub log_level: Option<String>,
}

impl InitOptions {
    /// Build options from `data-visua11y-agent-*` style attribute lookups.
    ///
    /// `lookup` receives the bare option name (`lang`, `position`, ...).
    pub fn from_attributes(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            lang: lookup("lang").filter(|v| !v.trim().is_empty()),
            position: lookup("position").filter(|v| !v.trim().is_empty()),
            offset: lookup("offset").and_then(|v| parse_offset(&v)),
            size: lookup("size")
                .filter(|v| !v.trim().is_empty())
                .map(WidgetSizeInput::Text),
            icon: lookup("icon").filter(|v| !v.trim().is_empty()),
            disable_observe_lang: lookup("disable-observe-lang")
                .is_some_and(|v| !v.trim().eq_ignore_ascii_case("false")),
            log_level: lookup("log-level"),
        }
    }
}

/// Parse `"x,y"` (commas or whitespace) into an offset.
#[must_use]
pub fn parse_offset(raw: &str) -> Option<Offset> {
    let parts: Vec<i32> = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<f64>().ok().filter(|n| n.is_finite()))
        .collect::<Option<Vec<f64>>>()?
        .into_iter()
        .map(round_px)
        .collect();
    match parts.as_slice() {
        [x, y] => Some([*x, *y]),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn round_px(value: f64) -> i32 {
    value
        .round()
        .clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}
