//! Widget button size presets and panel width scaling.

use serde::{Deserialize, Serialize};

use crate::constants::{MIN_PANEL_WIDTH, MIN_WIDGET_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetSizePreset {
    #[default]
    Default,
    Medium,
    Small,
}

impl WidgetSizePreset {
    pub const ALL: [Self; 3] = [Self::Default, Self::Medium, Self::Small];

    #[must_use]
    pub const fn size(self) -> u32 {
        match self {
            Self::Default => 58,
            Self::Medium => 50,
            Self::Small => 42,
        }
    }

    #[must_use]
    pub const fn panel_width(self) -> u32 {
        match self {
            Self::Default => 500,
            Self::Medium => 440,
            Self::Small => 380,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Medium => "medium",
            Self::Small => "small",
        }
    }

    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|preset| preset.as_str().eq_ignore_ascii_case(name))
    }

    fn for_size(size: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.size() == size)
    }
}

/// Host or user supplied size: a preset name, a number, or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WidgetSizeInput {
    Number(f64),
    Text(String),
}

impl From<WidgetSizePreset> for WidgetSizeInput {
    fn from(preset: WidgetSizePreset) -> Self {
        Self::Text(preset.as_str().to_string())
    }
}

impl From<f64> for WidgetSizeInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for WidgetSizeInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSize {
    pub size: u32,
    pub preset: Option<WidgetSizePreset>,
    pub panel_width: u32,
}

impl Default for WidgetSize {
    fn default() -> Self {
        Self::from_preset(WidgetSizePreset::Default)
    }
}

impl WidgetSize {
    #[must_use]
    pub const fn from_preset(preset: WidgetSizePreset) -> Self {
        Self {
            size: preset.size(),
            preset: Some(preset),
            panel_width: preset.panel_width(),
        }
    }

    fn from_number(value: f64) -> Self {
        let size = normalize_size(value);
        let preset = WidgetSizePreset::for_size(size);
        Self {
            size,
            preset,
            panel_width: compute_panel_width(preset, size),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn normalize_size(value: f64) -> u32 {
    let rounded = value.round().max(f64::from(MIN_WIDGET_SIZE));
    rounded.min(f64::from(u32::MAX)) as u32
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn compute_panel_width(preset: Option<WidgetSizePreset>, size: u32) -> u32 {
    if let Some(preset) = preset {
        return preset.panel_width();
    }
    let default = WidgetSizePreset::Default;
    let scale = f64::from(size) / f64::from(default.size());
    let width = (f64::from(default.panel_width()) * scale).round();
    (width.min(f64::from(u32::MAX)) as u32).max(MIN_PANEL_WIDTH)
}

/// Resolve any size input to a concrete button size and panel width.
///
/// Unparseable or non-finite input yields the default preset.
#[must_use]
pub fn resolve_widget_size(value: Option<&WidgetSizeInput>) -> WidgetSize {
    match value {
        Some(WidgetSizeInput::Number(n)) if n.is_finite() => WidgetSize::from_number(*n),
        Some(WidgetSizeInput::Text(text)) => {
            if let Some(preset) = WidgetSizePreset::parse(text) {
                return WidgetSize::from_preset(preset);
            }
            match text.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => WidgetSize::from_number(n),
                _ => WidgetSize::default(),
            }
        }
        _ => WidgetSize::default(),
    }
}
