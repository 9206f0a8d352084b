//! Ready-made bundles of feature states for common needs.

use serde_json::Value;

use crate::settings::FeatureStates;
use crate::widget_size::WidgetSizePreset;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfileValue {
    Flag(bool),
    Number(f64),
    Text(&'static str),
}

impl From<ProfileValue> for Value {
    fn from(value: ProfileValue) -> Self {
        match value {
            ProfileValue::Flag(b) => Self::Bool(b),
            ProfileValue::Number(n) => serde_json::Number::from_f64(n).map_or(Self::Null, Self::Number),
            ProfileValue::Text(s) => Self::String(s.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccessibilityProfile {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub widget_size: Option<WidgetSizePreset>,
    pub states: &'static [(&'static str, ProfileValue)],
}

impl AccessibilityProfile {
    #[must_use]
    pub fn states(&self) -> FeatureStates {
        let mut states = FeatureStates::new();
        for (key, value) in self.states {
            states.set(key, *value);
        }
        states
    }
}

use ProfileValue::{Flag, Number, Text};

pub const ACCESSIBILITY_PROFILES: &[AccessibilityProfile] = &[
    AccessibilityProfile {
        id: "motor-impaired",
        label: "Motor Impaired",
        description: "Big cursor, voice navigation, and no animations.",
        widget_size: Some(WidgetSizePreset::Medium),
        states: &[
            ("fontSize", Number(1.1)),
            ("big-cursor", Flag(true)),
            ("voice-navigation", Flag(true)),
            ("stop-animations", Flag(true)),
        ],
    },
    AccessibilityProfile {
        id: "blind-mode",
        label: "Blind",
        description: "Screen reader helpers with higher contrast.",
        widget_size: Some(WidgetSizePreset::Medium),
        states: &[
            ("fontSize", Number(1.15)),
            ("contrast", Text("high-contrast")),
            ("screen-reader", Flag(true)),
            ("voice-navigation", Flag(true)),
        ],
    },
    AccessibilityProfile {
        id: "color-blind",
        label: "Color Blind",
        description: "High contrast palette with desaturated media.",
        widget_size: Some(WidgetSizePreset::Default),
        states: &[
            ("contrast", Text("high-contrast")),
            ("image-desaturation", Flag(true)),
            ("highlight-links", Flag(true)),
        ],
    },
    AccessibilityProfile {
        id: "dyslexia-mode",
        label: "Dyslexia",
        description: "Friendly font, extra spacing, stronger weight.",
        widget_size: Some(WidgetSizePreset::Default),
        states: &[
            ("readable-font", Flag(true)),
            ("letter-spacing", Flag(true)),
            ("line-height", Flag(true)),
            ("font-weight", Flag(true)),
            ("fontSize", Number(1.05)),
        ],
    },
    AccessibilityProfile {
        id: "low-vision-mode",
        label: "Low vision",
        description: "Dark contrast and 130% magnification.",
        widget_size: Some(WidgetSizePreset::Medium),
        states: &[
            ("fontSize", Number(1.3)),
            ("contrast", Text("dark-contrast")),
            ("big-cursor", Flag(true)),
            ("readable-font", Flag(true)),
        ],
    },
    AccessibilityProfile {
        id: "cognitive-learning",
        label: "Cognitive & Learning",
        description: "Highlights key sections and enables voice help.",
        widget_size: Some(WidgetSizePreset::Medium),
        states: &[
            ("highlight-title", Flag(true)),
            ("highlight-links", Flag(true)),
            ("voice-navigation", Flag(true)),
            ("readable-guide", Flag(true)),
        ],
    },
    AccessibilityProfile {
        id: "seizure-epileptic",
        label: "Seizure & Epileptic",
        description: "Stops animations and desaturates imagery.",
        widget_size: Some(WidgetSizePreset::Default),
        states: &[
            ("stop-animations", Flag(true)),
            ("image-desaturation", Flag(true)),
            ("low-saturation", Flag(true)),
        ],
    },
    AccessibilityProfile {
        id: "adhd-mode",
        label: "ADHD",
        description: "Reading guide, highlighted links, calmer palette.",
        widget_size: Some(WidgetSizePreset::Small),
        states: &[
            ("readable-guide", Flag(true)),
            ("highlight-links", Flag(true)),
            ("highlight-title", Flag(true)),
            ("contrast", Text("light-contrast")),
        ],
    },
];

#[must_use]
pub fn find_profile(id: &str) -> Option<&'static AccessibilityProfile> {
    ACCESSIBILITY_PROFILES.iter().find(|profile| profile.id == id)
}
