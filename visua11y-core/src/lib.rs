//! Visua11y Agent core
//!
//! Platform-agnostic logic for the accessibility overlay: CSS generation,
//! tool and filter catalogues, settings resolution, persistence and
//! language resolution. Nothing here touches the DOM.

pub mod catalog;
pub mod constants;
pub mod css;
pub mod languages;
pub mod palette;
pub mod profiles;
pub mod session;
pub mod settings;
pub mod storage;
pub mod tools;
pub mod voice;
pub mod widget_size;

// Re-export commonly used types
pub use catalog::{FILTERS, FilterPreset, filter};
pub use css::{StyleMap, ToolConfig, generate_css, generate_css_from_config, wrap_css_to_selector};
pub use languages::{Dictionary, LanguageEntry, LanguageRegistry, RegisterLanguageOptions};
pub use palette::{CustomPaletteState, PaletteCategory};
pub use profiles::{ACCESSIBILITY_PROFILES, AccessibilityProfile, find_profile};
pub use session::{LanguageChange, WidgetSession};
pub use settings::{
    EffectiveConfig, FeatureStates, InitOptions, Offset, PluginDefaults, Position, UserSettings,
    parse_offset,
};
pub use storage::{FailingStore, KeyValueStore, MemoryStore, Persistence, StorageError};
pub use voice::VoiceCommand;
pub use widget_size::{WidgetSize, WidgetSizeInput, WidgetSizePreset, resolve_widget_size};
