//! Tool activation layer.
//!
//! Every feature id maps to one activation entry. Activations read the whole
//! [`FeatureStates`] and are idempotent, so re-running them after any change
//! is always safe.

mod contrast;
mod font_size;
mod palette;
mod reading_guide;
mod screen_reader;
mod voice_navigation;

pub use contrast::enable_contrast;
pub use font_size::adjust_font_size;
pub use palette::apply_custom_palette;
pub use reading_guide::reading_guide;
pub use screen_reader::{accessible_name, screen_reader};
pub use voice_navigation::{execute_command, voice_navigation};

use visua11y_core::FeatureStates;
use visua11y_core::constants::{STATE_CONTRAST, STATE_CUSTOM_PALETTE, STATE_FONT_SIZE};
use visua11y_core::tools::{self as css_tools, css_tool};

use crate::dom::DomError;
use crate::stylesheet::inject_tool_css;

pub const READABLE_GUIDE: &str = "readable-guide";
pub const SCREEN_READER: &str = "screen-reader";
pub const VOICE_NAVIGATION: &str = "voice-navigation";

type ActivateFn = fn(&FeatureStates) -> Result<(), DomError>;

#[derive(Clone, Copy)]
pub enum Activation {
    /// Boolean feature backed by a catalogue stylesheet of the same id.
    Stylesheet,
    Custom(ActivateFn),
}

/// Feature id to activation, in application order.
pub const ACTIVATIONS: &[(&str, Activation)] = &[
    (STATE_FONT_SIZE, Activation::Custom(font_size::apply)),
    (STATE_CONTRAST, Activation::Custom(contrast::apply)),
    (css_tools::HIGHLIGHT_TITLE, Activation::Stylesheet),
    (css_tools::HIGHLIGHT_LINKS, Activation::Stylesheet),
    (css_tools::LETTER_SPACING, Activation::Stylesheet),
    (css_tools::LINE_HEIGHT, Activation::Stylesheet),
    (css_tools::FONT_WEIGHT, Activation::Stylesheet),
    (css_tools::READABLE_FONT, Activation::Stylesheet),
    (READABLE_GUIDE, Activation::Custom(reading_guide::apply)),
    (css_tools::STOP_ANIMATIONS, Activation::Stylesheet),
    (css_tools::BIG_CURSOR, Activation::Stylesheet),
    (css_tools::IMAGE_DESATURATION, Activation::Stylesheet),
    (css_tools::LOW_SATURATION, Activation::Stylesheet),
    (SCREEN_READER, Activation::Custom(screen_reader::apply)),
    (VOICE_NAVIGATION, Activation::Custom(voice_navigation::apply)),
    (STATE_CUSTOM_PALETTE, Activation::Custom(palette::apply)),
];

fn activate(id: &str, activation: Activation, states: &FeatureStates) -> Result<(), DomError> {
    match activation {
        Activation::Stylesheet => match css_tool(id) {
            Some(config) => inject_tool_css(config, states.is_enabled(id)),
            None => {
                log::error!("no stylesheet registered for tool {id}");
                Ok(())
            }
        },
        Activation::Custom(apply) => apply(states),
    }
}

/// Re-apply every known feature from `states`. Failures are logged per
/// feature and never stop the others.
pub fn run_accessibility(states: &FeatureStates) {
    for (id, activation) in ACTIVATIONS {
        if let Err(err) = activate(id, *activation, states) {
            log::error!("failed to apply {id}: {err}");
        }
    }
}

/// Re-apply a single feature after its state changed.
///
/// Returns `false` for ids without an activation.
pub fn apply_feature(id: &str, states: &FeatureStates) -> bool {
    let Some((id, activation)) = ACTIVATIONS.iter().find(|(known, _)| *known == id) else {
        log::debug!("no activation for feature {id}");
        return false;
    };
    if let Err(err) = activate(id, *activation, states) {
        log::error!("failed to apply {id}: {err}");
    }
    true
}
