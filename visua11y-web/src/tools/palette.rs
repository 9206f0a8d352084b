use visua11y_core::FeatureStates;
use visua11y_core::constants::{PALETTE_MARKER_CLASS, PALETTE_STYLE_ID};

use crate::dom::DomError;
use crate::stylesheet::{add_stylesheet, remove_stylesheet, set_root_class};

pub(super) fn apply(states: &FeatureStates) -> Result<(), DomError> {
    let css = states
        .custom_palette()
        .and_then(|palette| palette.stylesheet());
    apply_custom_palette(css.as_deref())
}

/// Install a palette stylesheet, or remove the palette when `css` is `None`.
///
/// # Errors
/// Returns an error if the DOM cannot be updated.
pub fn apply_custom_palette(css: Option<&str>) -> Result<(), DomError> {
    match css {
        Some(css) => {
            add_stylesheet(PALETTE_STYLE_ID, Some(css))?;
            set_root_class(PALETTE_MARKER_CLASS, true)
        }
        None => {
            remove_stylesheet(PALETTE_STYLE_ID)?;
            set_root_class(PALETTE_MARKER_CLASS, false)
        }
    }
}
