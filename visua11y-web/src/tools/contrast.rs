use visua11y_core::FeatureStates;
use visua11y_core::catalog::filter;
use visua11y_core::constants::{FILTER_MARKER_CLASS, FILTER_STYLE_ID};

use crate::dom::DomError;
use crate::stylesheet::{inject_css_as, remove_stylesheet, set_root_class};

pub(super) fn apply(states: &FeatureStates) -> Result<(), DomError> {
    enable_contrast(states.contrast())
}

/// Switch to the named contrast filter, or clear it for `None` and unknown
/// names. All filters share one stylesheet and one root class.
///
/// # Errors
/// Returns an error if the DOM cannot be updated.
pub fn enable_contrast(mode: Option<&str>) -> Result<(), DomError> {
    match mode.and_then(filter) {
        Some(preset) => inject_css_as(
            FILTER_STYLE_ID,
            FILTER_MARKER_CLASS,
            &preset.to_tool_config(),
            true,
        ),
        None => {
            remove_stylesheet(FILTER_STYLE_ID)?;
            set_root_class(FILTER_MARKER_CLASS, false)
        }
    }
}
