use visua11y_core::FeatureStates;
use visua11y_core::catalog::{ICON_CLASSES, text_selector_list};
use visua11y_core::constants::CONTAINER_CLASS;
use web_sys::HtmlElement;

use crate::dom::{DomError, query_html_elements, window};

/// Dataset key behind `data-visua11y-agent-org-font-size`.
const ORIGINAL_SIZE_KEY: &str = "visua11yAgentOrgFontSize";

pub(super) fn apply(states: &FeatureStates) -> Result<(), DomError> {
    adjust_font_size(states.font_size())
}

/// Leading pixel number of a computed `font-size` value.
fn parse_px(value: &str) -> Option<f64> {
    let number = value.trim().trim_end_matches("px").trim();
    number.parse::<f64>().ok().filter(|n| n.is_finite() && *n > 0.0)
}

fn is_icon(element: &HtmlElement) -> bool {
    let classes = element.class_list();
    ICON_CLASSES.iter().any(|class| classes.contains(class))
}

fn original_size(element: &HtmlElement) -> Option<f64> {
    if let Some(stored) = element.dataset().get(ORIGINAL_SIZE_KEY).as_deref().and_then(parse_px) {
        return Some(stored);
    }
    window()?
        .get_computed_style(element)
        .ok()
        .flatten()
        .and_then(|style| style.get_property_value("font-size").ok())
        .as_deref()
        .and_then(parse_px)
}

/// Scale page text to `multiplier` times its original size.
///
/// The first adjustment remembers each element's computed size, so later
/// calls scale from that rather than compounding. A multiplier of `1` on an
/// untouched element leaves it alone.
///
/// # Errors
/// Returns an error if the document cannot be queried or styled.
pub fn adjust_font_size(multiplier: f64) -> Result<(), DomError> {
    let container = format!(".{CONTAINER_CLASS}");
    let unchanged = (multiplier - 1.0).abs() < f64::EPSILON;

    for element in query_html_elements(&text_selector_list())? {
        if element.closest(&container)?.is_some() || is_icon(&element) {
            continue;
        }
        let remembered = element.dataset().get(ORIGINAL_SIZE_KEY).is_some();
        if unchanged && !remembered {
            continue;
        }
        let Some(original) = original_size(&element) else {
            continue;
        };
        if !remembered {
            element
                .dataset()
                .set(ORIGINAL_SIZE_KEY, &original.to_string())?;
        }
        element
            .style()
            .set_property("font-size", &format!("{}px", original * multiplier))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_px;

    #[test]
    fn parses_computed_pixel_sizes() {
        assert_eq!(parse_px("16px"), Some(16.0));
        assert_eq!(parse_px(" 12.5px "), Some(12.5));
        assert_eq!(parse_px("20"), Some(20.0));
        assert_eq!(parse_px("0px"), None);
        assert_eq!(parse_px("large"), None);
    }
}
