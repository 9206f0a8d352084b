//! Cookie read/write used as the storage fallback.

use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

use crate::dom::{DomError, require_document};

pub const DEFAULT_EXPIRY_DAYS: f64 = 365.0;
const MS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Raw value of cookie `name` in a `document.cookie` string.
///
/// Names and values are trimmed; the first `=` separates them.
#[must_use]
pub fn find_cookie<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key.trim() == name).then(|| value.trim())
    })
}

/// Assignment string for `document.cookie`; `value` must already be encoded.
#[must_use]
pub fn cookie_assignment(name: &str, encoded_value: &str, expires_utc: &str) -> String {
    format!("{name}={encoded_value};expires={expires_utc};path=/;SameSite=Lax")
}

fn html_document() -> Result<HtmlDocument, DomError> {
    require_document()?
        .dyn_into::<HtmlDocument>()
        .map_err(|_| DomError::Js("document does not support cookies".to_string()))
}

/// Decoded value of cookie `name`, empty when absent.
///
/// # Errors
/// Returns an error if cookies cannot be read in this context.
pub fn get_cookie(name: &str) -> Result<String, DomError> {
    let cookies = html_document()?.cookie()?;
    let Some(raw) = find_cookie(&cookies, name) else {
        return Ok(String::new());
    };
    Ok(js_sys::decode_uri_component(raw)
        .map(String::from)
        .unwrap_or_else(|_| raw.to_string()))
}

/// Store `value` under `name` for `days` (365 when `None` or non-finite).
///
/// # Errors
/// Returns an error if cookies cannot be written in this context.
pub fn set_cookie(name: &str, value: &str, days: Option<f64>) -> Result<(), DomError> {
    let days = days.filter(|d| d.is_finite()).unwrap_or(DEFAULT_EXPIRY_DAYS);
    let expires = js_sys::Date::new(&(js_sys::Date::now() + days * MS_PER_DAY).into());
    let encoded = String::from(js_sys::encode_uri_component(value));
    let expires_utc = String::from(expires.to_utc_string());
    html_document()?.set_cookie(&cookie_assignment(name, &encoded, &expires_utc))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_trimmed_values_among_many() {
        let cookies = "first=1; spaced = value ; third=a=b";
        assert_eq!(find_cookie(cookies, "first"), Some("1"));
        assert_eq!(find_cookie(cookies, "spaced"), Some("value"));
        assert_eq!(find_cookie(cookies, "third"), Some("a=b"));
        assert_eq!(find_cookie(cookies, "missing"), None);
        assert_eq!(find_cookie("", "first"), None);
    }

    #[test]
    fn assignment_scopes_to_site_root() {
        assert_eq!(
            cookie_assignment("k", "v%20w", "Thu, 01 Jan 2026 00:00:00 GMT"),
            "k=v%20w;expires=Thu, 01 Jan 2026 00:00:00 GMT;path=/;SameSite=Lax"
        );
    }
}
