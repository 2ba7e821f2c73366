//! Cookie access for the browser's cookie jar.
//!
//! The anti-forgery token is read on demand; nothing is cached here.

use wasm_bindgen::JsCast;

/// Name of the backend's anti-forgery cookie.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Read the anti-forgery token from `document.cookie`.
///
/// Returns `None` outside a browser context or when the cookie is absent.
pub fn csrf_token() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let html_document = document.dyn_into::<web_sys::HtmlDocument>().ok()?;
    let cookies = html_document.cookie().ok()?;
    cookie_value(&cookies, CSRF_COOKIE)
}

/// Extract a named cookie from a `document.cookie` string.
///
/// The string is a semicolon-delimited list of `name=value` pairs; the value
/// is percent-decoded. A value that is not valid percent-encoded UTF-8 is
/// returned as-is rather than dropped.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    for pair in cookies.split(';') {
        let pair = pair.trim();
        if let Some(raw) = pair.strip_prefix(name) {
            if let Some(raw) = raw.strip_prefix('=') {
                return Some(
                    urlencoding::decode(raw)
                        .map(|v| v.into_owned())
                        .unwrap_or_else(|_| raw.to_string()),
                );
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value_decodes() {
        assert_eq!(
            cookie_value("a=1; csrftoken=XYZ%3D; b=2", "csrftoken"),
            Some("XYZ=".to_string())
        );
    }

    #[test]
    fn test_cookie_value_absent() {
        assert_eq!(cookie_value("a=1; b=2", "csrftoken"), None);
        assert_eq!(cookie_value("", "csrftoken"), None);
    }

    #[test]
    fn test_cookie_value_prefix_is_not_a_match() {
        // "csrftoken2" must not satisfy a lookup for "csrftoken".
        assert_eq!(cookie_value("csrftoken2=nope", "csrftoken"), None);
        assert_eq!(
            cookie_value("csrftoken2=nope; csrftoken=real", "csrftoken"),
            Some("real".to_string())
        );
    }

    #[test]
    fn test_cookie_value_keeps_embedded_equals() {
        assert_eq!(
            cookie_value("csrftoken=a=b", "csrftoken"),
            Some("a=b".to_string())
        );
    }

    #[test]
    fn test_cookie_value_malformed_encoding_passes_through() {
        assert_eq!(
            cookie_value("csrftoken=%E0%A4%A", "csrftoken"),
            Some("%E0%A4%A".to_string())
        );
    }
}
