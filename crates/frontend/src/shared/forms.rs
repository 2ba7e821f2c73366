//! Form field serialization.
//!
//! Fragments arrive as server-rendered HTML, so field values are harvested
//! from the live DOM via `FormData` and encoded into an
//! `application/x-www-form-urlencoded` body.

use wasm_bindgen::JsCast;
use web_sys::HtmlFormElement;

/// Collect a form's fields as an URL-encoded request body.
///
/// File inputs are skipped; this transport carries text fields only.
pub fn urlencoded_body(form: &HtmlFormElement) -> Result<String, String> {
    let data = web_sys::FormData::new_with_form(form)
        .map_err(|_| "Failed to read form fields".to_string())?;

    let mut pairs: Vec<(String, String)> = Vec::new();
    let entries = js_sys::try_iter(&data)
        .map_err(|_| "Form fields are not iterable".to_string())?
        .ok_or_else(|| "Form fields are not iterable".to_string())?;

    for entry in entries {
        let entry = entry.map_err(|_| "Failed to iterate form fields".to_string())?;
        let pair: js_sys::Array = entry.unchecked_into();
        let name = match pair.get(0).as_string() {
            Some(name) => name,
            None => continue,
        };
        if let Some(value) = pair.get(1).as_string() {
            pairs.push((name, value));
        }
    }

    Ok(encode_pairs(&pairs))
}

/// Encode name/value pairs as `application/x-www-form-urlencoded`.
pub fn encode_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(name, value)| {
            format!("{}={}", urlencoding::encode(name), urlencoding::encode(value))
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_encode_pairs() {
        let body = encode_pairs(&pairs(&[
            ("name", "Ada Lovelace"),
            ("email", "ada@example.com"),
            ("message", "Hello & goodbye"),
        ]));
        assert_eq!(
            body,
            "name=Ada%20Lovelace&email=ada%40example.com&message=Hello%20%26%20goodbye"
        );
    }

    #[test]
    fn test_encode_pairs_empty() {
        assert_eq!(encode_pairs(&[]), "");
    }

    #[test]
    fn test_encode_pairs_keeps_duplicate_names() {
        // Multi-valued fields (checkbox groups) submit one pair per value.
        let body = encode_pairs(&pairs(&[("tag", "a"), ("tag", "b")]));
        assert_eq!(body, "tag=a&tag=b");
    }
}
