//! HTTP layer for fragment loading and form submission.
//!
//! Requests carry `X-Requested-With: XMLHttpRequest` so the backend answers
//! authentication failures with a JSON redirect payload instead of an HTML
//! redirect.

use contracts::forms::RedirectNotice;
use gloo_net::http::Request;

/// How a request failed, from the controller's point of view.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request never produced an HTTP response.
    Transport(String),
    /// Non-2xx response; the body is kept for the 403 redirect payload.
    Http { status: u16, body: String },
}

/// Where a failed request asks the page to navigate.
///
/// Only a 403 whose body parses as a [`RedirectNotice`] does; a 403 with any
/// other body degrades to the generic failure path.
pub fn redirect_target(error: &FetchError) -> Option<String> {
    match error {
        FetchError::Http { status: 403, body } => serde_json::from_str::<RedirectNotice>(body)
            .ok()
            .map(|notice| notice.redirect_url),
        _ => None,
    }
}

/// GET a server-rendered form fragment.
pub async fn get_fragment(url: &str) -> Result<String, FetchError> {
    let response = Request::get(url)
        .header("X-Requested-With", "XMLHttpRequest")
        .send()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;
    read_body(response).await
}

/// POST an URL-encoded form body, attaching the anti-forgery header when a
/// token is available.
pub async fn post_form(
    url: &str,
    body: String,
    security_header: Option<(&'static str, String)>,
) -> Result<String, FetchError> {
    let mut request = Request::post(url)
        .header("X-Requested-With", "XMLHttpRequest")
        .header("Content-Type", "application/x-www-form-urlencoded");
    if let Some((name, value)) = security_header {
        request = request.header(name, &value);
    }
    let response = request
        .body(body)
        .map_err(|e| FetchError::Transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;
    read_body(response).await
}

async fn read_body(response: gloo_net::http::Response) -> Result<String, FetchError> {
    let status = response.status();
    let ok = response.ok();
    let body = response.text().await.unwrap_or_default();
    if ok {
        Ok(body)
    } else {
        Err(FetchError::Http { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16, body: &str) -> FetchError {
        FetchError::Http {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_redirect_target_on_403_with_payload() {
        let error = http(403, r#"{"redirect_url": "/login"}"#);
        assert_eq!(redirect_target(&error), Some("/login".to_string()));
    }

    #[test]
    fn test_redirect_target_ignores_unparseable_403_body() {
        assert_eq!(redirect_target(&http(403, "<html>Forbidden</html>")), None);
        assert_eq!(redirect_target(&http(403, "")), None);
        assert_eq!(redirect_target(&http(403, r#"{"detail": "no"}"#)), None);
    }

    #[test]
    fn test_redirect_target_ignores_other_statuses() {
        assert_eq!(
            redirect_target(&http(500, r#"{"redirect_url": "/login"}"#)),
            None
        );
        assert_eq!(
            redirect_target(&FetchError::Transport("connection refused".to_string())),
            None
        );
    }
}
