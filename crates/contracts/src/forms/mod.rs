//! Wire types for the modal form endpoints.
//!
//! The backend serves form fragments as HTML; only the two JSON payloads it
//! emits around them are typed here.

use serde::{Deserialize, Serialize};

/// Body of a 403 response for an unauthenticated AJAX request.
///
/// The backend answers with this instead of an HTML redirect when the
/// request carries `X-Requested-With: XMLHttpRequest`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedirectNotice {
    pub redirect_url: String,
}

/// Acknowledgment body of a successful form submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAck {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_notice_parse() {
        let notice: RedirectNotice =
            serde_json::from_str(r#"{"redirect_url": "/accounts/login/"}"#).unwrap();
        assert_eq!(notice.redirect_url, "/accounts/login/");
    }

    #[test]
    fn test_redirect_notice_rejects_missing_field() {
        assert!(serde_json::from_str::<RedirectNotice>(r#"{"detail": "forbidden"}"#).is_err());
        assert!(serde_json::from_str::<RedirectNotice>("<html>forbidden</html>").is_err());
    }

    #[test]
    fn test_submit_ack_parse() {
        let ack: SubmitAck =
            serde_json::from_str(r#"{"message": "Comment reported successfully!"}"#).unwrap();
        assert_eq!(ack.message, "Comment reported successfully!");
    }
}
