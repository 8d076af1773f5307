//! Response validation: transport failure, then status class, then media type.

use std::sync::Arc;

use crate::api::transport::{BoxError, RawResponse};
use crate::error::FetchError;

const JSON_MIME: &str = "application/json";

/// Media type of a `Content-Type` header with parameters stripped, lowercased.
pub fn mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Reduce a transport outcome to the JSON body, or the first failed check.
///
/// Checks short-circuit in a fixed order, so a 404 served as `text/html`
/// reports the status code and never the content type.
pub fn validate(outcome: Result<RawResponse, BoxError>) -> Result<Vec<u8>, FetchError> {
    let response = outcome.map_err(|cause| FetchError::Transport(Arc::from(cause)))?;

    if !(200..=299).contains(&response.status) {
        return Err(FetchError::HttpStatus {
            status_code: response.status,
        });
    }

    let mime = response.content_type.as_deref().map(mime_type);
    if mime.as_deref() != Some(JSON_MIME) {
        return Err(FetchError::UnsupportedContentType { content_type: mime });
    }

    Ok(response.body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, content_type: Option<&str>, body: &str) -> RawResponse {
        RawResponse {
            status,
            content_type: content_type.map(|s| s.to_string()),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_success_passes_body_through() {
        let body = validate(Ok(response(200, Some("application/json"), "[]"))).unwrap();
        assert_eq!(body, b"[]");
    }

    #[test]
    fn test_charset_parameter_is_ignored() {
        let outcome = Ok(response(200, Some("Application/JSON; charset=utf-8"), "{}"));
        assert!(validate(outcome).is_ok());
    }

    #[test]
    fn test_transport_error_first() {
        let err = validate(Err("dns lookup failed".into())).unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
        assert!(err.to_string().contains("dns lookup failed"));
    }

    #[test]
    fn test_status_checked_before_content_type() {
        let err = validate(Ok(response(503, Some("text/html"), "<html/>"))).unwrap_err();
        assert!(matches!(err, FetchError::HttpStatus { status_code: 503 }));
    }

    #[test]
    fn test_not_found_with_json_body() {
        let body = r#"{"message":"Not Found","documentation_url":"https://docs.github.com"}"#;
        let err = validate(Ok(response(404, Some("application/json"), body))).unwrap_err();
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn test_status_range_bounds() {
        assert!(validate(Ok(response(299, Some("application/json"), "[]"))).is_ok());
        assert!(matches!(
            validate(Ok(response(300, Some("application/json"), "[]"))),
            Err(FetchError::HttpStatus { status_code: 300 })
        ));
        assert!(matches!(
            validate(Ok(response(199, Some("application/json"), "[]"))),
            Err(FetchError::HttpStatus { status_code: 199 })
        ));
    }

    #[test]
    fn test_html_is_unsupported() {
        let err = validate(Ok(response(200, Some("text/html; charset=utf-8"), ""))).unwrap_err();
        match err {
            FetchError::UnsupportedContentType { content_type } => {
                assert_eq!(content_type.as_deref(), Some("text/html"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_content_type() {
        let err = validate(Ok(response(200, None, "[]"))).unwrap_err();
        assert!(matches!(
            err,
            FetchError::UnsupportedContentType { content_type: None }
        ));
    }
}
