//! Content-Type enforcement for request bodies.
//!
//! [`JsonBody`] replaces axum's `Json` extractor on write endpoints. It checks
//! the media type before reading the body, so a wrong or missing header is a
//! 415 even when the body would not parse. Parsing is left to the handler
//! ([`JsonBody::into_value`]) so it can look the target up first, and the raw
//! [`serde_json::Value`] lets field-level validation name what is wrong.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;

use crate::error::AppError;

/// The only media type accepted for request bodies.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// A request body whose `Content-Type` has been verified as JSON.
#[derive(Debug)]
pub struct JsonBody(Bytes);

impl JsonBody {
    /// Parse the body. Malformed JSON is a 400.
    pub fn into_value(self) -> Result<serde_json::Value, AppError> {
        serde_json::from_slice(&self.0)
            .map_err(|e| AppError::BadRequest(format!("Request body is not valid JSON: {e}")))
    }
}

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        check_content_type(req.headers(), JSON_MEDIA_TYPE)?;

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(format!("Could not read request body: {e}")))?;

        Ok(JsonBody(bytes))
    }
}

/// Require `Content-Type` to be `expected`, ignoring parameters such as
/// `; charset=utf-8` and letter case of the media type itself.
pub fn check_content_type(headers: &HeaderMap, expected: &str) -> Result<(), AppError> {
    let Some(value) = headers.get(CONTENT_TYPE) else {
        tracing::error!("No Content-Type specified");
        return Err(AppError::UnsupportedMediaType(format!(
            "Content-Type must be {expected}"
        )));
    };

    let media_type = value
        .to_str()
        .ok()
        .and_then(|v| v.split(';').next())
        .map(str::trim)
        .unwrap_or_default();

    if media_type.eq_ignore_ascii_case(expected) {
        return Ok(());
    }

    tracing::error!(content_type = ?value, "Invalid Content-Type");
    Err(AppError::UnsupportedMediaType(format!(
        "Content-Type must be {expected}"
    )))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use axum::http::HeaderValue;

    use super::*;

    fn headers_with(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    #[test]
    fn accepts_exact_media_type() {
        assert!(check_content_type(&headers_with("application/json"), JSON_MEDIA_TYPE).is_ok());
    }

    #[test]
    fn accepts_charset_parameter() {
        let headers = headers_with("application/json; charset=utf-8");
        assert!(check_content_type(&headers, JSON_MEDIA_TYPE).is_ok());
    }

    #[test]
    fn rejects_missing_header() {
        assert_matches!(
            check_content_type(&HeaderMap::new(), JSON_MEDIA_TYPE),
            Err(AppError::UnsupportedMediaType(_))
        );
    }

    #[test]
    fn rejects_other_media_types() {
        for content_type in ["text/html", "application/jsonp", "multipart/form-data"] {
            assert_matches!(
                check_content_type(&headers_with(content_type), JSON_MEDIA_TYPE),
                Err(AppError::UnsupportedMediaType(_))
            );
        }
    }

    #[test]
    fn into_value_parses_json() {
        let body = JsonBody(Bytes::from_static(br#"{"active": true}"#));
        assert_eq!(body.into_value().unwrap()["active"], true);
    }

    #[test]
    fn into_value_rejects_malformed_json() {
        let body = JsonBody(Bytes::from_static(b"{not json"));
        assert_matches!(body.into_value(), Err(AppError::BadRequest(_)));
    }
}
