//! Normalized API error
//!
//! Built from a non-2xx response. The message always starts with
//! `api error: <status>: <METHOD> <url>` and is followed by the `message`
//! field of a JSON error body, or by the raw body when that is missing.

use reqwest::{Method, Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Error returned by the API for a non-2xx response
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl ApiError {
    /// Build an error from the parts of a failed exchange
    pub fn new(status: StatusCode, method: &Method, url: &str, body: &str) -> Self {
        Self {
            status,
            message: format_error_message(status, method, url, body),
        }
    }

    /// Build an error from a response, consuming its body
    pub async fn from_response(method: &Method, url: &Url, response: Response) -> Self {
        let status = response.status();
        // An unreadable body is reported like an empty one
        let body = response.text().await.unwrap_or_default();
        Self::new(status, method, url.as_str(), &body)
    }

    /// Numeric status code, e.g. `404`
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Status line text, e.g. `404 Not Found`, or just `599` for codes
    /// without a standard reason phrase
    pub fn status(&self) -> String {
        status_line(self.status)
    }

    /// The full derived message
    pub fn message(&self) -> &str {
        &self.message
    }
}

fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}

fn format_error_message(status: StatusCode, method: &Method, url: &str, body: &str) -> String {
    let message = format!("api error: {}: {method} {url}", status_line(status));
    if body.is_empty() {
        return message;
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) if !parsed.message.is_empty() => format!("{message}: {}", parsed.message),
        _ => format!("{message}: {body}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("", "api error: 400 Bad Request: GET https://host/path" ; "empty body")]
    #[test_case(r#"{"message":"x"}"#, "api error: 400 Bad Request: GET https://host/path: x" ; "json message")]
    #[test_case("text", "api error: 400 Bad Request: GET https://host/path: text" ; "plain text")]
    #[test_case(r#"{"message":""}"#, r#"api error: 400 Bad Request: GET https://host/path: {"message":""}"# ; "empty json message")]
    #[test_case(r#"{"error":"nope"}"#, r#"api error: 400 Bad Request: GET https://host/path: {"error":"nope"}"# ; "json without message")]
    #[test_case(r#"{"message":42}"#, r#"api error: 400 Bad Request: GET https://host/path: {"message":42}"# ; "non string message")]
    fn test_error_message(body: &str, expected: &str) {
        let err = ApiError::new(StatusCode::BAD_REQUEST, &Method::GET, "https://host/path", body);
        assert_eq!(err.to_string(), expected);
        assert_eq!(err.message(), expected);
    }

    #[test]
    fn test_status_fields() {
        let err = ApiError::new(
            StatusCode::NOT_FOUND,
            &Method::DELETE,
            "http://example.com/",
            "this is a test",
        );
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.status(), "404 Not Found");
        assert_eq!(
            err.to_string(),
            "api error: 404 Not Found: DELETE http://example.com/: this is a test"
        );
    }

    #[test]
    fn test_unknown_status_has_no_reason() {
        let err = ApiError::new(
            StatusCode::from_u16(599).unwrap(),
            &Method::GET,
            "https://host/path",
            "",
        );
        assert_eq!(err.status(), "599");
        assert_eq!(err.to_string(), "api error: 599: GET https://host/path");
    }
}
