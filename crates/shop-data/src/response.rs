//! HTTP response handling.

use crate::FetchError;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Longest body excerpt kept in an [`FetchError::Http`] message.
const ERROR_EXCERPT_LEN: usize = 200;

/// An HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: HashMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create a response with a JSON body.
    pub fn from_json<T: serde::Serialize>(status: u16, value: &T) -> Result<Self, FetchError> {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Ok(Self::new(status, headers, serde_json::to_vec(value)?))
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::Parse(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::Parse(e.to_string()))
    }

    /// Get a header value.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            let mut message = self.text().unwrap_or_else(|_| "Unknown error".to_string());
            if message.len() > ERROR_EXCERPT_LEN {
                let cut = (0..=ERROR_EXCERPT_LEN)
                    .rev()
                    .find(|i| message.is_char_boundary(*i))
                    .unwrap_or(0);
                message.truncate(cut);
            }
            Err(FetchError::Http {
                status: self.status,
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(status, HashMap::new(), body.to_vec())
    }

    // === Status Check Tests ===

    #[test]
    fn test_response_is_success() {
        assert!(make_response(200, b"").is_success());
        assert!(make_response(201, b"").is_success());
        assert!(!make_response(199, b"").is_success());
        assert!(!make_response(300, b"").is_success());
    }

    // === Body Tests ===

    #[test]
    fn test_response_json() {
        let resp = make_response(200, br#"{"id": 42, "images": []}"#);
        let value: serde_json::Value = resp.json().unwrap();
        assert_eq!(value["id"], 42);
    }

    #[test]
    fn test_response_json_invalid() {
        let resp = make_response(200, b"<html>not json</html>");
        let result: Result<serde_json::Value, _> = resp.json();
        assert!(matches!(result, Err(FetchError::Parse(_))));
    }

    #[test]
    fn test_response_text_invalid_utf8() {
        let resp = make_response(200, &[0xff, 0xfe]);
        assert!(resp.text().is_err());
    }

    #[test]
    fn test_from_json_sets_content_type() {
        let resp = Response::from_json(201, &serde_json::json!([])).unwrap();
        assert_eq!(resp.header("content-type"), Some("application/json"));
        assert_eq!(resp.body, b"[]");
    }

    // === Header Tests ===

    #[test]
    fn test_response_header_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "text/html".to_string());
        let resp = Response::new(200, headers, Vec::new());
        assert_eq!(resp.header("content-type"), Some("text/html"));
        assert_eq!(resp.header("X-Missing"), None);
    }

    // === error_for_status Tests ===

    #[test]
    fn test_response_error_for_status_success() {
        assert!(make_response(200, b"OK").error_for_status().is_ok());
    }

    #[test]
    fn test_response_error_for_status_not_found() {
        let err = make_response(404, b"Not Found").error_for_status().unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
    }

    #[test]
    fn test_response_error_message_truncated() {
        let body = "é".repeat(300);
        let err = make_response(500, body.as_bytes())
            .error_for_status()
            .unwrap_err();
        match err {
            FetchError::Http { message, .. } => assert!(message.len() <= ERROR_EXCERPT_LEN),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
