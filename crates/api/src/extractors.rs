// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Request body extraction
//!
//! Swap payloads are validated field by field after extraction, so the body is read
//! as an untyped JSON value. An empty body is not an error here: the handlers decide
//! whether a missing body is acceptable and which message to answer with.

use axum::extract::{FromRequest, Request};
use serde_json::Value;

use crate::error::ServerError;

mod error_hints {
    pub const MISSING_COMMA: &str =
        "check for missing or extra commas between object properties or array elements";
    pub const MISSING_BRACE: &str = "check for missing closing brace '}' for JSON object";
    pub const MISSING_BRACKET: &str = "check for missing closing bracket ']' for JSON array";
    pub const MISSING_QUOTES: &str =
        "check for missing or improperly escaped quotes around string values";
    pub const CONTROL_CHARS: &str = "JSON contains invalid control characters that must be escaped";
    pub const EXPECTED_VALUE: &str =
        "expected a valid JSON value (string, number, boolean, null, object, or array)";
    pub const DEFAULT_SYNTAX: &str = "check JSON formatting and structure";
    pub const TRUNCATED_JSON: &str =
        "unexpected end of JSON input, request appears to be truncated";
}

const MAX_JSON_PAYLOAD_SIZE: usize = 1024 * 1024; // 1MB limit

/// Optional JSON body
///
/// `None` when the request carries no body at all.
#[derive(Debug)]
pub struct MaybeJson(pub Option<Value>);

impl<S> FromRequest<S> for MaybeJson
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);

        let bytes = axum::body::Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ServerError::JsonError {
                message: format!("failed to read request body: {rejection}"),
            })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(None));
        }

        if let Some(content_type) = content_type
            && !content_type.starts_with("application/json")
        {
            return Err(ServerError::JsonError {
                message: format!(
                    "invalid content-type: expected 'application/json', got '{content_type}'"
                ),
            });
        }

        if bytes.len() > MAX_JSON_PAYLOAD_SIZE {
            return Err(ServerError::JsonError {
                message: format!(
                    "request body too large: {} bytes (max: {} bytes)",
                    bytes.len(),
                    MAX_JSON_PAYLOAD_SIZE
                ),
            });
        }

        serde_json::from_slice::<Value>(&bytes)
            .map(|value| Self(Some(value)))
            .map_err(|err| ServerError::JsonError {
                message: describe_parse_error(&err),
            })
    }
}

fn describe_parse_error(err: &serde_json::Error) -> String {
    if err.is_eof() {
        error_hints::TRUNCATED_JSON.to_string()
    } else if err.is_syntax() {
        format!(
            "invalid JSON syntax at line {}, column {}: {}",
            err.line(),
            err.column(),
            get_json_syntax_hint(err)
        )
    } else {
        format!("JSON parsing error: {err}")
    }
}

/// Provides helpful hints for JSON syntax errors
fn get_json_syntax_hint(err: &serde_json::Error) -> &'static str {
    let err_msg = err.to_string();

    if err_msg.contains("expected ','") || err_msg.contains("trailing comma") {
        error_hints::MISSING_COMMA
    } else if err_msg.contains("expected '}'") {
        error_hints::MISSING_BRACE
    } else if err_msg.contains("expected ']'") {
        error_hints::MISSING_BRACKET
    } else if err_msg.contains("expected '\"'") {
        error_hints::MISSING_QUOTES
    } else if err_msg.contains("control character") {
        error_hints::CONTROL_CHARS
    } else if err_msg.contains("expected value") {
        error_hints::EXPECTED_VALUE
    } else {
        error_hints::DEFAULT_SYNTAX
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{HeaderValue, Method},
    };
    use serde_json::json;

    use super::*;

    fn create_request(body: &str) -> Request {
        let mut req = Request::builder()
            .method(Method::POST)
            .uri("/swaps")
            .body(Body::from(body.to_string()))
            .unwrap();

        req.headers_mut()
            .insert("content-type", HeaderValue::from_static("application/json"));

        req
    }

    #[tokio::test]
    async fn object_body() {
        let req = create_request(r#"{"swapCd": 6501, "channel": "offline"}"#);
        let MaybeJson(body) = MaybeJson::from_request(req, &()).await.unwrap();
        assert_eq!(body, Some(json!({"swapCd": 6501, "channel": "offline"})));
    }

    #[tokio::test]
    async fn empty_body_is_none() {
        let MaybeJson(body) = MaybeJson::from_request(create_request(""), &())
            .await
            .unwrap();
        assert_eq!(body, None);

        let MaybeJson(body) = MaybeJson::from_request(create_request("  \n"), &())
            .await
            .unwrap();
        assert_eq!(body, None);
    }

    #[tokio::test]
    async fn truncated_json() {
        let req = create_request(r#"{"swapCd": 6501"#);
        match MaybeJson::from_request(req, &()).await.unwrap_err() {
            ServerError::JsonError { message } => {
                assert!(message.contains("unexpected end of JSON input"));
            }
            other => panic!("expected JsonError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn syntax_error_with_comma() {
        let req = create_request(r#"{"swapCd": 6501,, "term": 15}"#);
        match MaybeJson::from_request(req, &()).await.unwrap_err() {
            ServerError::JsonError { message } => {
                assert!(message.contains("invalid JSON syntax"));
                assert!(message.contains("line 1"));
            }
            other => panic!("expected JsonError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn large_payload_rejection() {
        let large_body = format!(r#"{{"brand": "{}"}}"#, "x".repeat(MAX_JSON_PAYLOAD_SIZE));
        match MaybeJson::from_request(create_request(&large_body), &())
            .await
            .unwrap_err()
        {
            ServerError::JsonError { message } => {
                assert!(message.contains("request body too large"));
            }
            other => panic!("expected JsonError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_content_type() {
        let mut req = Request::builder()
            .method(Method::POST)
            .uri("/swaps")
            .body(Body::from(r#"{"swapCd": 1}"#))
            .unwrap();
        req.headers_mut()
            .insert("content-type", HeaderValue::from_static("text/plain"));

        match MaybeJson::from_request(req, &()).await.unwrap_err() {
            ServerError::JsonError { message } => {
                assert!(message.contains("invalid content-type"));
                assert!(message.contains("text/plain"));
            }
            other => panic!("expected JsonError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unicode_handling() {
        let req = create_request(r#"{"channel": "オフライン 🦀"}"#);
        let MaybeJson(body) = MaybeJson::from_request(req, &()).await.unwrap();
        assert_eq!(body, Some(json!({"channel": "オフライン 🦀"})));
    }
}
