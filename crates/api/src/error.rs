// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error handling module
//!
//! Two concerns live here:
//!
//! - [`ServerError`]: lifecycle and transport failures of the server itself, rendered as
//!   `{message, status}` when they reach a client
//! - [`normalize`]: the single total mapping from a persistence failure to the
//!   `(statusCode, reasonCode, message)` triple used in responses and error logs

use std::net::SocketAddr;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use swap_store::StoreError;
use thiserror::Error;

/// Reason code used when a failure names none
pub const UNKNOWN_REASON: &str = "UNKNOWN_REASON";

/// Message returned when a lookup matches nothing; always answered with 404
pub const NO_MATCHING_SWAP_DETAILS: &str = "No matching swap details found.";

/// Server lifecycle and request transport errors
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration validation errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Network binding errors
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        /// Socket address that failed to bind
        address: SocketAddr,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Server startup errors
    #[error("Server startup failed: {source}")]
    Startup {
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Server shutdown errors
    #[error("Server shutdown failed: {source}")]
    Shutdown {
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Task join errors for async operations
    #[error("Task join error: {source}")]
    TaskJoin {
        /// Underlying tokio join error
        #[source]
        source: tokio::task::JoinError,
    },

    /// Operations that exceed their time limit
    #[error("Operation timed out after {timeout_seconds} seconds")]
    Timeout {
        /// Timeout duration in seconds
        timeout_seconds: u64,
    },

    /// Request body that is not valid JSON
    #[error("Invalid JSON request: {message}")]
    JsonError {
        /// Detailed error message
        message: String,
    },
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    /// HTTP status used when this error reaches a client
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Config { .. }
            | ServerError::Bind { .. }
            | ServerError::Startup { .. }
            | ServerError::Shutdown { .. }
            | ServerError::TaskJoin { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Timeout { .. } => StatusCode::REQUEST_TIMEOUT,
            ServerError::JsonError { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(serde_json::json!({
            "message": self.to_string(),
            "status": status.as_u16()
        }));
        (status, body).into_response()
    }
}

impl From<tokio::task::JoinError> for ServerError {
    fn from(source: tokio::task::JoinError) -> Self {
        Self::TaskJoin { source }
    }
}

/// Stable description of a persistence failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedError {
    /// HTTP status to answer with
    #[serde(serialize_with = "serialize_status")]
    pub status_code: StatusCode,
    /// Machine-readable reason
    pub reason_code: String,
    /// Human-readable message
    pub message: String,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_status<S: serde::Serializer>(
    status: &StatusCode,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(status.as_u16())
}

/// Derive the response triple for a persistence failure
///
/// An explicit status override wins when it is a valid HTTP status; `NotFound`
/// maps to 404; anything else is a 500. The no-match message is a 404 whatever
/// status was derived.
pub fn normalize(error: &StoreError) -> NormalizedError {
    let message = error.to_string();

    let status_code = if message == NO_MATCHING_SWAP_DETAILS {
        StatusCode::NOT_FOUND
    } else {
        match (error, error.status_code()) {
            (_, Some(code)) => {
                StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            (StoreError::NotFound { .. }, None) => StatusCode::NOT_FOUND,
            (_, None) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    };

    NormalizedError {
        status_code,
        reason_code: error.reason_code().unwrap_or(UNKNOWN_REASON).to_string(),
        message,
    }
}
