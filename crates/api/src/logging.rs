// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Structured event log used by the swap detail handlers

use serde::Serialize;
use swap_store::StoreError;
use tracing::{error, info};

/// Context attached to a handler log record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Human-readable message
    pub message: String,
    /// Emitting handler and operation, as `<handler> >> <operation>`
    pub source: String,
    /// HTTP status associated with the record
    pub status_code: u16,
    /// Machine-readable reason, present on error records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_code: Option<String>,
}

/// Sink for handler log records
///
/// Calls are fire-and-forget; an implementation must not fail the request.
#[cfg_attr(test, mockall::automock)]
pub trait EventLog: Send + Sync {
    /// Record the receipt of a request
    fn log_info(&self, entry: &LogEntry);

    /// Record a persistence failure
    fn log_error(&self, error: &StoreError, entry: &LogEntry);
}

/// [`EventLog`] that writes through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventLog;

impl EventLog for TracingEventLog {
    fn log_info(&self, entry: &LogEntry) {
        info!(
            source = %entry.source,
            status_code = entry.status_code,
            "{}",
            entry.message
        );
    }

    fn log_error(&self, err: &StoreError, entry: &LogEntry) {
        let detail = match err {
            StoreError::Unknown { detail } => detail.as_deref(),
            _ => None,
        };
        error!(
            source = %entry.source,
            status_code = entry.status_code,
            reason_code = entry.reason_code.as_deref().unwrap_or_default(),
            error = %err,
            detail,
            "{}",
            entry.message
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_serializes_camel_case() {
        let entry = LogEntry {
            message: "Failed to delete swap detail.".to_string(),
            source: "SwapDetailsHandlers >> deleteSwapDetail".to_string(),
            status_code: 500,
            reason_code: Some("UNKNOWN_REASON".to_string()),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["statusCode"], 500);
        assert_eq!(json["reasonCode"], "UNKNOWN_REASON");

        let info = LogEntry {
            reason_code: None,
            ..entry
        };
        let json = serde_json::to_value(&info).unwrap();
        assert!(json.get("reasonCode").is_none());
    }

    #[test]
    fn tracing_log_does_not_panic_without_subscriber() {
        let entry = LogEntry {
            message: "Request received".to_string(),
            source: "test >> op".to_string(),
            status_code: 200,
            reason_code: None,
        };
        TracingEventLog.log_info(&entry);
        TracingEventLog.log_error(&StoreError::unknown(Some("opaque".to_string())), &entry);
    }
}
