// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Persistence collaborator for swap details
//!
//! This crate provides the storage abstraction consumed by the HTTP handlers. The
//! handlers never see a concrete backend: they hold an `Arc<dyn SwapDetailsStore>`
//! and every call either returns data or a [`StoreError`].
//!
//! # Core Abstractions
//!
//! - **`SwapDetailsStore` Trait**: the four CRUD operations plus a health check
//! - **`StoreError`**: tagged failure carrying optional HTTP status and reason overrides
//! - **Health Types**: `Up`, `Degraded` and `Down` statuses for readiness probes
//! - **`InMemorySwapStore`**: concurrent reference adapter backed by `DashMap`
//!
//! Enable the `mocks` feature to get a `mockall`-generated `MockSwapDetailsStore`.

use async_trait::async_trait;
use shared_types::{NewSwapDetail, SwapDetail, SwapDetailPatch, SwapFilters};
use thiserror::Error;

pub mod health;
pub mod memory;

pub use health::*;
pub use memory::InMemorySwapStore;

/// Storage interface for swap details
///
/// Implementations own their concurrency control; callers treat every method as a
/// single atomic operation on one record key.
#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait SwapDetailsStore: Send + Sync {
    /// Persist a new swap detail and return it with its assigned identifier
    async fn add(&self, detail: NewSwapDetail) -> Result<SwapDetail, StoreError>;

    /// Return every swap detail matching the filters
    async fn query(&self, filters: &SwapFilters) -> Result<Vec<SwapDetail>, StoreError>;

    /// Merge a partial update into the record keyed by `swap_cd`
    ///
    /// Returns `Ok(None)` when no such record exists.
    async fn update(
        &self,
        swap_cd: i64,
        patch: SwapDetailPatch,
    ) -> Result<Option<SwapDetail>, StoreError>;

    /// Hard-delete the record keyed by `swap_cd`
    ///
    /// Returns `Ok(false)` when no such record exists.
    async fn remove(&self, swap_cd: i64) -> Result<bool, StoreError>;

    /// Check whether the backend is reachable
    async fn health_check(&self) -> Result<HealthCheckResult, StoreError>;

    /// Get the name/identifier of this store
    fn name(&self) -> &'static str;
}

/// Failures raised by a persistence collaborator
///
/// `Rejected` is the explicit form of an error that carries its own HTTP status and
/// reason code; `Unknown` stands for a failure without any message of its own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The addressed record does not exist
    #[error("{message}")]
    NotFound {
        /// Error message
        message: String,
    },

    /// The backend failed to execute the operation
    #[error("{message}")]
    Backend {
        /// Error message
        message: String,
    },

    /// The backend refused the operation, optionally naming the status and reason
    #[error("{message}")]
    Rejected {
        /// Error message
        message: String,
        /// HTTP status override
        status_code: Option<u16>,
        /// Machine-readable reason override
        reason_code: Option<String>,
    },

    /// A failure that carries no message
    #[error("Unknown error.")]
    Unknown {
        /// Diagnostic detail for logs, never surfaced to clients
        detail: Option<String>,
    },
}

impl StoreError {
    /// Create a not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a backend failure
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Create a rejection without overrides
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
            status_code: None,
            reason_code: None,
        }
    }

    /// Create a failure without a message
    pub fn unknown(detail: Option<String>) -> Self {
        Self::Unknown { detail }
    }

    /// Attach an HTTP status override, turning the error into a rejection
    #[must_use]
    pub fn with_status_code(self, status: u16) -> Self {
        match self {
            Self::Rejected {
                message,
                reason_code,
                ..
            } => Self::Rejected {
                message,
                status_code: Some(status),
                reason_code,
            },
            other => Self::Rejected {
                message: other.to_string(),
                status_code: Some(status),
                reason_code: None,
            },
        }
    }

    /// Attach a reason code override, turning the error into a rejection
    #[must_use]
    pub fn with_reason_code(self, reason: impl Into<String>) -> Self {
        match self {
            Self::Rejected {
                message,
                status_code,
                ..
            } => Self::Rejected {
                message,
                status_code,
                reason_code: Some(reason.into()),
            },
            other => Self::Rejected {
                message: other.to_string(),
                status_code: None,
                reason_code: Some(reason.into()),
            },
        }
    }

    /// The HTTP status override carried by the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Rejected { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// The reason code override carried by the error, if any
    pub fn reason_code(&self) -> Option<&str> {
        match self {
            Self::Rejected { reason_code, .. } => reason_code.as_deref(),
            _ => None,
        }
    }

    /// The error's own message; `None` for [`StoreError::Unknown`]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::NotFound { message }
            | Self::Backend { message }
            | Self::Rejected { message, .. } => Some(message),
            Self::Unknown { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_accumulate_on_rejections() {
        let error = StoreError::rejected("conflict")
            .with_status_code(409)
            .with_reason_code("DATA_CONFLICT");

        assert_eq!(error.status_code(), Some(409));
        assert_eq!(error.reason_code(), Some("DATA_CONFLICT"));
        assert_eq!(error.message(), Some("conflict"));
    }

    #[test]
    fn overrides_keep_backend_message() {
        let error = StoreError::backend("Custom error").with_status_code(403);
        assert_eq!(error.to_string(), "Custom error");
        assert_eq!(error.status_code(), Some(403));
        assert_eq!(error.reason_code(), None);
    }

    #[test]
    fn plain_errors_carry_no_overrides() {
        let error = StoreError::backend("Database connection failed");
        assert_eq!(error.status_code(), None);
        assert_eq!(error.reason_code(), None);
        assert_eq!(error.to_string(), "Database connection failed");
    }

    #[test]
    fn unknown_has_no_message() {
        let error = StoreError::unknown(Some("opaque payload".to_string()));
        assert_eq!(error.message(), None);
        assert_eq!(error.to_string(), "Unknown error.");
    }
}
