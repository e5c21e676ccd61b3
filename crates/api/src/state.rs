// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Server state management module
//!
//! This module provides shared application state for the swap details server,
//! including configuration, the resource handlers, and coordinated cancellation.

use serde::{Deserialize, Serialize};
use swap_store::HealthStatus;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use utoipa::ToSchema;

use crate::{config::ServerConfig, swaps::SwapDetailsHandlers};

/// Shared application state with cancellation token support
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Server configuration
    config: ServerConfig,
    /// Swap detail handlers wired to the persistence and logging collaborators
    handlers: SwapDetailsHandlers,
    /// Cancellation token for coordinated shutdown
    pub cancellation_token: CancellationToken,
}

impl ServerState {
    /// Create new server state
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `handlers` - Swap detail handlers
    /// * `cancellation_token` - Token for coordinated cancellation
    pub fn new(
        config: ServerConfig,
        handlers: SwapDetailsHandlers,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            config,
            handlers,
            cancellation_token,
        }
    }

    /// Server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Swap detail handlers
    pub fn handlers(&self) -> &SwapDetailsHandlers {
        &self.handlers
    }

    /// Liveness report; answering at all means the process is up
    pub fn health_check(&self) -> HealthCheck {
        HealthCheck {
            status: "OK".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Readiness report based on the persistence collaborator's probe
    pub async fn readiness_check(&self) -> ReadinessCheck {
        let store = self.handlers.store();
        let status = match store.health_check().await {
            Ok(result) => result.status,
            Err(err) => {
                warn!(store = store.name(), error = %err, "Store health probe failed");
                HealthStatus::Down {
                    reason: err.to_string(),
                }
            }
        };

        if !status.is_available() {
            warn!(
                store = store.name(),
                reason = status.description(),
                "Store is not ready"
            );
        }

        ReadinessCheck {
            status: if status.is_available() {
                "READY"
            } else {
                "NOT_READY"
            }
            .to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            details: ReadinessDetails {
                database: status.connection_label().to_string(),
            },
        }
    }
}

/// Liveness response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthCheck {
    /// Always `OK`
    #[schema(example = "OK")]
    pub status: String,
    /// RFC 3339 timestamp of the check
    pub timestamp: String,
}

/// Readiness response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadinessCheck {
    /// `READY` or `NOT_READY`
    #[schema(example = "READY")]
    pub status: String,
    /// RFC 3339 timestamp of the check
    pub timestamp: String,
    /// Dependency states
    pub details: ReadinessDetails,
}

/// Dependency states reported by the readiness probe
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadinessDetails {
    /// `connected` or `disconnected`
    #[schema(example = "connected")]
    pub database: String,
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use swap_store::{InMemorySwapStore, MockSwapDetailsStore, StoreError};

    use super::*;
    use crate::logging::TracingEventLog;

    fn state_with(store: Arc<dyn swap_store::SwapDetailsStore>) -> ServerState {
        let handlers = SwapDetailsHandlers::new(store, Arc::new(TracingEventLog));
        ServerState::new(ServerConfig::default(), handlers, CancellationToken::new())
    }

    #[test]
    fn server_state_with_cancellation_token() {
        let token = CancellationToken::new();
        let handlers = SwapDetailsHandlers::new(
            Arc::new(InMemorySwapStore::new()),
            Arc::new(TracingEventLog),
        );
        let state = ServerState::new(ServerConfig::default(), handlers, token.clone());

        assert!(!state.cancellation_token.is_cancelled());

        token.cancel();
        assert!(state.cancellation_token.is_cancelled());
    }

    #[test]
    fn health_is_ok() {
        let state = state_with(Arc::new(InMemorySwapStore::new()));
        assert_eq!(state.health_check().status, "OK");
    }

    #[tokio::test]
    async fn readiness_follows_store() {
        let store = Arc::new(InMemorySwapStore::new());
        let state = state_with(store.clone());

        let ready = state.readiness_check().await;
        assert_eq!(ready.status, "READY");
        assert_eq!(ready.details.database, "connected");

        store.set_connected(false);
        let not_ready = state.readiness_check().await;
        assert_eq!(not_ready.status, "NOT_READY");
        assert_eq!(not_ready.details.database, "disconnected");
    }

    #[tokio::test]
    async fn failed_probe_is_not_ready() {
        let mut store = MockSwapDetailsStore::new();
        store
            .expect_health_check()
            .times(1)
            .returning(|| Err(StoreError::backend("connection refused")));
        store.expect_name().return_const("mock");

        let state = state_with(Arc::new(store));
        let report = state.readiness_check().await;
        assert_eq!(report.status, "NOT_READY");
        assert_eq!(report.details.database, "disconnected");
    }
}
