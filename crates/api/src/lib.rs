// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Swap Details API Server Implementation
//!
//! This crate provides the HTTP server for the swap details service, built with Axum.
//! Requests are validated into typed swap details, persisted through a
//! [`swap_store::SwapDetailsStore`], and every persistence failure is normalized into a
//! stable `{status, reason, message}` triple before it reaches the client or the log.
//!
//! # Module Structure
//!
//! - [`config`]: Server configuration and environment management with hierarchical loading
//! - [`error`]: Server errors and persistence error normalization
//! - [`validation`]: Payload validation with field aliases and user-facing messages
//! - [`params`]: Query parameter extraction into typed filters
//! - [`extractors`]: Request body extraction tolerant of empty bodies
//! - [`logging`]: Event log collaborator used by the swap handlers
//! - [`metrics`]: Prometheus request and store-call metrics
//! - [`swaps`]: The four swap detail operations and their response shapes
//! - [`state`]: Shared application state and health probes
//! - [`server`]: Server lifecycle and coordinated shutdown
//! - [`routes`]: Route table and axum handler adapters
//! - [`openapi`] / [`docs`]: `OpenAPI` document and Swagger UI

pub mod config;
pub mod docs;
pub mod error;
pub mod extractors;
pub mod logging;
pub mod metrics;
pub mod openapi;
pub mod params;
pub mod routes;
pub mod server;
pub mod state;
pub mod swaps;
pub mod validation;

pub use config::{Environment, ServerConfig};
pub use error::{NormalizedError, ServerError, ServerResult, normalize};
pub use extractors::MaybeJson;
pub use logging::{EventLog, LogEntry, TracingEventLog};
pub use params::{ExtractError, extract_query_params, extract_query_params_strict};
pub use server::{Server, ShutdownConfig};
pub use state::{HealthCheck, ReadinessCheck, ServerState};
pub use swaps::{HandlerResponse, SwapDetailsHandlers};
pub use validation::{ValidationError, validate_new_swap_detail, validate_swap_detail_patch};
