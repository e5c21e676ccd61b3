// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Routes module
//!
//! This module provides route configuration for the swap details server.

pub mod handlers;

use axum::{Router, routing::get};
use handlers::{
    create_swap_handler, delete_swap_handler, delete_swap_without_id_handler, health_handler,
    read_swaps_handler, readiness_handler, update_swap_handler, update_swap_without_id_handler,
};

use crate::{
    metrics::metrics_handler,
    openapi::{openapi_spec, swagger_ui},
    state::ServerState,
};

/// Create application routes
///
/// `/swaps/` without an identifier is routed explicitly so a missing `swapCd` is
/// answered with the resource's own 400 message instead of a bare 404.
pub fn create_routes() -> Router<ServerState> {
    let health_routes = Router::new()
        .route("/health", get(health_handler))
        .route("/health/ready", get(readiness_handler));

    let ops_routes = Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/api-doc/openapi.json", get(openapi_spec))
        .route("/swagger-ui", get(swagger_ui));

    let swap_routes = Router::new()
        .route(
            "/swaps",
            get(read_swaps_handler).post(create_swap_handler),
        )
        .route(
            "/swaps/",
            get(read_swaps_handler)
                .put(update_swap_without_id_handler)
                .patch(update_swap_without_id_handler)
                .delete(delete_swap_without_id_handler),
        )
        .route(
            "/swaps/{swap_cd}",
            axum::routing::put(update_swap_handler)
                .patch(update_swap_handler)
                .delete(delete_swap_handler),
        );

    Router::new()
        .merge(health_routes)
        .merge(ops_routes)
        .merge(swap_routes)
}
