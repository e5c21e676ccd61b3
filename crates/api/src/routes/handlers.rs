// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP request handlers module
//!
//! Thin axum adapters: each one pulls the path, query and body out of the request and
//! hands them to [`SwapDetailsHandlers`](crate::swaps::SwapDetailsHandlers), which owns
//! the response shape.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::{
    docs::{FailureBody, MessageBody, SwapDetailEnvelope},
    extractors::MaybeJson,
    state::{HealthCheck, ReadinessCheck, ServerState},
    swaps::HandlerResponse,
};

/// Health check endpoint handler
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    summary = "Liveness probe",
    description = "Returns OK whenever the process is able to answer requests.",
    responses(
        (status = 200, description = "Service is alive", body = HealthCheck)
    )
)]
pub async fn health_handler(State(state): State<ServerState>) -> Json<HealthCheck> {
    Json(state.health_check())
}

/// Readiness check endpoint handler
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    summary = "Readiness probe",
    description = "Reports whether the persistence collaborator is reachable. Always answers 200; the body carries READY or NOT_READY.",
    responses(
        (status = 200, description = "Readiness report", body = ReadinessCheck)
    )
)]
pub async fn readiness_handler(State(state): State<ServerState>) -> Json<ReadinessCheck> {
    Json(state.readiness_check().await)
}

/// Add a swap detail
#[utoipa::path(
    post,
    path = "/swaps",
    tag = "swaps",
    summary = "Add a swap detail",
    description = "Validates the payload and stores a new swap detail. `branch` and the PascalCase field names are accepted as aliases.",
    request_body = shared_types::NewSwapDetail,
    responses(
        (status = 201, description = "Swap detail stored", body = SwapDetailEnvelope),
        (status = 400, description = "Payload failed validation", body = MessageBody),
        (status = 409, description = "A swap detail with this SwapCd already exists", body = FailureBody),
        (status = 500, description = "Persistence failure", body = FailureBody)
    )
)]
pub async fn create_swap_handler(
    State(state): State<ServerState>,
    MaybeJson(body): MaybeJson,
) -> HandlerResponse {
    state.handlers().create(body).await
}

/// Find swap details
#[utoipa::path(
    get,
    path = "/swaps",
    tag = "swaps",
    summary = "Find swap details",
    description = "Returns the swap details matching every supplied filter. A filter on a single swapCd that matches one record returns that record as an object; otherwise an array is returned.",
    params(
        ("swapCd" = Option<i64>, Query, description = "Exact swap code"),
        ("brand" = Option<String>, Query, description = "Exact brand"),
        ("channel" = Option<String>, Query, description = "Exact channel"),
        ("term" = Option<i64>, Query, description = "Exact term"),
        ("startDate" = Option<String>, Query, description = "Swaps starting on or after this date"),
        ("endDate" = Option<String>, Query, description = "Swaps ending on or before this date")
    ),
    responses(
        (status = 200, description = "Matching swap details", body = Vec<shared_types::SwapDetail>),
        (status = 400, description = "Invalid query parameters (strict mode only)", body = MessageBody),
        (status = 404, description = "No matching swap details found", body = MessageBody),
        (status = 500, description = "Persistence failure", body = FailureBody)
    )
)]
pub async fn read_swaps_handler(
    State(state): State<ServerState>,
    Query(query): Query<HashMap<String, String>>,
) -> HandlerResponse {
    state.handlers().read(&query).await
}

/// Update a swap detail
#[utoipa::path(
    put,
    path = "/swaps/{swap_cd}",
    tag = "swaps",
    summary = "Update a swap detail",
    description = "Merges the supplied fields into the swap detail. The swap code itself is never changed. PATCH is accepted with the same semantics.",
    params(("swap_cd" = String, Path, description = "Swap code")),
    request_body = shared_types::SwapDetailPatch,
    responses(
        (status = 200, description = "Swap detail updated", body = SwapDetailEnvelope),
        (status = 400, description = "Missing swap code, missing data, or invalid field", body = MessageBody),
        (status = 404, description = "Swap detail not found", body = MessageBody),
        (status = 500, description = "Persistence failure", body = FailureBody)
    )
)]
pub async fn update_swap_handler(
    State(state): State<ServerState>,
    Path(swap_cd): Path<String>,
    MaybeJson(body): MaybeJson,
) -> HandlerResponse {
    state.handlers().update(Some(swap_cd), body).await
}

/// Update without a swap code in the path
pub async fn update_swap_without_id_handler(
    State(state): State<ServerState>,
    MaybeJson(body): MaybeJson,
) -> HandlerResponse {
    state.handlers().update(None, body).await
}

/// Delete a swap detail
#[utoipa::path(
    delete,
    path = "/swaps/{swap_cd}",
    tag = "swaps",
    summary = "Delete a swap detail",
    params(("swap_cd" = String, Path, description = "Swap code")),
    responses(
        (status = 200, description = "Swap detail deleted", body = MessageBody),
        (status = 400, description = "Missing or non-numeric swap code", body = MessageBody),
        (status = 404, description = "Swap detail not found", body = MessageBody),
        (status = 500, description = "Persistence failure", body = FailureBody)
    )
)]
pub async fn delete_swap_handler(
    State(state): State<ServerState>,
    Path(swap_cd): Path<String>,
) -> HandlerResponse {
    state.handlers().delete(Some(swap_cd)).await
}

/// Delete without a swap code in the path
pub async fn delete_swap_without_id_handler(State(state): State<ServerState>) -> HandlerResponse {
    state.handlers().delete(None).await
}
