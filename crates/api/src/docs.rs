// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! `OpenAPI` document definition

use serde::Serialize;
use shared_types::SwapDetail;
use utoipa::{OpenApi, ToSchema};

use crate::{
    routes::handlers,
    state::{HealthCheck, ReadinessCheck, ReadinessDetails},
};

/// `OpenAPI` document for the swap details service
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Swap Details API",
        description = "CRUD service for swap details with health probes"
    ),
    paths(
        handlers::health_handler,
        handlers::readiness_handler,
        handlers::create_swap_handler,
        handlers::read_swaps_handler,
        handlers::update_swap_handler,
        handlers::delete_swap_handler,
    ),
    components(schemas(
        HealthCheck,
        ReadinessCheck,
        ReadinessDetails,
        shared_types::NewSwapDetail,
        shared_types::SwapDetail,
        shared_types::SwapDetailPatch,
        MessageBody,
        SwapDetailEnvelope,
        FailureBody,
    )),
    tags(
        (name = "health", description = "Liveness and readiness probes"),
        (name = "swaps", description = "Swap detail resource")
    )
)]
pub struct ApiDoc;

/// Body carrying only a message
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageBody {
    /// Outcome or validation message
    #[schema(example = "SwapCd is required")]
    pub message: String,
}

/// Successful write with the stored record
#[derive(Debug, Serialize, ToSchema)]
pub struct SwapDetailEnvelope {
    /// Outcome message
    #[schema(example = "Swap details added successfully.")]
    pub message: String,
    /// Stored record
    pub data: SwapDetail,
}

/// Persistence failure
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FailureBody {
    /// Operation-level failure message
    #[schema(example = "Failed to add swap details.")]
    pub message: String,
    /// Message of the underlying failure
    #[schema(example = "Database connection failed")]
    pub error: String,
    /// Machine-readable reason
    #[schema(example = "UNKNOWN_REASON")]
    pub reason_code: String,
}
