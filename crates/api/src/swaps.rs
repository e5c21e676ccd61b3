// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Swap detail resource handlers
//!
//! [`SwapDetailsHandlers`] sequences every request the same way: log receipt, extract,
//! validate, make one persistence call, then shape the response. The handlers are
//! independent of axum's request types so they can be driven directly in tests.
//!
//! Failures from the store are normalized once and error-logged once. Validation
//! failures short-circuit with a 400 and no error record.

use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    sync::Arc,
    time::Instant,
};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value, json};
use shared_types::{SwapDetail, SwapFilters};
use swap_store::{StoreError, SwapDetailsStore};

use crate::{
    error::{NO_MATCHING_SWAP_DETAILS, normalize},
    logging::{EventLog, LogEntry},
    metrics,
    params::{extract_query_params, extract_query_params_strict},
    validation::{
        Field, parse_integer_str, validate_new_swap_detail, validate_swap_detail_patch,
    },
};

const HANDLER: &str = "SwapDetailsHandlers";

/// Status and JSON body produced by a handler
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResponse {
    /// HTTP status
    pub status: StatusCode,
    /// JSON body
    pub body: Value,
}

impl HandlerResponse {
    fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, json!({ "message": message.into() }))
    }
}

impl IntoResponse for HandlerResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl Operation {
    fn name(self) -> &'static str {
        match self {
            Operation::Create => "addSwapDetail",
            Operation::Read => "getSwapDetails",
            Operation::Update => "updateSwapDetail",
            Operation::Delete => "deleteSwapDetail",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    fn success_status(self) -> StatusCode {
        match self {
            Operation::Create => StatusCode::CREATED,
            _ => StatusCode::OK,
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            Operation::Create => "Failed to add swap details.",
            Operation::Read => "Internal server error occurred while fetching swap details.",
            Operation::Update => "Failed to update swap detail.",
            Operation::Delete => "Failed to delete swap detail.",
        }
    }

    fn source(self) -> String {
        format!("{HANDLER} >> {}", self.name())
    }
}

/// Create, read, update and delete handlers for swap details
#[derive(Clone)]
pub struct SwapDetailsHandlers {
    store: Arc<dyn SwapDetailsStore>,
    log: Arc<dyn EventLog>,
    strict_query_params: bool,
}

impl fmt::Debug for SwapDetailsHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwapDetailsHandlers")
            .field("store", &self.store.name())
            .field("strict_query_params", &self.strict_query_params)
            .finish_non_exhaustive()
    }
}

impl SwapDetailsHandlers {
    /// Create handlers over a persistence collaborator and an event log
    pub fn new(store: Arc<dyn SwapDetailsStore>, log: Arc<dyn EventLog>) -> Self {
        Self {
            store,
            log,
            strict_query_params: false,
        }
    }

    /// Reject unknown or unparsable query parameters on reads
    #[must_use]
    pub fn with_strict_query_params(mut self, strict: bool) -> Self {
        self.strict_query_params = strict;
        self
    }

    /// The persistence collaborator behind these handlers
    pub fn store(&self) -> &Arc<dyn SwapDetailsStore> {
        &self.store
    }

    /// Validate and persist a new swap detail
    pub async fn create(&self, body: Option<Value>) -> HandlerResponse {
        let response = self.create_inner(body).await;
        metrics::record_request(Operation::Create.label(), response.status);
        response
    }

    /// Find swap details matching the query parameters
    pub async fn read(&self, raw_query: &HashMap<String, String>) -> HandlerResponse {
        let response = self.read_inner(raw_query).await;
        metrics::record_request(Operation::Read.label(), response.status);
        response
    }

    /// Apply a partial update to the swap detail identified by `swap_cd`
    pub async fn update(&self, swap_cd: Option<String>, body: Option<Value>) -> HandlerResponse {
        let response = self.update_inner(swap_cd, body).await;
        metrics::record_request(Operation::Update.label(), response.status);
        response
    }

    /// Delete the swap detail identified by `swap_cd`
    pub async fn delete(&self, swap_cd: Option<String>) -> HandlerResponse {
        let response = self.delete_inner(swap_cd).await;
        metrics::record_request(Operation::Delete.label(), response.status);
        response
    }

    async fn create_inner(&self, body: Option<Value>) -> HandlerResponse {
        let op = Operation::Create;
        let echo = echo_body(body.as_ref());
        self.received(op, format!("Request received for {} with body: {echo}", op.name()));

        let input = match body {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        let detail = match validate_new_swap_detail(&input) {
            Ok(detail) => detail,
            Err(err) => return HandlerResponse::message(StatusCode::BAD_REQUEST, err.message()),
        };

        let started = Instant::now();
        let result = self.store.add(detail).await;
        observe(op, started, result.is_ok());

        match result {
            Ok(stored) => HandlerResponse::new(
                StatusCode::CREATED,
                json!({ "message": "Swap details added successfully.", "data": stored }),
            ),
            Err(err) => self.failure(op, &err, &echo),
        }
    }

    async fn read_inner(&self, raw_query: &HashMap<String, String>) -> HandlerResponse {
        let op = Operation::Read;
        let echo = echo_query(raw_query);
        self.received(
            op,
            format!("Request received for {} with query params: {echo}", op.name()),
        );

        let filters = if self.strict_query_params {
            match extract_query_params_strict(raw_query) {
                Ok(filters) => filters,
                Err(err) => {
                    return HandlerResponse::message(StatusCode::BAD_REQUEST, err.to_string());
                }
            }
        } else {
            extract_query_params(raw_query)
        };

        let started = Instant::now();
        let result = self.store.query(&filters).await;
        observe(op, started, result.is_ok());

        match result {
            Ok(found) if found.is_empty() => {
                HandlerResponse::message(StatusCode::NOT_FOUND, NO_MATCHING_SWAP_DETAILS)
            }
            Ok(found) => HandlerResponse::new(StatusCode::OK, read_body(&filters, found)),
            Err(err) => self.failure(op, &err, &echo),
        }
    }

    async fn update_inner(&self, swap_cd: Option<String>, body: Option<Value>) -> HandlerResponse {
        let op = Operation::Update;
        let echo = echo_body(body.as_ref());
        self.received(
            op,
            format!(
                "Request received for {} with SwapCd: {} and body: {echo}",
                op.name(),
                swap_cd.as_deref().unwrap_or_default()
            ),
        );

        let Some(raw_id) = present(swap_cd.as_deref()) else {
            return HandlerResponse::message(
                StatusCode::BAD_REQUEST,
                "SwapCd is required to update a swap detail.",
            );
        };
        let Some(Value::Object(input)) = body else {
            return updated_data_required();
        };
        if input.is_empty() {
            return updated_data_required();
        }
        let swap_cd = match parse_swap_cd(raw_id) {
            Ok(swap_cd) => swap_cd,
            Err(response) => return response,
        };
        let patch = match validate_swap_detail_patch(&input) {
            Ok(patch) if patch.is_empty() => return updated_data_required(),
            Ok(patch) => patch,
            Err(err) => return HandlerResponse::message(StatusCode::BAD_REQUEST, err.message()),
        };

        let started = Instant::now();
        let result = self.store.update(swap_cd, patch).await;
        observe(op, started, result.is_ok());

        match result {
            Ok(Some(updated)) => HandlerResponse::new(
                StatusCode::OK,
                json!({
                    "message": format!("Swap detail with SwapCd {swap_cd} updated successfully."),
                    "data": updated
                }),
            ),
            Ok(None) => HandlerResponse::message(
                StatusCode::NOT_FOUND,
                format!("Swap detail with SwapCd {swap_cd} not found."),
            ),
            Err(err) => self.failure(op, &err, &format!("{swap_cd} {echo}")),
        }
    }

    async fn delete_inner(&self, swap_cd: Option<String>) -> HandlerResponse {
        let op = Operation::Delete;
        self.received(
            op,
            format!(
                "Request received for {} with SwapCd: {}",
                op.name(),
                swap_cd.as_deref().unwrap_or_default()
            ),
        );

        let Some(raw_id) = present(swap_cd.as_deref()) else {
            return HandlerResponse::message(
                StatusCode::BAD_REQUEST,
                "SwapCd is required to delete a swap detail.",
            );
        };
        let swap_cd = match parse_swap_cd(raw_id) {
            Ok(swap_cd) => swap_cd,
            Err(response) => return response,
        };

        let started = Instant::now();
        let result = self.store.remove(swap_cd).await;
        observe(op, started, result.is_ok());

        match result {
            Ok(true) => HandlerResponse::message(
                StatusCode::OK,
                format!("Swap detail with SwapCd {swap_cd} deleted successfully."),
            ),
            Ok(false) => HandlerResponse::message(
                StatusCode::NOT_FOUND,
                format!("Swap detail with SwapCd {swap_cd} not found in the table."),
            ),
            Err(err) => self.failure(op, &err, &swap_cd.to_string()),
        }
    }

    fn received(&self, op: Operation, message: String) {
        self.log.log_info(&LogEntry {
            message,
            source: op.source(),
            status_code: op.success_status().as_u16(),
            reason_code: None,
        });
    }

    fn failure(&self, op: Operation, err: &StoreError, input: &str) -> HandlerResponse {
        let normalized = normalize(err);
        self.log.log_error(
            err,
            &LogEntry {
                message: format!("Error in {} with input: {input}", op.name()),
                source: op.source(),
                status_code: normalized.status_code.as_u16(),
                reason_code: Some(normalized.reason_code.clone()),
            },
        );

        if normalized.status_code == StatusCode::NOT_FOUND {
            return HandlerResponse::message(StatusCode::NOT_FOUND, normalized.message);
        }

        HandlerResponse::new(
            normalized.status_code,
            json!({
                "message": op.failure_message(),
                "error": normalized.message,
                "reasonCode": normalized.reason_code
            }),
        )
    }
}

fn updated_data_required() -> HandlerResponse {
    HandlerResponse::message(
        StatusCode::BAD_REQUEST,
        "Updated data is required to update a swap detail.",
    )
}

fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|id| !id.is_empty())
}

fn parse_swap_cd(raw: &str) -> Result<i64, HandlerResponse> {
    parse_integer_str(Field::SwapCd, raw)
        .map_err(|err| HandlerResponse::message(StatusCode::BAD_REQUEST, err.message()))
}

/// A single object when the filter pins one `swapCd` and one record matched
fn read_body(filters: &SwapFilters, mut found: Vec<SwapDetail>) -> Value {
    if filters.pinned_swap_cd().is_some()
        && found.len() == 1
        && let Some(only) = found.pop()
    {
        return json!(only);
    }
    json!(found)
}

fn echo_body(body: Option<&Value>) -> String {
    body.map_or_else(|| "{}".to_string(), Value::to_string)
}

fn echo_query(raw: &HashMap<String, String>) -> String {
    let ordered: BTreeMap<_, _> = raw.iter().collect();
    json!(ordered).to_string()
}

fn observe(op: Operation, started: Instant, ok: bool) {
    metrics::observe_store_call(
        op.label(),
        if ok { "success" } else { "error" },
        started.elapsed().as_secs_f64(),
    );
}
