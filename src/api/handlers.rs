//! Endpoint handlers.
//!
//! Each handler parses its query, runs the timed computation and wraps the
//! result with the service identity. Only the computation itself is timed.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::api::error::ApiError;
use crate::api::params::{COMPUTE_N, PAYLOAD_SIZE};
use crate::core::{build_payload, count_primes, timed};
use crate::domain::model::{
    ComputeResponse, ComputeResult, HealthResponse, PayloadResponse, ServiceIdentity,
};

/// Shared, read-only state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub identity: Arc<ServiceIdentity>,
}

impl AppState {
    pub fn new(identity: ServiceIdentity) -> Self {
        Self {
            identity: Arc::new(identity),
        }
    }
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    tracing::debug!("Health check");
    Json(HealthResponse::ok(&state.identity))
}

pub async fn compute(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<ComputeResponse>, ApiError> {
    let n = COMPUTE_N.from_query(&query)?;

    // CPU bound; keep it off the async workers
    let (prime_count, duration_ms) = tokio::task::spawn_blocking(move || timed(|| count_primes(n)))
        .await
        .map_err(|e| {
            tracing::error!("prime counting task failed: {}", e);
            ApiError::Internal
        })?;

    tracing::debug!(n, prime_count, duration_ms, "compute done");

    Ok(Json(ComputeResponse::new(
        &state.identity,
        ComputeResult {
            n,
            prime_count,
            duration_ms,
        },
    )))
}

pub async fn payload(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<PayloadResponse>, ApiError> {
    let size = PAYLOAD_SIZE.from_query(&query)?;

    let (items, duration_ms) = timed(|| build_payload(size));
    let items = items.map_err(|e| {
        tracing::error!("payload of {} items could not be allocated: {}", size, e);
        ApiError::Internal
    })?;
    tracing::debug!(size, duration_ms, "payload built");

    Ok(Json(PayloadResponse::new(&state.identity, items, duration_ms)))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
