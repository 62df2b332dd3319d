//! Route table.
//!
//! ```text
//! GET /health   - liveness, identity
//! GET /compute  - prime counting, ?n=<int> (default 10000, min 2)
//! GET /payload  - synthetic records, ?size=<int> (default 100, min 1)
//! *             - 404 {"error":"not found"}
//! ```

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{compute, health, not_found, payload, AppState};
use crate::domain::model::ServiceIdentity;

/// Builds the router with the identity captured in its state.
pub fn build_router(identity: ServiceIdentity) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/compute", get(compute))
        .route("/payload", get(payload))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(identity))
}
