use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, warn};

use crate::backend::{SearchBackend, indices};
use crate::projection::{self, SearchEnvelope};
use crate::query::SearchRequest;

use super::models::SearchParams;

/// Single search endpoint. Backend failures come back as HTTP 200 with
/// `ok:false` and an error message — clients consume the `ok` flag, not the
/// transport status. That contract is deliberate; do not "fix" it to 5xx.
pub async fn search_handler(
    State(backend): State<Arc<dyn SearchBackend>>,
    Query(params): Query<SearchParams>,
) -> Json<SearchEnvelope> {
    let request = SearchRequest::from_params(&params);
    info!(
        term = request.term.as_deref().unwrap_or(""),
        page = request.page,
        size = request.size,
        "search request"
    );

    match backend.search(indices::PRODUCTS, request.search_body()).await {
        Ok(raw) => Json(projection::project(&request, raw)),
        Err(e) => {
            warn!("search failed: {e}");
            Json(SearchEnvelope::failure(e.to_string()))
        }
    }
}

pub async fn health_handler(State(backend): State<Arc<dyn SearchBackend>>) -> Json<Value> {
    match backend.ping().await {
        Ok(()) => Json(json!({ "status": "healthy", "backend": "connected" })),
        Err(e) => Json(json!({ "status": "degraded", "backend": e.to_string() })),
    }
}
