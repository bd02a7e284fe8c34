use axum::Router;
use axum::http::HeaderValue;
use axum::http::header::CACHE_CONTROL;
use axum::routing::get;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
};

use crate::backend::SearchBackend;

pub mod handlers;
pub mod models;

pub fn create_router(backend: Arc<dyn SearchBackend>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Totals and orderings must always be live; intermediaries may not cache.
    let no_store =
        SetResponseHeaderLayer::overriding(CACHE_CONTROL, HeaderValue::from_static("no-store"));

    Router::new()
        .route("/api/search", get(handlers::search_handler))
        .route("/health", get(handlers::health_handler))
        .with_state(backend)
        .layer(no_store)
        .layer(cors)
}
