use std::net::SocketAddr;
use std::sync::Arc;

use storefront::api;
use storefront::backend::{ElasticBackend, SearchBackend};
use storefront::config::CONFIG;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let backend: Arc<dyn SearchBackend> =
        Arc::new(ElasticBackend::new(CONFIG.elasticsearch_url.clone()));

    let app = api::create_router(backend);

    let addr = SocketAddr::from(([0, 0, 0, 0], CONFIG.port));
    tracing::info!("API http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
