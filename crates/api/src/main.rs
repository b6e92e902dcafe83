use anyhow::{Context, Result};
use roam_api::{build_app, ApiConfig};
use roam_observability::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("roam_api");

    let config = ApiConfig::from_env();
    let bind = config.bind.clone();
    let upstream = config.gateway.mode;

    let app = build_app(config)?;

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    tracing::info!(bind = %bind, upstream = ?upstream, "roam api started");

    axum::serve(listener, app).await?;
    Ok(())
}
