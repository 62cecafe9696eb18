use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use netzero_api::{create_router, ApiConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "netzero_api=info,netzero_geo=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env();

    tracing::info!(
        port = config.port,
        upstream_timeout_secs = config.upstream_timeout.as_secs(),
        "Starting NetZero expander"
    );

    let state = Arc::new(AppState::from_config(&config).context("Failed to build upstream client")?);
    let cors = config.cors_layer().context("Invalid NETZERO_CORS_ORIGIN")?;

    let app = create_router(state).layer(cors);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    match &config.cors_origin {
        Some(origin) => tracing::info!("CORS enabled for {}", origin),
        None => tracing::info!("CORS enabled for any origin"),
    }

    axum::serve(listener, app).await?;
    Ok(())
}
