mod config;
mod constants;
mod domain;
mod models;
mod routes;
mod services;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use config::{AppConfig, PlatformConfig};
use constants::DEFAULT_LOG_FILTER;
use domain::platform::Platform;
use services::upstream::{HttpUpstream, UpstreamFetcher};

/// Shared, read-only request state
pub struct AppState {
    pub platforms: PlatformConfig,
    pub upstream: Arc<dyn UpstreamFetcher>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = AppConfig::from_env()?;

    for platform in Platform::ALL {
        match config.platforms.endpoint(platform) {
            Some(endpoint) => tracing::info!(%platform, endpoint, "upstream configured"),
            None => tracing::warn!(
                %platform,
                env = platform.endpoint_env_var(),
                "no upstream configured, requests for this platform will fail"
            ),
        }
    }

    let upstream = HttpUpstream::new(config.user_agent.as_deref())?;
    let addr = config.bind_address();

    let state = Arc::new(AppState {
        platforms: config.platforms,
        upstream: Arc::new(upstream),
    });

    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
