use std::sync::Arc;

use movie_search::{
    api::{create_router, AppState},
    config::Config,
    services::{SearchOptions, TmdbGateway},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_search=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Fails fast without a token
    let gateway = TmdbGateway::from_config(&config)?;
    tracing::info!(api_url = %config.tmdb_api_url, language = %config.tmdb_language, "Catalog gateway configured");

    let state = AppState::new(Arc::new(gateway), SearchOptions::from(&config));
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
