use books_service::config::Config;
use books_service::services::upstream::GoogleBooksClient;
use books_service::{app, AppState};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("books_service=info,tower_http=info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if config.oauth.is_configured() {
        info!("OAuth client configured: {:?}", config.oauth);
    } else {
        info!("OAuth client not configured");
    }

    let client = match GoogleBooksClient::new(config.books_api_url.clone(), config.upstream_timeout)
    {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to build upstream client: {}", e);
            std::process::exit(1);
        }
    };
    info!("Using books API at {}", client.base_url());

    let state = AppState::new(Arc::new(client), config.fetch_policy);
    let addr = config.listen_addr();

    info!("Books service starting on {}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app(state)).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
