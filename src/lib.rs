use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use routes::{books::get_books, health::health_check, health::ping};
use services::aggregator::FetchPolicy;
use services::upstream::BookSource;

pub type Source = Arc<dyn BookSource + Send + Sync>;

/// Immutable state shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub source: Source,
    pub policy: FetchPolicy,
}

impl AppState {
    pub fn new(source: Source, policy: FetchPolicy) -> Self {
        Self { source, policy }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/status", get(health_check))
        .route("/books", get(get_books))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
