use crate::models::responses::BooksResponse;
use crate::services::aggregator::fetch_books;
use crate::services::upstream::UpstreamError;
use crate::utils::params::BooksParams;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("getting books: {0}")]
    Upstream(#[from] UpstreamError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

pub async fn get_books(
    Query(params): Query<BooksParams>,
    State(state): State<AppState>,
) -> Result<Json<BooksResponse>, ApiError> {
    let params = params.validate().map_err(ApiError::Validation)?;

    info!("Books query: '{}' limit {}", params.query, params.limit);

    let books = fetch_books(
        state.source.as_ref(),
        &params.query,
        params.limit,
        state.policy,
    )
    .await
    .map_err(|e| {
        error!("Failed to fetch books for '{}': {}", params.query, e);
        ApiError::from(e)
    })?;

    info!("Returning {} books for '{}'", books.len(), params.query);

    Ok(Json(BooksResponse::new(params.query, books)))
}
