use crate::models::responses::HealthResponse;
use axum::response::Json;

pub async fn ping() -> &'static str {
    "pong"
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        service: "books-service".to_string(),
        status: "running".to_string(),
    })
}
