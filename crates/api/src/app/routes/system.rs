use axum::http::StatusCode;

/// Liveness probe; does not touch the database.
pub async fn health() -> StatusCode {
    StatusCode::OK
}
