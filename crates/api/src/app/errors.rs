use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use byline_core::DomainError;
use byline_infra::StoreError;

/// Map a store failure onto the HTTP error taxonomy.
///
/// `resource` names what the handler was looking up, so bare `NotFound`
/// errors surface as "author not found" / "post not found".
pub fn store_error_to_response(err: StoreError, resource: &'static str) -> axum::response::Response {
    match err {
        StoreError::Domain(DomainError::Validation(msg)) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        StoreError::Domain(DomainError::Conflict(msg)) => {
            json_error(StatusCode::CONFLICT, "conflict", msg)
        }
        StoreError::Domain(DomainError::NotFound) => json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("{resource} not found"),
        ),
        StoreError::Domain(DomainError::ReferentialIntegrity(msg)) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "referential_integrity", msg)
        }
        StoreError::Database(e) => {
            tracing::error!(error = ?e, "database failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", "internal storage failure")
        }
        StoreError::Migrate(e) => {
            tracing::error!(error = ?e, "migration failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", "internal storage failure")
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
