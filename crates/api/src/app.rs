//! HTTP application wiring (axum router + service wiring).
//!
//! This folder is structured like:
//! - `services.rs`: store wiring over the shared database pool
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use byline_infra::StoreError;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Opens the database at `db_url`, creating the file and schema if absent.
pub async fn build_app(db_url: &str) -> Result<Router, StoreError> {
    let services = Arc::new(services::build_services(db_url).await?);

    let api = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn(middleware::request_context));

    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .merge(api))
}
