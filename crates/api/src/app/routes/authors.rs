use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use byline_blog::AuthorId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_author).get(list_authors))
        .route("/:id", get(get_author).put(update_author).delete(delete_author))
        .route("/:id/posts", get(list_author_posts))
}

pub async fn create_author(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateAuthorRequest>,
) -> axum::response::Response {
    match services.authors.create(body.into_input()).await {
        Ok(author) => (StatusCode::CREATED, Json(dto::author_to_json(&author))).into_response(),
        Err(e) => errors::store_error_to_response(e, "author"),
    }
}

pub async fn list_authors(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.authors.list().await {
        Ok(authors) => {
            let items = authors.iter().map(dto::author_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::store_error_to_response(e, "author"),
    }
}

pub async fn get_author(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    match services.authors.get(AuthorId::new(id)).await {
        Ok(author) => (StatusCode::OK, Json(dto::author_to_json(&author))).into_response(),
        Err(e) => errors::store_error_to_response(e, "author"),
    }
}

pub async fn update_author(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
    Json(body): Json<dto::UpdateAuthorRequest>,
) -> axum::response::Response {
    match services.authors.update(AuthorId::new(id), body.into_patch()).await {
        Ok(author) => (StatusCode::OK, Json(dto::author_to_json(&author))).into_response(),
        Err(e) => errors::store_error_to_response(e, "author"),
    }
}

pub async fn delete_author(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    match services.authors.delete(AuthorId::new(id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::store_error_to_response(e, "author"),
    }
}

pub async fn list_author_posts(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    match services.authors.posts_of(AuthorId::new(id)).await {
        Ok(posts) => {
            let items = posts.iter().map(dto::post_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::store_error_to_response(e, "author"),
    }
}
