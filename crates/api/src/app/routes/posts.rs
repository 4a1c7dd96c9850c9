use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use byline_blog::{AuthorId, PostId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_post).get(list_posts))
        .route("/:id", get(get_post).put(update_post).delete(delete_post))
}

pub async fn create_post(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreatePostRequest>,
) -> axum::response::Response {
    match services.posts.create(body.into_input()).await {
        Ok(post) => (StatusCode::CREATED, Json(dto::post_to_json(&post))).into_response(),
        Err(e) => errors::store_error_to_response(e, "post"),
    }
}

pub async fn list_posts(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ListPostsQuery>,
) -> axum::response::Response {
    let filter = query.author_id.map(AuthorId::new);
    match services.posts.list(filter).await {
        Ok(posts) => {
            let items = posts
                .iter()
                .map(dto::post_with_author_to_json)
                .collect::<Vec<_>>();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::store_error_to_response(e, "post"),
    }
}

pub async fn get_post(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    match services.posts.get(PostId::new(id)).await {
        Ok(item) => (StatusCode::OK, Json(dto::post_with_author_to_json(&item))).into_response(),
        Err(e) => errors::store_error_to_response(e, "post"),
    }
}

pub async fn update_post(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
    Json(body): Json<dto::UpdatePostRequest>,
) -> axum::response::Response {
    match services.posts.update(PostId::new(id), body.into_patch()).await {
        Ok(post) => (StatusCode::OK, Json(dto::post_to_json(&post))).into_response(),
        Err(e) => errors::store_error_to_response(e, "post"),
    }
}

pub async fn delete_post(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    match services.posts.delete(PostId::new(id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::store_error_to_response(e, "post"),
    }
}
