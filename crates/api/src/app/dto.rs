use serde::Deserialize;

use byline_blog::{Author, AuthorId, AuthorPatch, NewAuthor, NewPost, Post, PostPatch, PostWithAuthor};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateAuthorRequest {
    pub name: String,
    pub email: String,
}

impl CreateAuthorRequest {
    pub fn into_input(self) -> NewAuthor {
        NewAuthor {
            name: self.name,
            email: self.email,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateAuthorRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UpdateAuthorRequest {
    pub fn into_patch(self) -> AuthorPatch {
        AuthorPatch {
            name: self.name,
            email: self.email,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub author_id: i64,
}

impl CreatePostRequest {
    pub fn into_input(self) -> NewPost {
        NewPost {
            title: self.title,
            content: self.content,
            author_id: AuthorId::new(self.author_id),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author_id: Option<i64>,
}

impl UpdatePostRequest {
    pub fn into_patch(self) -> PostPatch {
        PostPatch {
            title: self.title,
            content: self.content,
            author_id: self.author_id.map(AuthorId::new),
        }
    }
}

/// Query string for `GET /posts`.
#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub author_id: Option<i64>,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn author_to_json(author: &Author) -> serde_json::Value {
    serde_json::json!({
        "id": author.id,
        "name": author.name,
        "email": author.email,
    })
}

pub fn post_to_json(post: &Post) -> serde_json::Value {
    serde_json::json!({
        "id": post.id,
        "title": post.title,
        "content": post.content,
        "author_id": post.author_id,
    })
}

pub fn post_with_author_to_json(item: &PostWithAuthor) -> serde_json::Value {
    serde_json::json!({
        "id": item.post.id,
        "title": item.post.title,
        "content": item.post.content,
        "author_id": item.post.author_id,
        "author": author_to_json(&item.author),
    })
}
