use serde::{Deserialize, Serialize};

use byline_core::{DomainError, DomainResult};

use crate::author::{Author, AuthorId};

/// Post identifier (database-generated row id).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub i64);

impl PostId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for PostId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A post as stored. `author_id` always references an existing author
/// (enforced by the schema's foreign key and cascade rule).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author_id: AuthorId,
}

/// A post together with its owning author, as read back by the joined
/// list/get queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: Author,
}

/// Input for creating a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: AuthorId,
}

impl NewPost {
    pub fn validate(&self) -> DomainResult<()> {
        validate_text("title", &self.title)?;
        validate_text("content", &self.content)
    }
}

/// Partial update for a post. A present `author_id` rehomes the post and
/// must reference an existing author (checked by the store).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author_id: Option<AuthorId>,
}

impl PostPatch {
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(title) = &self.title {
            validate_text("title", title)?;
        }
        if let Some(content) = &self.content {
            validate_text("content", content)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.author_id.is_none()
    }
}

fn validate_text(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}
