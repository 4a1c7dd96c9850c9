use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;

use byline_blog::{Author, AuthorId, NewPost, Post, PostId, PostPatch, PostWithAuthor};
use byline_core::DomainError;

use super::authors::post_from_row;
use super::{is_foreign_key_violation, StoreError};

/// Repository for the `posts` table.
///
/// List and get return the owning author embedded, always through a single
/// joined query rather than one author lookup per post.
#[derive(Clone)]
pub struct PostStore {
    pool: SqlitePool,
}

impl PostStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new post. Fails with `ReferentialIntegrity` when the named
    /// author does not exist.
    pub async fn create(&self, input: NewPost) -> Result<Post, StoreError> {
        input.validate()?;
        if !self.author_exists(input.author_id).await? {
            return Err(missing_author(input.author_id).into());
        }

        let result = sqlx::query("INSERT INTO posts (title, content, author_id) VALUES (?1, ?2, ?3)")
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.author_id.0)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => {
                let post = Post {
                    id: PostId::new(done.last_insert_rowid()),
                    title: input.title,
                    content: input.content,
                    author_id: input.author_id,
                };
                tracing::debug!(post_id = %post.id, author_id = %post.author_id, "post created");
                Ok(post)
            }
            // The author was deleted between the existence check and the insert.
            Err(e) if is_foreign_key_violation(&e) => Err(missing_author(input.author_id).into()),
            Err(e) => Err(e.into()),
        }
    }

    /// All posts with their authors embedded, optionally filtered to one
    /// author. An unknown filter value simply yields an empty list.
    pub async fn list(&self, author: Option<AuthorId>) -> Result<Vec<PostWithAuthor>, StoreError> {
        let rows = match author {
            Some(author_id) => {
                sqlx::query(JOINED_SELECT_BY_AUTHOR)
                    .bind(author_id.0)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => sqlx::query(JOINED_SELECT_ALL).fetch_all(&self.pool).await?,
        };
        rows.iter().map(post_with_author_from_row).collect()
    }

    pub async fn get(&self, id: PostId) -> Result<PostWithAuthor, StoreError> {
        let row = sqlx::query(JOINED_SELECT_BY_ID)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DomainError::NotFound)?;
        post_with_author_from_row(&row)
    }

    /// Apply a partial update. A supplied `author_id` must reference an
    /// existing author; `NotFound` when the post id is absent.
    pub async fn update(&self, id: PostId, patch: PostPatch) -> Result<Post, StoreError> {
        patch.validate()?;
        let current = self.fetch(id).await?;

        if let Some(author_id) = patch.author_id {
            if !self.author_exists(author_id).await? {
                return Err(missing_author(author_id).into());
            }
        }

        let title = patch.title.unwrap_or(current.title);
        let content = patch.content.unwrap_or(current.content);
        let author_id = patch.author_id.unwrap_or(current.author_id);

        let result =
            sqlx::query("UPDATE posts SET title = ?1, content = ?2, author_id = ?3 WHERE id = ?4")
                .bind(&title)
                .bind(&content)
                .bind(author_id.0)
                .bind(id.0)
                .execute(&self.pool)
                .await;

        match result {
            Ok(_) => {
                tracing::debug!(post_id = %id, "post updated");
                Ok(Post {
                    id,
                    title,
                    content,
                    author_id,
                })
            }
            Err(e) if is_foreign_key_violation(&e) => Err(missing_author(author_id).into()),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete(&self, id: PostId) -> Result<(), StoreError> {
        let done = sqlx::query("DELETE FROM posts WHERE id = ?1")
            .bind(id.0)
            .execute(&self.pool)
            .await?;
        if done.rows_affected() == 0 {
            return Err(DomainError::NotFound.into());
        }
        tracing::debug!(post_id = %id, "post deleted");
        Ok(())
    }

    /// The flat row, without the author join (used by update).
    async fn fetch(&self, id: PostId) -> Result<Post, StoreError> {
        let row = sqlx::query("SELECT id, title, content, author_id FROM posts WHERE id = ?1")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DomainError::NotFound)?;
        post_from_row(&row)
    }

    async fn author_exists(&self, id: AuthorId) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT 1 FROM authors WHERE id = ?1")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }
}

fn missing_author(id: AuthorId) -> DomainError {
    DomainError::referential_integrity(format!("author {id} does not exist"))
}

// Single joined fetch for list/get, so embedding the author never costs one
// lookup per post.
const JOINED_SELECT_ALL: &str = "SELECT p.id, p.title, p.content, p.author_id, \
     a.name AS author_name, a.email AS author_email \
     FROM posts p JOIN authors a ON a.id = p.author_id ORDER BY p.id";

const JOINED_SELECT_BY_AUTHOR: &str = "SELECT p.id, p.title, p.content, p.author_id, \
     a.name AS author_name, a.email AS author_email \
     FROM posts p JOIN authors a ON a.id = p.author_id \
     WHERE p.author_id = ?1 ORDER BY p.id";

const JOINED_SELECT_BY_ID: &str = "SELECT p.id, p.title, p.content, p.author_id, \
     a.name AS author_name, a.email AS author_email \
     FROM posts p JOIN authors a ON a.id = p.author_id WHERE p.id = ?1";

fn post_with_author_from_row(row: &SqliteRow) -> Result<PostWithAuthor, StoreError> {
    let author_id = AuthorId::new(row.try_get("author_id")?);
    Ok(PostWithAuthor {
        post: Post {
            id: PostId::new(row.try_get("id")?),
            title: row.try_get("title")?,
            content: row.try_get("content")?,
            author_id,
        },
        author: Author {
            id: author_id,
            name: row.try_get("author_name")?,
            email: row.try_get("author_email")?,
        },
    })
}
