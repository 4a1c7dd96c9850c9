use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;

use byline_blog::{Author, AuthorId, AuthorPatch, NewAuthor, Post, PostId};
use byline_core::DomainError;

use super::{is_unique_violation, StoreError};

/// Repository for the `authors` table.
#[derive(Clone)]
pub struct AuthorStore {
    pool: SqlitePool,
}

impl AuthorStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new author. Fails with `Conflict` when the email is taken.
    pub async fn create(&self, input: NewAuthor) -> Result<Author, StoreError> {
        input.validate()?;
        if self.email_in_use(&input.email, None).await? {
            return Err(email_conflict(&input.email).into());
        }

        let result = sqlx::query("INSERT INTO authors (name, email) VALUES (?1, ?2)")
            .bind(&input.name)
            .bind(&input.email)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) => {
                let author = Author {
                    id: AuthorId::new(done.last_insert_rowid()),
                    name: input.name,
                    email: input.email,
                };
                tracing::debug!(author_id = %author.id, "author created");
                Ok(author)
            }
            // Lost the race against a concurrent insert with the same email.
            Err(e) if is_unique_violation(&e) => Err(email_conflict(&input.email).into()),
            Err(e) => Err(e.into()),
        }
    }

    /// All authors, in storage order.
    pub async fn list(&self) -> Result<Vec<Author>, StoreError> {
        let rows = sqlx::query("SELECT id, name, email FROM authors")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(author_from_row).collect()
    }

    pub async fn get(&self, id: AuthorId) -> Result<Author, StoreError> {
        let row = sqlx::query("SELECT id, name, email FROM authors WHERE id = ?1")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DomainError::NotFound)?;
        author_from_row(&row)
    }

    /// Apply a partial update. Fails with `NotFound` for an unknown id and
    /// with `Conflict` when the new email belongs to a different author.
    pub async fn update(&self, id: AuthorId, patch: AuthorPatch) -> Result<Author, StoreError> {
        patch.validate()?;
        let current = self.get(id).await?;

        if let Some(email) = &patch.email {
            if self.email_in_use(email, Some(id)).await? {
                return Err(email_conflict(email).into());
            }
        }

        let name = patch.name.unwrap_or(current.name);
        let email = patch.email.unwrap_or(current.email);

        let result = sqlx::query("UPDATE authors SET name = ?1, email = ?2 WHERE id = ?3")
            .bind(&name)
            .bind(&email)
            .bind(id.0)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => {
                tracing::debug!(author_id = %id, "author updated");
                Ok(Author { id, name, email })
            }
            Err(e) if is_unique_violation(&e) => Err(email_conflict(&email).into()),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete the author. The schema's `ON DELETE CASCADE` removes every
    /// post owned by it in the same statement.
    pub async fn delete(&self, id: AuthorId) -> Result<(), StoreError> {
        let done = sqlx::query("DELETE FROM authors WHERE id = ?1")
            .bind(id.0)
            .execute(&self.pool)
            .await?;
        if done.rows_affected() == 0 {
            return Err(DomainError::NotFound.into());
        }
        tracing::debug!(author_id = %id, "author deleted (posts cascaded)");
        Ok(())
    }

    /// All posts owned by the author, oldest first.
    ///
    /// An unknown author id is `NotFound`, not an empty list.
    pub async fn posts_of(&self, id: AuthorId) -> Result<Vec<Post>, StoreError> {
        self.get(id).await?;

        let rows = sqlx::query(
            "SELECT id, title, content, author_id FROM posts WHERE author_id = ?1 ORDER BY id",
        )
        .bind(id.0)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(post_from_row).collect()
    }

    async fn email_in_use(
        &self,
        email: &str,
        exclude: Option<AuthorId>,
    ) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT id FROM authors WHERE email = ?1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => {
                let owner = AuthorId::new(row.try_get("id")?);
                Ok(exclude != Some(owner))
            }
            None => Ok(false),
        }
    }
}

fn email_conflict(email: &str) -> DomainError {
    DomainError::conflict(format!("email already in use: {email}"))
}

pub(super) fn author_from_row(row: &SqliteRow) -> Result<Author, StoreError> {
    Ok(Author {
        id: AuthorId::new(row.try_get("id")?),
        name: row.try_get("name")?,
        email: row.try_get("email")?,
    })
}

pub(super) fn post_from_row(row: &SqliteRow) -> Result<Post, StoreError> {
    Ok(Post {
        id: PostId::new(row.try_get("id")?),
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        author_id: AuthorId::new(row.try_get("author_id")?),
    })
}
