//! SQLite-backed repositories for authors and posts.
//!
//! Each store holds a clone of the shared [`sqlx::SqlitePool`] and exposes
//! the operations of its resource as short, single-statement (occasionally
//! two-statement) async calls. Uniqueness and referential checks are done
//! up front for precise error messages, with the schema's UNIQUE and
//! FOREIGN KEY constraints as the backstop under concurrent writers.

mod authors;
mod posts;

use thiserror::Error;

use byline_core::DomainError;

pub use authors::AuthorStore;
pub use posts::PostStore;

/// Persistence-layer error: a domain failure or an underlying database one.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.kind() == sqlx::error::ErrorKind::UniqueViolation
    )
}

pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.kind() == sqlx::error::ErrorKind::ForeignKeyViolation
    )
}
