//! Database bootstrap: connection pool + embedded migrations.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::store::StoreError;

/// Handle to the SQLite database behind all stores.
///
/// The pool is configured with:
/// - WAL mode, so one writer and multiple readers can coexist;
/// - `foreign_keys = ON` on every connection, which is what makes the
///   posts→authors cascade rule effective;
/// - `create_if_missing`, so the database file appears on first start.
///
/// Embedded migrations run on open; the schema is idempotent.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if absent) the database at `url` and apply migrations.
    ///
    /// `sqlite::memory:` URLs are pinned to a single pooled connection that
    /// never expires, since every SQLite in-memory connection is its own
    /// database.
    pub async fn open(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true);

        let mut pool_options = SqlitePoolOptions::new();
        if url.contains(":memory:") {
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options.connect_with(options).await?;
        sqlx::migrate!().run(&pool).await?;

        tracing::info!(url, "database ready");
        Ok(Self { pool })
    }

    /// Cheap clone of the shared pool, for handing to stores.
    pub fn pool(&self) -> SqlitePool {
        self.pool.clone()
    }
}
