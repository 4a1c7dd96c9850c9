use byline_infra::{AuthorStore, Database, PostStore, StoreError};

/// Shared application services handed to every handler via `Extension`.
pub struct AppServices {
    pub authors: AuthorStore,
    pub posts: PostStore,
}

/// Open the database (creating the schema if absent) and wire the stores.
pub async fn build_services(db_url: &str) -> Result<AppServices, StoreError> {
    let db = Database::open(db_url).await?;
    Ok(AppServices {
        authors: AuthorStore::new(db.pool()),
        posts: PostStore::new(db.pool()),
    })
}
