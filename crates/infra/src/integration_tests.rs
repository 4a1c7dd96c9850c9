//! Integration tests for the store layer against a real (in-memory) SQLite
//! database: CRUD round-trips, uniqueness, referential integrity, and the
//! cascade from author deletion to posts.

use byline_blog::{AuthorId, AuthorPatch, NewAuthor, NewPost, PostId, PostPatch};
use byline_core::DomainError;

use crate::db::Database;
use crate::store::{AuthorStore, PostStore, StoreError};

async fn setup() -> (AuthorStore, PostStore) {
    let db = Database::open("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");
    (AuthorStore::new(db.pool()), PostStore::new(db.pool()))
}

fn new_author(name: &str, email: &str) -> NewAuthor {
    NewAuthor {
        name: name.to_string(),
        email: email.to_string(),
    }
}

fn new_post(title: &str, content: &str, author_id: AuthorId) -> NewPost {
    NewPost {
        title: title.to_string(),
        content: content.to_string(),
        author_id,
    }
}

fn assert_domain(err: StoreError, expect: impl Fn(&DomainError) -> bool) {
    match err {
        StoreError::Domain(e) if expect(&e) => {}
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn author_create_round_trips_by_id() {
    let (authors, _) = setup().await;

    let created = authors
        .create(new_author("Swetha", "s@x.com"))
        .await
        .unwrap();
    let fetched = authors.get(created.id).await.unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.name, "Swetha");
    assert_eq!(fetched.email, "s@x.com");
}

#[tokio::test]
async fn duplicate_email_is_rejected_and_adds_no_row() {
    let (authors, _) = setup().await;

    authors.create(new_author("A", "a@x.com")).await.unwrap();
    let err = authors.create(new_author("B", "a@x.com")).await.unwrap_err();
    assert_domain(err, |e| matches!(e, DomainError::Conflict(_)));

    assert_eq!(authors.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn author_update_is_partial_and_checks_collisions() {
    let (authors, _) = setup().await;

    let a = authors.create(new_author("A", "a@x.com")).await.unwrap();
    let b = authors.create(new_author("B", "b@x.com")).await.unwrap();

    // Name-only patch leaves the email alone.
    let updated = authors
        .update(
            a.id,
            AuthorPatch {
                name: Some("A2".to_string()),
                email: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "A2");
    assert_eq!(updated.email, "a@x.com");

    // Taking b's email is a conflict.
    let err = authors
        .update(
            a.id,
            AuthorPatch {
                name: None,
                email: Some("b@x.com".to_string()),
            },
        )
        .await
        .unwrap_err();
    assert_domain(err, |e| matches!(e, DomainError::Conflict(_)));

    // Re-submitting your own email is not.
    let same = authors
        .update(
            b.id,
            AuthorPatch {
                name: None,
                email: Some("b@x.com".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(same.email, "b@x.com");
}

#[tokio::test]
async fn missing_ids_are_not_found() {
    let (authors, posts) = setup().await;

    let missing_author = AuthorId::new(999);
    let missing_post = PostId::new(999);

    for err in [
        authors.get(missing_author).await.unwrap_err(),
        authors
            .update(missing_author, AuthorPatch::default())
            .await
            .unwrap_err(),
        authors.delete(missing_author).await.unwrap_err(),
        authors.posts_of(missing_author).await.unwrap_err(),
        posts.get(missing_post).await.unwrap_err(),
        posts
            .update(missing_post, PostPatch::default())
            .await
            .unwrap_err(),
        posts.delete(missing_post).await.unwrap_err(),
    ] {
        assert_domain(err, |e| matches!(e, DomainError::NotFound));
    }
}

#[tokio::test]
async fn post_create_requires_existing_author() {
    let (_, posts) = setup().await;

    let err = posts
        .create(new_post("T", "C", AuthorId::new(42)))
        .await
        .unwrap_err();
    assert_domain(err, |e| matches!(e, DomainError::ReferentialIntegrity(_)));

    assert!(posts.list(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_author_cascades_to_posts() {
    let (authors, posts) = setup().await;

    let a = authors.create(new_author("A", "a@x.com")).await.unwrap();
    let b = authors.create(new_author("B", "b@x.com")).await.unwrap();
    let pa = posts.create(new_post("T", "C", a.id)).await.unwrap();
    let pb = posts.create(new_post("T2", "C2", b.id)).await.unwrap();

    authors.delete(a.id).await.unwrap();

    let err = posts.get(pa.id).await.unwrap_err();
    assert_domain(err, |e| matches!(e, DomainError::NotFound));

    // The other author's post is untouched.
    assert_eq!(posts.get(pb.id).await.unwrap().post, pb);
}

#[tokio::test]
async fn post_list_embeds_author_and_filters() {
    let (authors, posts) = setup().await;

    let a = authors.create(new_author("A", "a@x.com")).await.unwrap();
    let b = authors.create(new_author("B", "b@x.com")).await.unwrap();
    let p1 = posts.create(new_post("T1", "C1", a.id)).await.unwrap();
    let p2 = posts.create(new_post("T2", "C2", b.id)).await.unwrap();
    let p3 = posts.create(new_post("T3", "C3", a.id)).await.unwrap();

    let all = posts.list(None).await.unwrap();
    assert_eq!(
        all.iter().map(|p| p.post.id).collect::<Vec<_>>(),
        vec![p1.id, p2.id, p3.id]
    );
    assert_eq!(all[0].author, a);
    assert_eq!(all[1].author, b);

    let only_a = posts.list(Some(a.id)).await.unwrap();
    assert_eq!(
        only_a.iter().map(|p| p.post.id).collect::<Vec<_>>(),
        vec![p1.id, p3.id]
    );
    assert!(only_a.iter().all(|p| p.author == a));

    // Unknown filter value: empty, not an error.
    assert!(posts.list(Some(AuthorId::new(999))).await.unwrap().is_empty());
}

#[tokio::test]
async fn posts_of_author_is_scoped_and_explicit_about_unknown_authors() {
    let (authors, posts) = setup().await;

    let a = authors.create(new_author("A", "a@x.com")).await.unwrap();
    let b = authors.create(new_author("B", "b@x.com")).await.unwrap();
    posts.create(new_post("T1", "C1", a.id)).await.unwrap();
    posts.create(new_post("T2", "C2", b.id)).await.unwrap();

    let of_a = authors.posts_of(a.id).await.unwrap();
    assert_eq!(of_a.len(), 1);
    assert_eq!(of_a[0].title, "T1");

    // An author with no posts gets an empty list, not an error.
    let c = authors.create(new_author("C", "c@x.com")).await.unwrap();
    assert!(authors.posts_of(c.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn post_update_is_partial_and_can_rehome() {
    let (authors, posts) = setup().await;

    let a = authors.create(new_author("A", "a@x.com")).await.unwrap();
    let b = authors.create(new_author("B", "b@x.com")).await.unwrap();
    let p = posts.create(new_post("T", "C", a.id)).await.unwrap();

    let updated = posts
        .update(
            p.id,
            PostPatch {
                title: Some("T2".to_string()),
                ..PostPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "T2");
    assert_eq!(updated.content, "C");
    assert_eq!(updated.author_id, a.id);

    // Rehome to b.
    let rehomed = posts
        .update(
            p.id,
            PostPatch {
                author_id: Some(b.id),
                ..PostPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(rehomed.author_id, b.id);
    assert_eq!(posts.get(p.id).await.unwrap().author, b);

    // Rehoming to a nonexistent author is a referential failure.
    let err = posts
        .update(
            p.id,
            PostPatch {
                author_id: Some(AuthorId::new(999)),
                ..PostPatch::default()
            },
        )
        .await
        .unwrap_err();
    assert_domain(err, |e| matches!(e, DomainError::ReferentialIntegrity(_)));
}

#[tokio::test]
async fn post_delete_removes_only_that_post() {
    let (authors, posts) = setup().await;

    let a = authors.create(new_author("A", "a@x.com")).await.unwrap();
    let p1 = posts.create(new_post("T1", "C1", a.id)).await.unwrap();
    let p2 = posts.create(new_post("T2", "C2", a.id)).await.unwrap();

    posts.delete(p1.id).await.unwrap();

    assert_domain(posts.get(p1.id).await.unwrap_err(), |e| {
        matches!(e, DomainError::NotFound)
    });
    assert_eq!(posts.get(p2.id).await.unwrap().post, p2);
    // The author survives its post.
    assert_eq!(authors.get(a.id).await.unwrap(), a);
}

#[tokio::test]
async fn invalid_input_is_rejected_before_touching_the_database() {
    let (authors, posts) = setup().await;

    let err = authors.create(new_author("", "a@x.com")).await.unwrap_err();
    assert_domain(err, |e| matches!(e, DomainError::Validation(_)));

    let err = authors
        .create(new_author("A", "not-an-email"))
        .await
        .unwrap_err();
    assert_domain(err, |e| matches!(e, DomainError::Validation(_)));

    assert!(authors.list().await.unwrap().is_empty());

    let a = authors.create(new_author("A", "a@x.com")).await.unwrap();
    let err = posts.create(new_post(" ", "C", a.id)).await.unwrap_err();
    assert_domain(err, |e| matches!(e, DomainError::Validation(_)));
    assert!(posts.list(None).await.unwrap().is_empty());
}
