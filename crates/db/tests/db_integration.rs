//! Database integration tests.
//!
//! These tests require a running `PostgreSQL` instance.
//! Run with: `cargo test --test db_integration -- --ignored`
//!
//! Environment variables:
//!   `TEST_DB_HOST` (default: localhost)
//!   `TEST_DB_PORT` (default: 5433)
//!   `TEST_DB_USER` (default: `fundacja_test`)
//!   `TEST_DB_PASSWORD` (default: `fundacja_test`)
//!   `TEST_DB_NAME` (default: `fundacja_test`)

#![allow(clippy::unwrap_used)]

use fundacja_db::test_utils::{TestDatabase, TestDbConfig};

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_database_connection() {
    let config = TestDbConfig::default();
    let result = TestDatabase::with_config(config).await;
    assert!(result.is_ok(), "Failed to connect: {:?}", result.err());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_migrations_apply_cleanly() {
    let db = TestDatabase::new().await.expect("Failed to connect");
    let result = fundacja_db::migrate(db.connection()).await;
    assert!(result.is_ok(), "Migration failed: {:?}", result.err());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_category_delete_is_blocked_by_posts() {
    use fundacja_db::entities::{author, category, post};
    use fundacja_db::repositories::{AuthorRepository, CategoryRepository, PostRepository};
    use sea_orm::Set;
    use std::sync::Arc;

    let db = TestDatabase::new().await.expect("Failed to connect");
    fundacja_db::migrate(db.connection()).await.unwrap();
    db.cleanup().await.unwrap();

    let conn = Arc::new(db.conn);
    let categories = CategoryRepository::new(conn.clone());
    let authors = AuthorRepository::new(conn.clone());
    let posts = PostRepository::new(conn);

    let category = categories
        .create(category::ActiveModel {
            id: Set("cat1".to_string()),
            name: Set("Neurologia".to_string()),
            slug: Set("neurologia".to_string()),
            default_image: Set(None),
        })
        .await
        .unwrap();

    let author = authors
        .create(author::ActiveModel {
            id: Set("a1".to_string()),
            username: Set("redakcja".to_string()),
            display_name: Set(None),
            email: Set("redakcja@example.org".to_string()),
            created_at: Set(chrono::Utc::now().into()),
        })
        .await
        .unwrap();

    posts
        .create(post::ActiveModel {
            id: Set("p1".to_string()),
            title: Set("Padaczka".to_string()),
            slug: Set("padaczka".to_string()),
            created_at: Set(chrono::Utc::now().into()),
            published: Set(true),
            excerpt: Set("excerpt".to_string()),
            hero_image: Set(None),
            hero_video_url: Set(None),
            content: Set("content".to_string()),
            category_id: Set(category.id.clone()),
            author_id: Set(author.id.clone()),
        })
        .await
        .unwrap();

    // RESTRICT foreign key blocks the delete while the post exists
    let blocked = categories.delete(&category.id).await;
    assert!(blocked.is_err());

    posts.delete("p1").await.unwrap();
    let allowed = categories.delete(&category.id).await;
    assert!(allowed.is_ok());
}
