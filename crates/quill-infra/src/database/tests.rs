use std::collections::BTreeSet;

use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use serde_json::json;
use uuid::Uuid;

use quill_core::domain::{Post, PostStatus, Role, User};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository, UserRepository};

use crate::database::entity::{post, user};
use crate::database::postgres_repo::{PostgresPostRepository, PostgresUserRepository};

fn post_model(id: Uuid, author_id: Uuid, status: &str) -> post::Model {
    let now = Utc::now();
    let comment_id = Uuid::new_v4();
    post::Model {
        id,
        author_id,
        title: "Test Post".to_owned(),
        slug: "test-post-12345abcd".to_owned(),
        content: "Content".to_owned(),
        tags: json!(["rust", "sea-orm"]),
        status: status.to_owned(),
        liked_by: json!([author_id]),
        comments: json!([{
            "id": comment_id,
            "author_id": author_id,
            "text": "First!",
            "created_at": now,
        }]),
        version: 3,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let post_id = Uuid::new_v4();
    let author_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(post_id, author_id, "published")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.id, post_id);
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.tags, vec!["rust", "sea-orm"]);
    assert_eq!(post.liked_by, BTreeSet::from([author_id]));
    assert_eq!(post.comments.len(), 1);
    assert_eq!(post.comments[0].text, "First!");
    assert_eq!(post.version, 3);
}

#[tokio::test]
async fn test_unknown_status_is_reported_as_corrupt() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(Uuid::new_v4(), Uuid::new_v4(), "archived")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let result: Result<Option<Post>, _> = repo.find_by_id(Uuid::new_v4()).await;

    assert!(matches!(result, Err(RepoError::Corrupt(_))));
}

#[tokio::test]
async fn test_update_versioned_bumps_version() {
    let post_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post = Post::try_from(post_model(post_id, Uuid::new_v4(), "published")).unwrap();

    let saved = repo.update_versioned(post).await.unwrap();

    assert_eq!(saved.version, 4);
}

#[tokio::test]
async fn test_update_versioned_detects_stale_copy() {
    let post_id = Uuid::new_v4();
    let author_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .append_query_results([vec![post_model(post_id, author_id, "published")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post = Post::try_from(post_model(post_id, author_id, "published")).unwrap();

    let result = repo.update_versioned(post).await;

    assert!(matches!(result, Err(RepoError::StaleVersion)));
}

#[tokio::test]
async fn test_update_versioned_missing_row() {
    let post_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post = Post::try_from(post_model(post_id, Uuid::new_v4(), "draft")).unwrap();
    assert_eq!(post.status, PostStatus::Draft);

    let result = repo.update_versioned(post).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_delete_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(matches!(
        repo.delete(Uuid::new_v4()).await,
        Err(RepoError::NotFound)
    ));
}

#[tokio::test]
async fn test_find_user_by_email() {
    let now = Utc::now();
    let id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user::Model {
            id,
            name: "Alice".to_owned(),
            email: "alice@example.com".to_owned(),
            password_hash: "$argon2id$stub".to_owned(),
            bio: String::new(),
            avatar_url: String::new(),
            role: "admin".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);
    let user: User = repo
        .find_by_email("alice@example.com")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(user.id, id);
    assert_eq!(user.role, Role::Admin);
}

#[tokio::test]
async fn test_find_by_ids_skips_query_when_empty() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let repo = PostgresUserRepository::new(db);

    assert!(repo.find_by_ids(&[]).await.unwrap().is_empty());
}
