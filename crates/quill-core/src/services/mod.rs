//! Application services - use cases composed from domain logic and ports.
//!
//! Every post mutation is a read-modify-write against the aggregate's
//! version; see [`mutate_post`].

mod accounts;
mod comments;
mod posts;

pub use accounts::{AccountService, NewAccount, Session};
pub use comments::CommentService;
pub use posts::PostService;

use uuid::Uuid;

use crate::domain::{Authors, Post};
use crate::error::{DomainError, RepoError};
use crate::ports::{PostRepository, UserRepository};

/// Attempts at a conditional post write before giving up.
pub const MAX_WRITE_ATTEMPTS: usize = 5;

/// A result together with the profiles of every author it mentions.
#[derive(Debug, Clone)]
pub struct Resolved<T> {
    pub value: T,
    pub authors: Authors,
}

async fn resolve_authors(
    users: &dyn UserRepository,
    ids: impl IntoIterator<Item = Uuid>,
) -> Result<Authors, DomainError> {
    let mut ids: Vec<Uuid> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();

    if ids.is_empty() {
        return Ok(Authors::default());
    }

    let users = users.find_by_ids(&ids).await?;
    Ok(Authors::from_users(&users))
}

/// Load a post, apply `change` and write it back conditionally on the version
/// that was read. A concurrent writer causes a fresh read and a new attempt,
/// so `change` (including its authorization checks) always runs against the
/// current state.
async fn mutate_post<R, F>(
    posts: &dyn PostRepository,
    id: Uuid,
    mut change: F,
) -> Result<(Post, R), DomainError>
where
    F: FnMut(&mut Post) -> Result<R, DomainError>,
{
    for attempt in 1..=MAX_WRITE_ATTEMPTS {
        let mut post = posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;

        let outcome = change(&mut post)?;

        match posts.update_versioned(post).await {
            Ok(saved) => return Ok((saved, outcome)),
            Err(RepoError::StaleVersion) => {
                tracing::debug!(post_id = %id, attempt, "Stale post version, retrying");
            }
            Err(RepoError::NotFound) => return Err(DomainError::post_not_found(id)),
            Err(e) => return Err(e.into()),
        }
    }

    tracing::warn!(post_id = %id, "Giving up on contended post write");
    Err(DomainError::ConcurrentModification {
        entity_type: "Post",
        id,
    })
}

fn required_text(field: &'static str, value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::NewPost;
    use crate::ports::BaseRepository;
    use crate::query::PostQuery;

    /// Single-post store that reports a stale version a fixed number of times.
    struct FlakyStore {
        post: Mutex<Post>,
        stale_writes: Mutex<usize>,
    }

    impl FlakyStore {
        fn new(stale_writes: usize) -> Self {
            let post = Post::new(
                Uuid::new_v4(),
                NewPost {
                    title: "Contended".into(),
                    ..Default::default()
                },
            );
            Self {
                post: Mutex::new(post),
                stale_writes: Mutex::new(stale_writes),
            }
        }

        fn id(&self) -> Uuid {
            self.post.lock().unwrap().id
        }
    }

    #[async_trait]
    impl BaseRepository<Post, Uuid> for FlakyStore {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
            let post = self.post.lock().unwrap();
            Ok((post.id == id).then(|| post.clone()))
        }

        async fn insert(&self, entity: Post) -> Result<Post, RepoError> {
            Ok(entity)
        }
    }

    #[async_trait]
    impl PostRepository for FlakyStore {
        async fn list(&self, _query: &PostQuery) -> Result<Vec<Post>, RepoError> {
            Ok(vec![self.post.lock().unwrap().clone()])
        }

        async fn update_versioned(&self, mut post: Post) -> Result<Post, RepoError> {
            let mut stale = self.stale_writes.lock().unwrap();
            if *stale > 0 {
                *stale -= 1;
                return Err(RepoError::StaleVersion);
            }
            post.version += 1;
            *self.post.lock().unwrap() = post.clone();
            Ok(post)
        }

        async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_mutate_post_retries_stale_writes() {
        let store = FlakyStore::new(2);
        let liker = Uuid::new_v4();
        let mut calls = 0;

        let (saved, likes) = mutate_post(&store, store.id(), |post| {
            calls += 1;
            Ok(post.toggle_like(liker))
        })
        .await
        .unwrap();

        assert_eq!(calls, 3);
        assert_eq!(likes, 1);
        assert_eq!(saved.version, 2);
    }

    #[tokio::test]
    async fn test_mutate_post_gives_up_after_max_attempts() {
        let store = FlakyStore::new(MAX_WRITE_ATTEMPTS);

        let result = mutate_post(&store, store.id(), |_| Ok(())).await;

        assert!(matches!(
            result,
            Err(DomainError::ConcurrentModification { .. })
        ));
    }

    #[tokio::test]
    async fn test_mutate_post_reports_missing_post() {
        let store = FlakyStore::new(0);
        let missing = Uuid::new_v4();

        let result = mutate_post(&store, missing, |_| Ok(())).await;

        assert!(matches!(result, Err(DomainError::NotFound { id, .. }) if id == missing));
    }

    #[tokio::test]
    async fn test_mutate_post_does_not_write_when_change_fails() {
        let store = FlakyStore::new(0);

        let result: Result<(Post, ()), _> =
            mutate_post(&store, store.id(), |_| Err(DomainError::Forbidden)).await;

        assert!(matches!(result, Err(DomainError::Forbidden)));
        assert_eq!(store.post.lock().unwrap().version, 1);
    }
}
