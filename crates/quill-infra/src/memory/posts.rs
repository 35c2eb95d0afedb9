use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::Post;
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository};
use quill_core::query::{PostQuery, sort_newest_first};

/// In-memory post store enforcing the unique slug index and version checks.
#[derive(Default)]
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        if store.contains_key(&post.id) {
            return Err(RepoError::Constraint("posts_pkey".to_string()));
        }
        if store.values().any(|p| p.slug == post.slug) {
            return Err(RepoError::Constraint("posts_slug_key".to_string()));
        }

        store.insert(post.id, post.clone());
        Ok(post)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self, query: &PostQuery) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        let mut posts: Vec<Post> = store.values().filter(|p| query.matches(p)).cloned().collect();
        sort_newest_first(&mut posts);
        Ok(posts)
    }

    async fn update_versioned(&self, mut post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        let current = store.get_mut(&post.id).ok_or(RepoError::NotFound)?;
        if current.version != post.version {
            return Err(RepoError::StaleVersion);
        }

        post.version += 1;
        *current = post.clone();
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.store.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::domain::{NewPost, PostStatus};
    use quill_core::query::PostFilter;

    fn post(title: &str) -> Post {
        Post::new(
            Uuid::new_v4(),
            NewPost {
                title: title.to_string(),
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_a_constraint_violation() {
        let repo = InMemoryPostRepository::new();
        let first = repo.insert(post("Hello")).await.unwrap();
        let mut clash = post("Hello");
        clash.slug = first.slug.clone();

        let result = repo.insert(clash).await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_update_versioned_rejects_stale_copies() {
        let repo = InMemoryPostRepository::new();
        let stored = repo.insert(post("Hello")).await.unwrap();
        let mut first = stored.clone();
        let mut second = stored.clone();

        first.title = "First".into();
        let saved = repo.update_versioned(first).await.unwrap();
        assert_eq!(saved.version, stored.version + 1);

        second.title = "Second".into();
        let result = repo.update_versioned(second).await;
        assert!(matches!(result, Err(RepoError::StaleVersion)));

        let current = repo.find_by_id(stored.id).await.unwrap().unwrap();
        assert_eq!(current.title, "First");
    }

    #[tokio::test]
    async fn test_list_orders_newest_first_and_filters() {
        let repo = InMemoryPostRepository::new();
        let mut older = post("Older");
        older.created_at -= chrono::TimeDelta::minutes(5);
        let older = repo.insert(older).await.unwrap();
        let newer = repo.insert(post("Newer")).await.unwrap();
        let mut draft = post("Draft");
        draft.status = PostStatus::Draft;
        repo.insert(draft).await.unwrap();

        let listed = repo
            .list(&PostQuery::new(PostFilter::All, None))
            .await
            .unwrap();

        let ids: Vec<Uuid> = listed.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
    }

    #[tokio::test]
    async fn test_delete_missing_post() {
        let repo = InMemoryPostRepository::new();
        assert!(matches!(
            repo.delete(Uuid::new_v4()).await,
            Err(RepoError::NotFound)
        ));
    }
}
