//! Post use cases: listing, CRUD and the like toggle.

use std::sync::Arc;

use uuid::Uuid;

use super::{Resolved, mutate_post, required_text, resolve_authors};
use crate::domain::{NewPost, Post, PostPatch};
use crate::error::{DomainError, RepoError};
use crate::policy::{Action, Principal, authorize};
use crate::ports::{PostRepository, UserRepository};
use crate::query::{FilterKind, PostFilter, PostQuery};

/// Attempts at finding a free slug for a new post.
const MAX_SLUG_ATTEMPTS: usize = 3;

pub struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { posts, users }
    }

    /// List posts. `my` and `liked` need a viewer; without one the call fails
    /// instead of widening to every post.
    pub async fn list(
        &self,
        viewer: Option<&Principal>,
        kind: FilterKind,
        search: Option<&str>,
    ) -> Result<Resolved<Vec<Post>>, DomainError> {
        let filter = match (kind, viewer) {
            (FilterKind::All, _) => PostFilter::All,
            (FilterKind::My, Some(p)) => PostFilter::Mine(p.id),
            (FilterKind::Liked, Some(p)) => PostFilter::Liked(p.id),
            (kind, None) => {
                return Err(DomainError::Unauthenticated(format!(
                    "filter={} requires authentication",
                    kind.as_str()
                )));
            }
        };

        let posts = self.posts.list(&PostQuery::new(filter, search)).await?;
        let authors = resolve_authors(&*self.users, posts.iter().map(|p| p.author_id)).await?;

        Ok(Resolved {
            value: posts,
            authors,
        })
    }

    pub async fn get(&self, id: Uuid) -> Result<Resolved<Post>, DomainError> {
        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;

        self.resolve(post).await
    }

    pub async fn create(
        &self,
        principal: &Principal,
        mut input: NewPost,
    ) -> Result<Resolved<Post>, DomainError> {
        input.title = required_text("title", &input.title)?;

        let mut post = Post::new(principal.id, input);
        let mut attempt = 1;
        let post = loop {
            match self.posts.insert(post.clone()).await {
                Ok(saved) => break saved,
                Err(RepoError::Constraint(msg)) if attempt < MAX_SLUG_ATTEMPTS => {
                    tracing::warn!(slug = %post.slug, error = %msg, "Slug collision, regenerating");
                    post.regenerate_slug();
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        };

        tracing::info!(post_id = %post.id, author = %principal.id, slug = %post.slug, "Post created");
        self.resolve(post).await
    }

    pub async fn update(
        &self,
        principal: &Principal,
        id: Uuid,
        mut patch: PostPatch,
    ) -> Result<Resolved<Post>, DomainError> {
        if let Some(title) = patch.title.as_deref() {
            patch.title = Some(required_text("title", title)?);
        }

        let (post, ()) = mutate_post(&*self.posts, id, |post| {
            authorize(principal, post.author_id, Action::UpdatePost)?;
            post.apply(patch.clone());
            Ok(())
        })
        .await?;

        tracing::info!(post_id = %id, by = %principal.id, "Post updated");
        self.resolve(post).await
    }

    /// Delete a post and, with it, all of its comments.
    pub async fn delete(&self, principal: &Principal, id: Uuid) -> Result<(), DomainError> {
        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;

        authorize(principal, post.author_id, Action::DeletePost)?;

        self.posts.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::post_not_found(id),
            other => other.into(),
        })?;

        tracing::info!(post_id = %id, by = %principal.id, "Post deleted");
        Ok(())
    }

    /// Flip the principal's like and return the new like count.
    pub async fn toggle_like(&self, principal: &Principal, id: Uuid) -> Result<usize, DomainError> {
        let (_, likes) = mutate_post(&*self.posts, id, |post| Ok(post.toggle_like(principal.id))).await?;

        tracing::debug!(post_id = %id, user = %principal.id, likes, "Like toggled");
        Ok(likes)
    }

    async fn resolve(&self, post: Post) -> Result<Resolved<Post>, DomainError> {
        let authors = resolve_authors(&*self.users, post.participant_ids()).await?;
        Ok(Resolved {
            value: post,
            authors,
        })
    }
}
