//! Comment lifecycle. Comments live inside their post; every change is a
//! versioned write of the whole aggregate.

use std::sync::Arc;

use uuid::Uuid;

use super::{Resolved, mutate_post, required_text, resolve_authors};
use crate::domain::{Comment, Post};
use crate::error::DomainError;
use crate::policy::{Action, Principal, authorize};
use crate::ports::{PostRepository, UserRepository};

pub struct CommentService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl CommentService {
    pub fn new(posts: Arc<dyn PostRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { posts, users }
    }

    /// Comments of a post in creation order.
    pub async fn list(&self, post_id: Uuid) -> Result<Resolved<Vec<Comment>>, DomainError> {
        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(post_id))?;

        let authors = resolve_authors(&*self.users, post.comments.iter().map(|c| c.author_id)).await?;
        Ok(Resolved {
            value: post.comments,
            authors,
        })
    }

    pub async fn add(
        &self,
        principal: &Principal,
        post_id: Uuid,
        text: &str,
    ) -> Result<Resolved<Comment>, DomainError> {
        let text = required_text("text", text)?;

        let (_, comment) = mutate_post(&*self.posts, post_id, |post| {
            Ok(post.add_comment(Comment::new(principal.id, text.clone())).clone())
        })
        .await?;

        tracing::info!(post_id = %post_id, comment_id = %comment.id, "Comment added");
        self.resolve(comment).await
    }

    /// Edit a comment's text. Ownership is checked against the comment's
    /// author, not the post's.
    pub async fn update(
        &self,
        principal: &Principal,
        post_id: Uuid,
        comment_id: Uuid,
        text: &str,
    ) -> Result<Resolved<Comment>, DomainError> {
        let text = required_text("text", text)?;

        let (_, comment) = mutate_post(&*self.posts, post_id, |post| {
            let comment = find_comment(post, comment_id)?;
            authorize(principal, comment.author_id, Action::UpdateComment)?;

            post.edit_comment(comment_id, text.clone())
                .cloned()
                .ok_or_else(|| comment_not_found(comment_id))
        })
        .await?;

        tracing::info!(post_id = %post_id, comment_id = %comment_id, by = %principal.id, "Comment updated");
        self.resolve(comment).await
    }

    pub async fn delete(
        &self,
        principal: &Principal,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<(), DomainError> {
        mutate_post(&*self.posts, post_id, |post| {
            let comment = find_comment(post, comment_id)?;
            authorize(principal, comment.author_id, Action::DeleteComment)?;

            post.remove_comment(comment_id)
                .map(|_| ())
                .ok_or_else(|| comment_not_found(comment_id))
        })
        .await?;

        tracing::info!(post_id = %post_id, comment_id = %comment_id, by = %principal.id, "Comment deleted");
        Ok(())
    }

    async fn resolve(&self, comment: Comment) -> Result<Resolved<Comment>, DomainError> {
        let authors = resolve_authors(&*self.users, [comment.author_id]).await?;
        Ok(Resolved {
            value: comment,
            authors,
        })
    }
}

fn find_comment(post: &Post, comment_id: Uuid) -> Result<&Comment, DomainError> {
    post.comment(comment_id)
        .ok_or_else(|| comment_not_found(comment_id))
}

fn comment_not_found(id: Uuid) -> DomainError {
    DomainError::NotFound {
        entity_type: "Comment",
        id,
    }
}
