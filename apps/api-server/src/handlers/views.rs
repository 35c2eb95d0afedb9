//! Domain values rendered as response DTOs.

use quill_core::domain::{AuthorProfile, Authors, Comment, Post, PostStatus, User};
use quill_core::services::Session;
use quill_shared::dto::{
    AuthResponse, AuthorResponse, CommentResponse, PostResponse, PostStatusDto,
    PostSummaryResponse, UserResponse,
};

pub fn user(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        bio: user.bio.clone(),
        avatar_url: user.avatar_url.clone(),
        role: user.role.to_string(),
    }
}

pub fn session(session: &Session, expires_in: i64) -> AuthResponse {
    AuthResponse {
        token: session.token.clone(),
        expires_in,
        user: user(&session.user),
    }
}

fn author(profile: AuthorProfile) -> AuthorResponse {
    AuthorResponse {
        id: profile.id,
        name: profile.name,
        avatar_url: profile.avatar_url,
    }
}

pub fn status_from_dto(status: PostStatusDto) -> PostStatus {
    match status {
        PostStatusDto::Draft => PostStatus::Draft,
        PostStatusDto::Published => PostStatus::Published,
    }
}

fn status_to_dto(status: PostStatus) -> PostStatusDto {
    match status {
        PostStatus::Draft => PostStatusDto::Draft,
        PostStatus::Published => PostStatusDto::Published,
    }
}

pub fn post_summary(post: &Post, authors: &Authors) -> PostSummaryResponse {
    PostSummaryResponse {
        id: post.id,
        title: post.title.clone(),
        slug: post.slug.clone(),
        content: post.content.clone(),
        author: author(authors.get(post.author_id)),
        tags: post.tags.clone(),
        status: status_to_dto(post.status),
        liked_by: post.liked_by.iter().copied().collect(),
        likes: post.likes(),
        comments_count: post.comments.len(),
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

pub fn post(post: &Post, authors: &Authors) -> PostResponse {
    PostResponse {
        summary: post_summary(post, authors),
        comments: post.comments.iter().map(|c| comment(c, authors)).collect(),
    }
}

pub fn comment(comment: &Comment, authors: &Authors) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        author: author(authors.get(comment.author_id)),
        text: comment.text.clone(),
        created_at: comment.created_at,
    }
}
