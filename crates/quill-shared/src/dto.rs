//! Data Transfer Objects - request/response types for the API.
//!
//! Field names are camelCase on the wire. Unknown request fields are
//! ignored, so clients cannot smuggle in `author` or `likedBy`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, message = "must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

/// Self-service profile update. Omitted fields are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, message = "must be at least 2 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

/// A user's own account, as returned after login and on `/users/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub bio: String,
    pub avatar_url: String,
    pub role: String,
}

/// Response to register and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatusDto {
    Draft,
    Published,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 300, message = "must be 1 to 300 characters"))]
    pub title: String,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<PostStatusDto>,
}

/// Partial post update. Omitted fields are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 300, message = "must be 1 to 300 characters"))]
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<PostStatusDto>,
}

/// `GET /posts` query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPostsQuery {
    pub filter: Option<String>,
    pub q: Option<String>,
}

/// Display projection of a post or comment author.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub id: Uuid,
    pub name: String,
    pub avatar_url: String,
}

/// Post as shown in listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummaryResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub author: AuthorResponse,
    pub tags: Vec<String>,
    pub status: PostStatusDto,
    pub liked_by: Vec<Uuid>,
    pub likes: usize,
    pub comments_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Post with its comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    #[serde(flatten)]
    pub summary: PostSummaryResponse,
    pub comments: Vec<CommentResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikesResponse {
    pub likes: usize,
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CommentRequest {
    #[validate(length(min = 1, max = 5000, message = "must be 1 to 5000 characters"))]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub author: AuthorResponse,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_rules() {
        let bad = RegisterRequest {
            name: "A".to_string(),
            email: "not-an-email".to_string(),
            password: "123".to_string(),
        };

        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_update_post_accepts_partial_body() {
        let patch: UpdatePostRequest = serde_json::from_str(r#"{"content":"<p>x</p>"}"#).unwrap();

        assert!(patch.validate().is_ok());
        assert!(patch.title.is_none());
        assert_eq!(patch.content.as_deref(), Some("<p>x</p>"));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let patch: UpdatePostRequest =
            serde_json::from_str(r#"{"author":"someone-else","title":"New"}"#).unwrap();

        assert_eq!(patch.title.as_deref(), Some("New"));
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result: Result<CreatePostRequest, _> =
            serde_json::from_str(r#"{"title":"t","status":"archived"}"#);

        assert!(result.is_err());
    }

    #[test]
    fn test_profile_request_uses_camel_case() {
        let req: UpdateProfileRequest =
            serde_json::from_str(r#"{"avatarUrl":"https://img.example/a.png"}"#).unwrap();

        assert_eq!(req.avatar_url.as_deref(), Some("https://img.example/a.png"));
    }
}
