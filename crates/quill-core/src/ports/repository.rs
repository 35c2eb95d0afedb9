use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, User};
use crate::error::RepoError;
use crate::query::PostQuery;

/// Operations every aggregate store offers.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Store a new entity. Unique-index violations surface as
    /// [`RepoError::Constraint`].
    async fn insert(&self, entity: T) -> Result<T, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their (normalized) email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Fetch every user in `ids`. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError>;

    /// Overwrite an existing user.
    async fn update(&self, user: User) -> Result<User, RepoError>;
}

/// Post repository. A post row is the whole aggregate: comments and likes
/// are stored with it.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Posts matching `query`, newest first.
    async fn list(&self, query: &PostQuery) -> Result<Vec<Post>, RepoError>;

    /// Write `post` only if the stored version still equals `post.version`.
    /// Returns the post with its version bumped, [`RepoError::StaleVersion`]
    /// when someone else wrote first, or [`RepoError::NotFound`].
    async fn update_versioned(&self, post: Post) -> Result<Post, RepoError>;

    /// Remove a post together with its comments.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}
