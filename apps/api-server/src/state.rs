//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{PasswordService, PostRepository, TokenService, UserRepository};
use quill_core::services::{AccountService, CommentService, PostService};
use quill_infra::{
    Argon2PasswordService, InMemoryPostRepository, InMemoryUserRepository, JwtTokenService,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService>,
    pub posts: Arc<PostService>,
    pub comments: Arc<CommentService>,
}

type Repositories = (Arc<dyn UserRepository>, Arc<dyn PostRepository>);

impl AppState {
    /// Build the application state from configuration. A configured but
    /// unreachable database is a startup error.
    pub async fn new(config: &AppConfig) -> Result<Self, String> {
        let (users, posts) = repositories(config).await?;
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));

        tracing::info!("Application state initialized");
        Ok(Self::from_parts(users, posts, tokens))
    }

    /// Fresh in-memory state.
    pub fn in_memory(tokens: Arc<dyn TokenService>) -> Self {
        Self::from_parts(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryPostRepository::new()),
            tokens,
        )
    }

    fn from_parts(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        Self {
            accounts: Arc::new(AccountService::new(users.clone(), passwords, tokens)),
            posts: Arc::new(PostService::new(posts.clone(), users.clone())),
            comments: Arc::new(CommentService::new(posts, users)),
        }
    }
}

#[cfg(feature = "postgres")]
async fn repositories(config: &AppConfig) -> Result<Repositories, String> {
    use quill_infra::database::connect;
    use quill_infra::{PostgresPostRepository, PostgresUserRepository};

    let Some(db_config) = config.database.as_ref() else {
        return Ok(in_memory_repositories());
    };

    let conn = connect(db_config)
        .await
        .map_err(|e| format!("Failed to connect to database: {e}"))?;

    Ok((
        Arc::new(PostgresUserRepository::new(conn.clone())),
        Arc::new(PostgresPostRepository::new(conn)),
    ))
}

#[cfg(not(feature = "postgres"))]
async fn repositories(_config: &AppConfig) -> Result<Repositories, String> {
    tracing::info!("Running without postgres feature");
    Ok(in_memory_repositories())
}

fn in_memory_repositories() -> Repositories {
    tracing::warn!("DATABASE_URL not set. Running with in-memory repositories; data is lost on exit.");
    (
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryPostRepository::new()),
    )
}
