//! Registration, login, identity resolution and self-service profiles.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{ProfilePatch, User};
use crate::error::{DomainError, RepoError};
use crate::ports::{PasswordService, TokenService, UserRepository};

const MIN_NAME_CHARS: usize = 2;
const MIN_PASSWORD_CHARS: usize = 6;

/// Input for registering a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// A freshly issued bearer token and the account it belongs to.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: User,
}

pub struct AccountService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    pub fn token_lifetime_seconds(&self) -> i64 {
        self.tokens.expiration_seconds()
    }

    pub async fn register(&self, input: NewAccount) -> Result<Session, DomainError> {
        let name = valid_name(&input.name)?;
        let email = normalize_email(&input.email);
        if !looks_like_email(&email) {
            return Err(DomainError::validation("email", "must be a valid email address"));
        }
        if input.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(DomainError::validation(
                "password",
                format!("must be at least {MIN_PASSWORD_CHARS} characters"),
            ));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(DomainError::Duplicate("Email already registered".to_string()));
        }

        let password_hash = self.passwords.hash(&input.password)?;

        // The unique index still has the last word if two registrations race.
        let user = self
            .users
            .insert(User::new(name, email, password_hash))
            .await
            .map_err(|e| match e {
                RepoError::Constraint(_) => {
                    DomainError::Duplicate("Email already registered".to_string())
                }
                other => other.into(),
            })?;

        tracing::info!(user_id = %user.id, "User registered");
        self.issue(user)
    }

    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, DomainError> {
        let email = normalize_email(email);

        let Some(user) = self.users.find_by_email(&email).await? else {
            return Err(DomainError::InvalidCredentials);
        };

        if !self.passwords.verify(password, &user.password_hash)? {
            tracing::debug!(user_id = %user.id, "Password mismatch");
            return Err(DomainError::InvalidCredentials);
        }

        self.issue(user)
    }

    /// Resolve a bearer token to the current state of its user.
    pub async fn authenticate(&self, token: &str) -> Result<User, DomainError> {
        let claims = self.tokens.validate_token(token)?;

        self.users
            .find_by_id(claims.user_id)
            .await?
            .ok_or_else(|| DomainError::Unauthenticated("Unknown user".to_string()))
    }

    pub async fn profile(&self, user_id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "User",
                id: user_id,
            })
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        mut patch: ProfilePatch,
    ) -> Result<User, DomainError> {
        if let Some(name) = patch.name.as_deref() {
            patch.name = Some(valid_name(name)?);
        }

        let mut user = self.profile(user_id).await?;
        user.apply(patch);

        let user = self.users.update(user).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::NotFound {
                entity_type: "User",
                id: user_id,
            },
            other => other.into(),
        })?;

        tracing::info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }

    fn issue(&self, user: User) -> Result<Session, DomainError> {
        let token = self
            .tokens
            .generate_token(user.id)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(Session { token, user })
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.contains('@'),
        None => false,
    }
}

fn valid_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    if name.chars().count() < MIN_NAME_CHARS {
        return Err(DomainError::validation(
            "name",
            format!("must be at least {MIN_NAME_CHARS} characters"),
        ));
    }
    Ok(name.to_string())
}
