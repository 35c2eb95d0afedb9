use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::User;
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, UserRepository};

/// In-memory user store enforcing the unique email index.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;

        if store.contains_key(&user.id) {
            return Err(RepoError::Constraint("users_pkey".to_string()));
        }
        if store.values().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("users_email_key".to_string()));
        }

        store.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        let store = self.store.read().await;
        Ok(ids.iter().filter_map(|id| store.get(id).cloned()).collect())
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;

        if store
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(RepoError::Constraint("users_email_key".to_string()));
        }

        match store.get_mut(&user.id) {
            Some(slot) => {
                *slot = user.clone();
                Ok(user)
            }
            None => Err(RepoError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User::new("Alice".to_string(), email.to_string(), "hash".to_string())
    }

    #[tokio::test]
    async fn test_insert_and_find_by_email() {
        let repo = InMemoryUserRepository::new();
        let alice = repo.insert(user("a@x.com")).await.unwrap();

        let found = repo.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, alice.id);
        assert!(repo.find_by_email("b@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_a_constraint_violation() {
        let repo = InMemoryUserRepository::new();
        repo.insert(user("a@x.com")).await.unwrap();

        let result = repo.insert(user("a@x.com")).await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_find_by_ids_skips_unknown() {
        let repo = InMemoryUserRepository::new();
        let alice = repo.insert(user("a@x.com")).await.unwrap();

        let found = repo.find_by_ids(&[alice.id, Uuid::new_v4()]).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, alice.id);
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let repo = InMemoryUserRepository::new();
        let result = repo.update(user("ghost@x.com")).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }
}
