//! Authorization policy for post and comment mutations.

use std::fmt;

use uuid::Uuid;

use crate::domain::{Role, User};
use crate::error::DomainError;

/// The authenticated actor of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub id: Uuid,
    pub role: Role,
}

impl Principal {
    pub fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self::new(user.id, user.role)
    }
}

/// Mutations guarded by ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    UpdatePost,
    DeletePost,
    UpdateComment,
    DeleteComment,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::UpdatePost => "update_post",
            Action::DeletePost => "delete_post",
            Action::UpdateComment => "update_comment",
            Action::DeleteComment => "delete_comment",
        };
        f.write_str(name)
    }
}

/// A principal may mutate a resource it owns; admins may mutate anything.
/// The rule is the same for every action.
pub fn can_mutate(principal: &Principal, owner_id: Uuid, _action: Action) -> bool {
    principal.id == owner_id || principal.is_admin()
}

/// [`can_mutate`] as a `Result`, logging denials.
pub fn authorize(principal: &Principal, owner_id: Uuid, action: Action) -> Result<(), DomainError> {
    if can_mutate(principal, owner_id, action) {
        return Ok(());
    }

    tracing::info!(
        principal = %principal.id,
        owner = %owner_id,
        action = %action,
        "Mutation denied"
    );
    Err(DomainError::Forbidden)
}
