use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a user account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role `{other}`")),
        }
    }
}

/// User entity - represents a registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub bio: String,
    pub avatar_url: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            bio: String::new(),
            avatar_url: String::new(),
            role: Role::User,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a self-service profile update. Omitted fields are left alone.
    pub fn apply(&mut self, patch: ProfilePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(bio) = patch.bio {
            self.bio = bio;
        }
        if let Some(avatar_url) = patch.avatar_url {
            self.avatar_url = avatar_url;
        }
        self.updated_at = Utc::now();
    }
}

/// Fields a user may change on their own profile.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

/// Public display fields of a post or comment author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorProfile {
    pub id: Uuid,
    pub name: String,
    pub avatar_url: String,
}

impl From<&User> for AuthorProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            avatar_url: user.avatar_url.clone(),
        }
    }
}

/// Author profiles keyed by user id, resolved once per response.
#[derive(Debug, Clone, Default)]
pub struct Authors(HashMap<Uuid, AuthorProfile>);

impl Authors {
    pub fn from_users<'a>(users: impl IntoIterator<Item = &'a User>) -> Self {
        Self(
            users
                .into_iter()
                .map(|u| (u.id, AuthorProfile::from(u)))
                .collect(),
        )
    }

    /// Look up an author. Unknown ids resolve to an anonymous profile.
    pub fn get(&self, id: Uuid) -> AuthorProfile {
        self.0.get(&id).cloned().unwrap_or(AuthorProfile {
            id,
            name: String::new(),
            avatar_url: String::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
