use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A comment, owned by exactly one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(author_id: Uuid, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            text,
            created_at: Utc::now(),
        }
    }
}
