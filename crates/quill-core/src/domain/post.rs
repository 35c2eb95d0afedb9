use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::comment::Comment;
use super::slug;

/// Publication state of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    #[default]
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            other => Err(format!("unknown post status `{other}`")),
        }
    }
}

/// Post aggregate - a blog post together with its comments and likes.
///
/// `author_id` and `slug` are fixed at creation. `version` increases by one on
/// every successful write and guards read-modify-write cycles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub tags: Vec<String>,
    pub status: PostStatus,
    pub liked_by: BTreeSet<Uuid>,
    pub comments: Vec<Comment>,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a post.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: String,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<PostStatus>,
}

/// Partial update of a post. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<PostStatus>,
}

impl Post {
    /// Create a new post owned by `author_id`.
    pub fn new(author_id: Uuid, input: NewPost) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            slug: slug::unique_slug(&input.title, now),
            title: input.title,
            content: input.content.unwrap_or_default(),
            tags: normalize_tags(input.tags.unwrap_or_default()),
            status: input.status.unwrap_or_default(),
            liked_by: BTreeSet::new(),
            comments: Vec::new(),
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    /// Draw a fresh slug suffix after a collision. Only valid before the
    /// post has been stored.
    pub fn regenerate_slug(&mut self) {
        self.slug = slug::unique_slug(&self.title, self.created_at);
    }

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    /// Overwrite the supplied fields. Author and slug never change.
    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(tags) = patch.tags {
            self.tags = normalize_tags(tags);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.touch();
    }

    /// Flip `user_id`'s like and return the resulting like count.
    pub fn toggle_like(&mut self, user_id: Uuid) -> usize {
        if !self.liked_by.remove(&user_id) {
            self.liked_by.insert(user_id);
        }
        self.touch();
        self.liked_by.len()
    }

    pub fn likes(&self) -> usize {
        self.liked_by.len()
    }

    pub fn is_liked_by(&self, user_id: Uuid) -> bool {
        self.liked_by.contains(&user_id)
    }

    /// Append a comment and return a reference to it.
    pub fn add_comment(&mut self, comment: Comment) -> &Comment {
        self.comments.push(comment);
        self.touch();
        &self.comments[self.comments.len() - 1]
    }

    pub fn comment(&self, comment_id: Uuid) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == comment_id)
    }

    /// Replace a comment's text. Author and timestamp stay as they were.
    pub fn edit_comment(&mut self, comment_id: Uuid, text: String) -> Option<&Comment> {
        let idx = self.comments.iter().position(|c| c.id == comment_id)?;
        self.comments[idx].text = text;
        self.touch();
        Some(&self.comments[idx])
    }

    /// Remove one comment, keeping the order of the others.
    pub fn remove_comment(&mut self, comment_id: Uuid) -> Option<Comment> {
        let idx = self.comments.iter().position(|c| c.id == comment_id)?;
        let removed = self.comments.remove(idx);
        self.touch();
        Some(removed)
    }

    /// Ids of the post author and every comment author.
    pub fn participant_ids(&self) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = std::iter::once(self.author_id)
            .chain(self.comments.iter().map(|c| c.author_id))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Trim tags, drop empty ones and keep only the first occurrence of each.
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty() && seen.insert(t.clone()))
        .collect()
}
