//! Read-side filtering for post listings.

use std::str::FromStr;

use uuid::Uuid;

use crate::domain::Post;

/// Which posts a listing draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFilter {
    /// Every published post.
    All,
    /// Every post by the viewer, drafts included.
    Mine(Uuid),
    /// Published posts the viewer has liked.
    Liked(Uuid),
}

/// Filter name as accepted on the wire, before a viewer is attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterKind {
    #[default]
    All,
    My,
    Liked,
}

impl FilterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::All => "all",
            FilterKind::My => "my",
            FilterKind::Liked => "liked",
        }
    }
}

impl FromStr for FilterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(FilterKind::All),
            "my" => Ok(FilterKind::My),
            "liked" => Ok(FilterKind::Liked),
            other => Err(format!("unknown filter `{other}`")),
        }
    }
}

/// A listing request: filter plus optional free-text search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    pub filter: PostFilter,
    search: Option<String>,
}

impl PostQuery {
    pub fn new(filter: PostFilter, search: Option<&str>) -> Self {
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Self { filter, search }
    }

    /// The trimmed search text, if any.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// In-memory evaluation of the query. Store adapters that push the query
    /// down must agree with this predicate.
    pub fn matches(&self, post: &Post) -> bool {
        let in_scope = match self.filter {
            PostFilter::All => post.is_published(),
            PostFilter::Mine(viewer) => post.author_id == viewer,
            PostFilter::Liked(viewer) => post.is_published() && post.is_liked_by(viewer),
        };

        in_scope && self.search.as_deref().is_none_or(|q| text_matches(post, q))
    }
}

/// Case-insensitive substring match on title, content or any tag.
fn text_matches(post: &Post, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    let hit = |haystack: &str| haystack.to_lowercase().contains(&needle);

    hit(&post.title) || hit(&post.content) || post.tags.iter().any(|t| hit(t))
}

/// Newest-created first, id as a tie breaker for a stable order.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}
