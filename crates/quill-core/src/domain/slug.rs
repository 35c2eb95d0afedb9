//! URL slugs for posts.

use chrono::{DateTime, Utc};
use uuid::Uuid;

const FALLBACK: &str = "post";

/// Lower-case a title and keep ASCII alphanumerics, joining every other run
/// of characters into a single dash.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        FALLBACK.to_string()
    } else {
        slug
    }
}

/// Build a slug for a new post: the slugified title plus a suffix made of the
/// creation time's last five millisecond digits and four random hex digits.
///
/// Collisions are still possible; the store's unique index is the final word
/// and callers regenerate on conflict.
pub fn unique_slug(title: &str, created_at: DateTime<Utc>) -> String {
    let millis = created_at.timestamp_millis().rem_euclid(100_000);
    let entropy = Uuid::new_v4().simple().to_string();
    format!("{}-{:05}{}", slugify(title), millis, &entropy[..4])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic_title() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn test_slugify_collapses_and_trims_separators() {
        assert_eq!(slugify("  Rust -- & Tokio!! "), "rust-tokio");
        assert_eq!(slugify("C'est la vie"), "c-est-la-vie");
    }

    #[test]
    fn test_slugify_falls_back_for_symbol_only_titles() {
        assert_eq!(slugify("!!!"), "post");
        assert_eq!(slugify("日本語"), "post");
    }

    #[test]
    fn test_unique_slug_has_title_prefix_and_suffix() {
        let now = Utc::now();
        let slug = unique_slug("Hello World", now);

        assert!(slug.starts_with("hello-world-"));
        assert_eq!(slug.len(), "hello-world-".len() + 9);
    }

    #[test]
    fn test_unique_slug_suffix_is_millis_then_hex() {
        let created_at = DateTime::from_timestamp_millis(1_700_000_012_345).unwrap();
        let slug = unique_slug("Hello World", created_at);
        let suffix = slug.strip_prefix("hello-world-").unwrap();

        assert_eq!(&suffix[..5], "12345");
        assert!(suffix[5..].chars().all(|c| c.is_ascii_hexdigit()));
    }
}
