//! Domain entities - the core business objects.

mod comment;
mod post;
pub mod slug;
mod user;

pub use comment::Comment;
pub use post::{NewPost, Post, PostPatch, PostStatus};
pub use user::{AuthorProfile, Authors, ProfilePatch, Role, User};
