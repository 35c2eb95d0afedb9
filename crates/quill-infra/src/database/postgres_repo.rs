//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Select,
};
use uuid::Uuid;

use quill_core::domain::{Post, PostStatus, User};
use quill_core::error::RepoError;
use quill_core::ports::{PostRepository, UserRepository};
use quill_core::query::{PostFilter, PostQuery};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// Mask an email for logging to avoid PII in logs.
fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = match local.chars().next() {
                Some(first) if local.len() > 1 => format!("{first}***"),
                _ => "***".to_string(),
            };
            format!("{masked_local}{domain}")
        }
        None => "***".to_string(),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        result.map(User::try_from).transpose()
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        UserEntity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let active = user::ActiveModel::try_from(user)?;
        let model = active.update(&self.db).await.map_err(map_db_err)?;

        User::try_from(model)
    }
}

/// Escape LIKE metacharacters so user input only ever matches literally.
fn like_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn published() -> sea_orm::sea_query::SimpleExpr {
    post::Column::Status.eq(PostStatus::Published.as_str())
}

/// Push a [`PostQuery`] down into SQL. Must agree with `PostQuery::matches`.
fn apply_query(select: Select<PostEntity>, query: &PostQuery) -> Select<PostEntity> {
    let select = match query.filter {
        PostFilter::All => select.filter(published()),
        PostFilter::Mine(viewer) => select.filter(post::Column::AuthorId.eq(viewer)),
        PostFilter::Liked(viewer) => select.filter(published()).filter(Expr::cust_with_values(
            "liked_by @> ?",
            [serde_json::json!([viewer])],
        )),
    };

    match query.search() {
        Some(text) => {
            let pattern = like_pattern(text);
            select.filter(
                Condition::any()
                    .add(Expr::cust_with_values("title ILIKE ?", [pattern.clone()]))
                    .add(Expr::cust_with_values("content ILIKE ?", [pattern.clone()]))
                    .add(Expr::cust_with_values(
                        "EXISTS (SELECT 1 FROM jsonb_array_elements_text(tags) AS tag WHERE tag ILIKE ?)",
                        [pattern],
                    )),
            )
        }
        None => select,
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list(&self, query: &PostQuery) -> Result<Vec<Post>, RepoError> {
        apply_query(PostEntity::find(), query)
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(Post::try_from)
            .collect()
    }

    async fn update_versioned(&self, mut post: Post) -> Result<Post, RepoError> {
        let id = post.id;
        let expected = post.version;
        post.version = expected + 1;

        let active = post::ActiveModel::try_from(post.clone())?;
        let result = PostEntity::update_many()
            .set(active)
            .filter(post::Column::Id.eq(id))
            .filter(post::Column::Version.eq(expected))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            let exists = PostEntity::find_by_id(id)
                .one(&self.db)
                .await
                .map_err(map_db_err)?
                .is_some();
            if exists {
                tracing::debug!(post_id = %id, expected, "Stale post version");
                return Err(RepoError::StaleVersion);
            }
            return Err(RepoError::NotFound);
        }

        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
