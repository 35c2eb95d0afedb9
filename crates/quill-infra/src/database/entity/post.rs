//! Post entity for SeaORM.
//!
//! One row holds the whole aggregate: tags, likes and comments are `jsonb`
//! columns, so a post and its comments are written and deleted together.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quill_core::domain::Post;
use quill_core::error::RepoError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,
    pub status: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub liked_by: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub comments: Json,
    pub version: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

fn from_json<T: serde::de::DeserializeOwned>(column: &str, value: Json) -> Result<T, RepoError> {
    serde_json::from_value(value).map_err(|e| RepoError::Corrupt(format!("posts.{column}: {e}")))
}

fn to_json<T: serde::Serialize>(column: &str, value: &T) -> Result<Json, RepoError> {
    serde_json::to_value(value).map_err(|e| RepoError::Corrupt(format!("posts.{column}: {e}")))
}

/// Conversion from SeaORM Model to Domain Post.
impl TryFrom<Model> for Post {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            author_id: model.author_id,
            title: model.title,
            slug: model.slug,
            content: model.content,
            tags: from_json("tags", model.tags)?,
            status: model.status.parse().map_err(RepoError::Corrupt)?,
            liked_by: from_json("liked_by", model.liked_by)?,
            comments: from_json("comments", model.comments)?,
            version: model.version,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        })
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl TryFrom<Post> for ActiveModel {
    type Error = RepoError;

    fn try_from(post: Post) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Set(post.id),
            author_id: Set(post.author_id),
            title: Set(post.title),
            slug: Set(post.slug),
            content: Set(post.content),
            tags: Set(to_json("tags", &post.tags)?),
            status: Set(post.status.to_string()),
            liked_by: Set(to_json("liked_by", &post.liked_by)?),
            comments: Set(to_json("comments", &post.comments)?),
            version: Set(post.version),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        })
    }
}
