//! User entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use quill_core::domain::User;
use quill_core::error::RepoError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    #[sea_orm(column_type = "Text")]
    pub bio: String,
    pub avatar_url: String,
    pub role: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain User.
impl TryFrom<Model> for User {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
            bio: model.bio,
            avatar_url: model.avatar_url,
            role: model.role.parse().map_err(RepoError::Corrupt)?,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        })
    }
}

/// Conversion from Domain User to SeaORM ActiveModel.
impl TryFrom<User> for ActiveModel {
    type Error = RepoError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Set(user.id),
            name: Set(user.name),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            bio: Set(user.bio),
            avatar_url: Set(user.avatar_url),
            role: Set(user.role.to_string()),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
        })
    }
}
