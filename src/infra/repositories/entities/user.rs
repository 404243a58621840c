//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Identity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::note::Entity")]
    Notes,
}

impl Related<super::note::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity.
///
/// A role string outside the known set is a data error, not a silent
/// downgrade.
impl TryFrom<Model> for Identity {
    type Error = DbErr;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let role = model
            .role
            .parse()
            .map_err(|e: crate::domain::UnknownRole| DbErr::Type(e.to_string()))?;

        Ok(Identity {
            id: model.id,
            username: model.username,
            password_hash: model.password_hash,
            role,
            created_at: model.created_at,
        })
    }
}
