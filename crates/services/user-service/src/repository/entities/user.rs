//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use domain::{CreateUser, User};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Generated by the database on insert
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub age: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            name: model.name,
            age: model.age,
        }
    }
}

/// Bind insert parameters, leaving the id to the storage engine
impl From<CreateUser> for ActiveModel {
    fn from(params: CreateUser) -> Self {
        ActiveModel {
            id: NotSet,
            name: Set(params.name),
            age: Set(params.age),
        }
    }
}
