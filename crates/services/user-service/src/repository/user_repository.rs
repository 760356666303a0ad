//! User repository implementation.
//!
//! Every operation is a single parameterized statement executed against the
//! injected connection. Nothing is cached between calls and nothing is logged
//! here; failures go straight back to the caller.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppResult, OptionExt};
use domain::{CreateUser, UpdateUser, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List all users in storage order (no ordering is imposed)
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Find user by ID, `AppError::NotFound` when no row matches
    async fn find_by_id(&self, id: i32) -> AppResult<User>;

    /// Insert a user and return the id generated by the database
    async fn create(&self, user: CreateUser) -> AppResult<i32>;

    /// Overwrite name and age, returning the number of rows affected.
    ///
    /// A missing id is not an error; it affects zero rows.
    async fn update(&self, id: i32, changes: UpdateUser) -> AppResult<u64>;

    /// Delete user by ID, returning the number of rows affected.
    ///
    /// A missing id is not an error; it affects zero rows.
    async fn delete(&self, id: i32) -> AppResult<u64>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: Arc<DatabaseConnection>,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find().all(&*self.db).await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<User> {
        UserEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(User::from)
            .ok_or_not_found()
    }

    async fn create(&self, user: CreateUser) -> AppResult<i32> {
        // RETURNING on Postgres, last-insert-id elsewhere: one round trip either way
        let result = UserEntity::insert(ActiveModel::from(user))
            .exec(&*self.db)
            .await?;

        Ok(result.last_insert_id)
    }

    async fn update(&self, id: i32, changes: UpdateUser) -> AppResult<u64> {
        let result = UserEntity::update_many()
            .col_expr(user::Column::Name, Expr::value(changes.name))
            .col_expr(user::Column::Age, Expr::value(changes.age))
            .filter(user::Column::Id.eq(id))
            .exec(&*self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn delete(&self, id: i32) -> AppResult<u64> {
        let result = UserEntity::delete_by_id(id).exec(&*self.db).await?;

        Ok(result.rows_affected)
    }
}
