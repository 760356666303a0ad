//! Startup sequence: the read queries run after connecting.

use serde::Serialize;

use common::AppResult;
use domain::User;

use crate::infra::DatabaseCatalog;
use crate::repository::UserRepository;

/// Results of the startup queries, in the order they ran.
#[derive(Debug, Clone, Serialize)]
pub struct StartupReport {
    pub users: Vec<User>,
    pub user: User,
    pub databases: Vec<String>,
}

/// List users, look one up by id, then list databases.
///
/// Stops at the first failure.
pub async fn run(
    users: &dyn UserRepository,
    catalog: &dyn DatabaseCatalog,
    lookup_id: i32,
) -> AppResult<StartupReport> {
    let all = users.list().await?;
    tracing::info!(count = all.len(), users = ?all, "Fetched users");

    let user = users.find_by_id(lookup_id).await?;
    tracing::info!(user = %user, "Fetched user by ID");

    let databases = catalog.list_databases().await?;
    tracing::info!(databases = ?databases, "Fetched databases");

    Ok(StartupReport {
        users: all,
        user,
        databases,
    })
}
