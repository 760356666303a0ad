//! Database connection and initialization.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseBackend, DatabaseConnection,
    DbErr, Statement,
};
use sea_orm_migration::MigratorTrait;

use common::{AppError, AppResult, DatabaseConfig};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::migrations::Migrator;

/// Read access to the server's catalog of databases.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DatabaseCatalog: Send + Sync {
    /// Names of the databases visible to the current session
    async fn list_databases(&self) -> AppResult<Vec<String>>;
}

/// Database wrapper for connection management.
///
/// Owns the pool for the lifetime of the process; hand out shared handles to
/// repositories and call [`Database::close`] on the way out.
#[derive(Clone)]
pub struct Database {
    connection: Arc<DatabaseConnection>,
}

impl Database {
    /// Open the pool. Fails with `AppError::Connection` if the handshake fails.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .sqlx_logging(config.sql_logging);

        let connection = SeaDatabase::connect(options)
            .await
            .map_err(AppError::connection)?;
        tracing::info!(
            backend = ?connection.get_database_backend(),
            "Database connected"
        );

        Ok(Self::from_connection(connection))
    }

    /// Wrap an existing connection (mock or pre-built pool).
    pub fn from_connection(connection: DatabaseConnection) -> Self {
        Self {
            connection: Arc::new(connection),
        }
    }

    /// Get a shared handle to the database connection.
    pub fn get_connection(&self) -> Arc<DatabaseConnection> {
        Arc::clone(&self.connection)
    }

    /// Release the pool. Consumes the handle so it cannot be closed twice.
    ///
    /// If a repository still holds the connection, the pool is released when
    /// that last handle drops.
    pub async fn close(self) -> AppResult<()> {
        match Arc::try_unwrap(self.connection) {
            Ok(connection) => {
                connection.close().await.map_err(AppError::connection)?;
                tracing::info!("Database connection closed");
            }
            Err(shared) => {
                tracing::debug!(
                    holders = Arc::strong_count(&shared) - 1,
                    "Database connection still shared, released on last drop"
                );
            }
        }
        Ok(())
    }

    /// Run pending migrations.
    pub async fn run_migrations(&self) -> Result<(), DbErr> {
        Migrator::up(&*self.connection, None).await
    }

    /// Rollback the last migration.
    pub async fn rollback_migration(&self) -> Result<(), DbErr> {
        Migrator::down(&*self.connection, Some(1)).await
    }

    /// Get migration status (list all migrations with applied status).
    pub async fn migration_status(&self) -> Result<Vec<(String, bool)>, DbErr> {
        use sea_orm::{EntityTrait, QueryOrder};
        use sea_orm_migration::seaql_migrations;

        // Get applied migrations from database
        let applied: std::collections::HashSet<String> = seaql_migrations::Entity::find()
            .order_by_asc(seaql_migrations::Column::Version)
            .all(&*self.connection)
            .await?
            .into_iter()
            .map(|m| m.version)
            .collect();

        let migrations: Vec<(String, bool)> = Migrator::migrations()
            .iter()
            .map(|m| {
                let name = m.name().to_string();
                let is_applied = applied.contains(&name);
                (name, is_applied)
            })
            .collect();

        Ok(migrations)
    }

    /// Reset database and run all migrations fresh.
    pub async fn fresh_migrations(&self) -> Result<(), DbErr> {
        Migrator::fresh(&*self.connection).await
    }
}

#[async_trait]
impl DatabaseCatalog for Database {
    async fn list_databases(&self) -> AppResult<Vec<String>> {
        let backend = self.connection.get_database_backend();
        let rows = self
            .connection
            .query_all(Statement::from_string(backend, catalog_query(backend)))
            .await?;

        let names = rows
            .iter()
            .map(|row| row.try_get::<String>("", "name"))
            .collect::<Result<Vec<_>, DbErr>>()?;

        Ok(names)
    }
}

/// Backend-specific query listing database names in a `name` column.
fn catalog_query(backend: DatabaseBackend) -> &'static str {
    match backend {
        DatabaseBackend::Postgres => {
            "SELECT datname AS name FROM pg_database WHERE NOT datistemplate ORDER BY datname"
        }
        DatabaseBackend::MySql => {
            "SELECT schema_name AS name FROM information_schema.schemata ORDER BY schema_name"
        }
        DatabaseBackend::Sqlite => "SELECT name FROM pragma_database_list ORDER BY seq",
    }
}
