//! User Service Library
//!
//! Data access for the `users` table: a connection handle opened once at
//! startup, a repository with the five CRUD operations, and the startup
//! sequence that exercises them.

pub mod config;
pub mod infra;
pub mod output;
pub mod repository;
pub mod startup;

use tracing::info;

use common::AppResult;
use domain::{CreateUser, UpdateUser};

use crate::config::UserServiceConfig;
use crate::infra::{Database, DatabaseCatalog};
use crate::output::{Mutation, OutputFormat};
use crate::repository::{UserRepository, UserStore};

/// Operation requested on the command line.
#[derive(Debug, Clone)]
pub enum UserAction {
    /// List users, fetch one by id, list databases
    Startup { user_id: i32 },
    List,
    Get { id: i32 },
    Create(CreateUser),
    Update { id: i32, changes: UpdateUser },
    Delete { id: i32 },
    Databases,
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Connect, run one action, and close the connection.
///
/// The connection is closed whether or not the action succeeded; the
/// action's error takes precedence over a close error.
pub async fn run(
    config: &UserServiceConfig,
    action: UserAction,
    format: OutputFormat,
) -> AppResult<()> {
    let db = Database::connect(&config.database).await?;
    if format == OutputFormat::Text {
        println!("Connected to database successfully!");
    }

    let result = execute(&db, config, action, format).await;
    let closed = db.close().await;

    result?;
    closed
}

async fn execute(
    db: &Database,
    config: &UserServiceConfig,
    action: UserAction,
    format: OutputFormat,
) -> AppResult<()> {
    if config.auto_migrate {
        db.run_migrations().await?;
        info!("Migrations applied");
    }

    let users = UserStore::new(db.get_connection());

    let rendered = match action {
        UserAction::Startup { user_id } => {
            let report = startup::run(&users, db, user_id).await?;
            format.startup(&report)?
        }
        UserAction::List => format.users(&users.list().await?)?,
        UserAction::Get { id } => format.user(&users.find_by_id(id).await?)?,
        UserAction::Create(params) => {
            let id = users.create(params).await?;
            info!(id, "Inserted user");
            format.created(id)?
        }
        UserAction::Update { id, changes } => {
            let rows = users.update(id, changes).await?;
            info!(id, rows, "Updated user");
            format.affected(Mutation::Update, id, rows)?
        }
        UserAction::Delete { id } => {
            let rows = users.delete(id).await?;
            info!(id, rows, "Deleted user");
            format.affected(Mutation::Delete, id, rows)?
        }
        UserAction::Databases => format.databases(&db.list_databases().await?)?,
    };

    println!("{}", rendered);
    Ok(())
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(config: &UserServiceConfig, action: MigrateAction) -> AppResult<()> {
    let db = Database::connect(&config.database).await?;

    let result = match action {
        MigrateAction::Up => db.run_migrations().await.map(|_| {
            info!("Migrations applied successfully");
        }),
        MigrateAction::Down => db.rollback_migration().await.map(|_| {
            info!("Rolled back last migration");
        }),
        MigrateAction::Status => db.migration_status().await.map(|status| {
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }),
        MigrateAction::Fresh => {
            tracing::warn!("Resetting database and running all migrations");
            db.fresh_migrations().await.map(|_| {
                info!("Database reset and migrations applied");
            })
        }
    };
    let closed = db.close().await;

    result?;
    closed
}
