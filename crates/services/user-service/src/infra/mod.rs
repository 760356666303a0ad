//! Infrastructure layer - database connection and schema.

mod db;
pub mod migrations;

pub use db::{Database, DatabaseCatalog};
pub use migrations::Migrator;

#[cfg(any(test, feature = "test-utils"))]
pub use db::MockDatabaseCatalog;
