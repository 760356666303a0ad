//! User repository integration tests against an in-memory SQLite database.

use common::{AppError, DatabaseConfig};
use domain::{CreateUser, UpdateUser, User};
use user_service_lib::infra::{Database, DatabaseCatalog};
use user_service_lib::repository::{UserRepository, UserStore};
use user_service_lib::startup;

/// Fresh database with the schema applied.
///
/// A single pooled connection keeps every statement on the same in-memory database.
async fn setup() -> (Database, UserStore) {
    let config = DatabaseConfig {
        max_connections: 1,
        min_connections: 1,
        ..DatabaseConfig::with_url("sqlite::memory:")
    };
    let db = Database::connect(&config).await.unwrap();
    db.run_migrations().await.unwrap();

    let store = UserStore::new(db.get_connection());
    (db, store)
}

#[tokio::test]
async fn test_list_empty_table() {
    let (_db, store) = setup().await;

    let users = store.list().await.unwrap();

    assert!(users.is_empty());
}

#[tokio::test]
async fn test_insert_then_get_round_trip() {
    let (_db, store) = setup().await;

    for (name, age) in [("Alice", 40), ("", 0), ("Zoë O'Brien", -3), ("Bob", i32::MAX)] {
        let id = store.create(CreateUser::new(name, age)).await.unwrap();
        let user = store.find_by_id(id).await.unwrap();
        assert_eq!(user, User::new(id, name, age));
    }
}

#[tokio::test]
async fn test_generated_ids_are_unique() {
    let (_db, store) = setup().await;

    let first = store.create(CreateUser::new("Alice", 40)).await.unwrap();
    let second = store.create(CreateUser::new("Alice", 40)).await.unwrap();

    assert_ne!(first, second);

    let mut ids: Vec<i32> = store.list().await.unwrap().iter().map(|u| u.id).collect();
    ids.sort_unstable();
    let mut expected = vec![first, second];
    expected.sort_unstable();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_get_missing_id_is_not_found() {
    let (_db, store) = setup().await;
    store.create(CreateUser::new("Alice", 40)).await.unwrap();

    for id in [0, -1, 9999] {
        let result = store.find_by_id(id).await;
        assert!(matches!(result, Err(AppError::NotFound)), "id {}", id);
    }
}

#[tokio::test]
async fn test_update_is_last_write_wins() {
    let (_db, store) = setup().await;
    let id = store.create(CreateUser::new("Alice", 40)).await.unwrap();

    let rows = store.update(id, UpdateUser::new("Bass", 30)).await.unwrap();
    assert_eq!(rows, 1);
    let rows = store.update(id, UpdateUser::new("Carol", 31)).await.unwrap();
    assert_eq!(rows, 1);

    let user = store.find_by_id(id).await.unwrap();
    assert_eq!(user, User::new(id, "Carol", 31));
}

#[tokio::test]
async fn test_update_only_touches_matching_row() {
    let (_db, store) = setup().await;
    let alice = store.create(CreateUser::new("Alice", 40)).await.unwrap();
    let bob = store.create(CreateUser::new("Bob", 25)).await.unwrap();

    store.update(alice, UpdateUser::new("Bass", 30)).await.unwrap();

    assert_eq!(store.find_by_id(bob).await.unwrap(), User::new(bob, "Bob", 25));
}

#[tokio::test]
async fn test_update_missing_id_affects_nothing() {
    let (_db, store) = setup().await;

    let rows = store.update(404, UpdateUser::new("Ghost", 1)).await.unwrap();

    assert_eq!(rows, 0);
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let (_db, store) = setup().await;
    let id = store.create(CreateUser::new("Alice", 40)).await.unwrap();

    assert_eq!(store.delete(id).await.unwrap(), 1);
    assert!(matches!(store.find_by_id(id).await, Err(AppError::NotFound)));

    // Deleting again, or deleting an id that never existed, still succeeds
    assert_eq!(store.delete(id).await.unwrap(), 0);
    assert_eq!(store.delete(12345).await.unwrap(), 0);
    assert!(matches!(store.find_by_id(12345).await, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_alice_bass_scenario() {
    let (_db, store) = setup().await;

    let n = store.create(CreateUser::new("Alice", 40)).await.unwrap();
    assert_eq!(store.find_by_id(n).await.unwrap(), User::new(n, "Alice", 40));

    store.update(n, UpdateUser::new("Bass", 30)).await.unwrap();
    assert_eq!(store.find_by_id(n).await.unwrap(), User::new(n, "Bass", 30));

    store.delete(n).await.unwrap();
    assert!(matches!(store.find_by_id(n).await, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_query_error_without_schema() {
    let config = DatabaseConfig {
        max_connections: 1,
        min_connections: 1,
        ..DatabaseConfig::with_url("sqlite::memory:")
    };
    let db = Database::connect(&config).await.unwrap();
    let store = UserStore::new(db.get_connection());

    let err = store.list().await.unwrap_err();

    assert_eq!(err.code(), "QUERY_ERROR");
}

#[tokio::test]
async fn test_connect_failure_is_connection_error() {
    let config = DatabaseConfig {
        connect_timeout_secs: 1,
        ..DatabaseConfig::with_url("sqlite:///nonexistent-dir/users.db?mode=ro")
    };

    let result = Database::connect(&config).await;

    assert!(matches!(result, Err(AppError::Connection(_))));
}

#[tokio::test]
async fn test_startup_sequence() {
    let (db, store) = setup().await;
    store.create(CreateUser::new("Alice", 40)).await.unwrap();
    let bob = store.create(CreateUser::new("Bob", 25)).await.unwrap();

    let report = startup::run(&store, &db, bob).await.unwrap();

    assert_eq!(report.users.len(), 2);
    assert_eq!(report.user, User::new(bob, "Bob", 25));
    assert!(report.databases.contains(&"main".to_string()));
}

#[tokio::test]
async fn test_list_databases_on_sqlite() {
    let (db, _store) = setup().await;

    let names = db.list_databases().await.unwrap();

    assert_eq!(names.first().map(String::as_str), Some("main"));
}

#[tokio::test]
async fn test_migration_status_after_up() {
    let (db, _store) = setup().await;

    let status = db.migration_status().await.unwrap();

    assert!(!status.is_empty());
    assert!(status.iter().all(|(_, applied)| *applied));

    db.close().await.unwrap();
}
