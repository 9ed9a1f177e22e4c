//! Migration tests - verify the schema and the legacy data conversions
//!
//! Tests cover:
//! - Applying and rolling back all migrations
//! - Table structure, foreign keys and indexes
//! - Adopting a database written by older releases (legacy species flags,
//!   batches table without a species reference)

use sea_orm::{ConnectionTrait, DatabaseConnection, QueryResult, Statement};
use sea_orm_migration::MigratorTrait;

mod common;
use common::create_empty_db;

use plant_tracker::migrations::{convert_legacy_stratification, Migrator, DEFAULT_LEGACY_DAYS};

async fn execute(db: &DatabaseConnection, sql: &str) {
    db.execute(Statement::from_string(db.get_database_backend(), sql))
        .await
        .unwrap_or_else(|e| panic!("Failed to execute `{}`: {}", sql, e));
}

async fn query(db: &DatabaseConnection, sql: &str) -> Vec<QueryResult> {
    db.query_all(Statement::from_string(db.get_database_backend(), sql))
        .await
        .unwrap_or_else(|e| panic!("Failed to query `{}`: {}", sql, e))
}

/// Helper to get table names from the database
async fn get_table_names(db: &DatabaseConnection) -> Vec<String> {
    query(
        db,
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name NOT LIKE 'seaql_%' ORDER BY name",
    )
    .await
    .iter()
    .filter_map(|row| row.try_get::<String>("", "name").ok())
    .collect()
}

async fn get_column_names(db: &DatabaseConnection, table: &str) -> Vec<String> {
    query(db, &format!("PRAGMA table_info({})", table))
        .await
        .iter()
        .filter_map(|row| row.try_get::<String>("", "name").ok())
        .collect()
}

/// (from column, referenced table, on_delete action)
async fn get_foreign_keys(db: &DatabaseConnection, table: &str) -> Vec<(String, String, String)> {
    query(db, &format!("PRAGMA foreign_key_list({})", table))
        .await
        .iter()
        .filter_map(|row| {
            let from: String = row.try_get("", "from").ok()?;
            let table: String = row.try_get("", "table").ok()?;
            let on_delete: String = row.try_get("", "on_delete").ok()?;
            Some((from, table, on_delete))
        })
        .collect()
}

async fn get_indexes(db: &DatabaseConnection, table: &str) -> Vec<String> {
    query(
        db,
        &format!(
            "SELECT name FROM sqlite_master WHERE type='index' AND tbl_name='{}' AND name NOT LIKE 'sqlite_%'",
            table
        ),
    )
    .await
    .iter()
    .filter_map(|row| row.try_get::<String>("", "name").ok())
    .collect()
}

/// (step_order, type, moist, days) for every step of a species
async fn get_steps(db: &DatabaseConnection, species_id: i64) -> Vec<(i32, String, bool, i32)> {
    query(
        db,
        &format!(
            "SELECT step_order, type, moist, days FROM stratification_steps WHERE species_id = {} ORDER BY step_order",
            species_id
        ),
    )
    .await
    .iter()
    .map(|row| {
        (
            row.try_get("", "step_order").unwrap(),
            row.try_get("", "type").unwrap(),
            row.try_get("", "moist").unwrap(),
            row.try_get("", "days").unwrap(),
        )
    })
    .collect()
}

/// Species table as written by older releases, before steps existed
async fn create_legacy_species_table(db: &DatabaseConnection) {
    execute(
        db,
        "CREATE TABLE species (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            cold_stratified BOOLEAN NOT NULL DEFAULT 0,
            stratification_days INTEGER
        )",
    )
    .await;
}

// =============================================================================
// Schema
// =============================================================================

#[tokio::test]
async fn test_migrations_create_all_tables() {
    let db = create_empty_db().await;
    Migrator::up(&db, None)
        .await
        .expect("Migrations should apply successfully");

    let tables = get_table_names(&db).await;
    assert_eq!(tables, vec!["batches", "species", "stratification_steps"]);
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let db = create_empty_db().await;
    Migrator::up(&db, None).await.unwrap();

    let result = Migrator::up(&db, None).await;
    assert!(result.is_ok(), "Second run should be a no-op: {:?}", result.err());
}

#[tokio::test]
async fn test_migrations_down_drops_tables() {
    let db = create_empty_db().await;
    Migrator::up(&db, None).await.unwrap();

    Migrator::down(&db, None)
        .await
        .expect("Rollback should succeed");

    assert!(get_table_names(&db).await.is_empty());
}

#[tokio::test]
async fn test_species_table_keeps_legacy_columns() {
    let db = create_empty_db().await;
    Migrator::up(&db, None).await.unwrap();

    let columns = get_column_names(&db, "species").await;
    for expected in ["id", "name", "cold_stratified", "stratification_days"] {
        assert!(columns.contains(&expected.to_string()), "Missing column {}", expected);
    }
}

#[tokio::test]
async fn test_child_tables_cascade_on_species_delete() {
    let db = create_empty_db().await;
    Migrator::up(&db, None).await.unwrap();

    for table in ["batches", "stratification_steps"] {
        let fks = get_foreign_keys(&db, table).await;
        assert_eq!(
            fks,
            vec![(
                "species_id".to_string(),
                "species".to_string(),
                "CASCADE".to_string()
            )],
            "Unexpected foreign keys on {}",
            table
        );
    }
}

#[tokio::test]
async fn test_indexes_created() {
    let db = create_empty_db().await;
    Migrator::up(&db, None).await.unwrap();

    assert!(get_indexes(&db, "batches")
        .await
        .contains(&"idx_batches_date_created".to_string()));
    assert!(get_indexes(&db, "stratification_steps")
        .await
        .contains(&"idx_stratification_steps_species".to_string()));
}

// =============================================================================
// Legacy data
// =============================================================================

#[tokio::test]
async fn test_legacy_flag_without_days_gets_default_duration() {
    let db = create_empty_db().await;
    create_legacy_species_table(&db).await;
    execute(
        &db,
        "INSERT INTO species (id, name, cold_stratified, stratification_days) VALUES (1, 'Asclepias', 1, NULL)",
    )
    .await;

    Migrator::up(&db, None).await.unwrap();

    assert_eq!(
        get_steps(&db, 1).await,
        vec![(0, "Cold".to_string(), true, DEFAULT_LEGACY_DAYS)]
    );
    assert_eq!(DEFAULT_LEGACY_DAYS, 30);
}

#[tokio::test]
async fn test_legacy_flag_keeps_stored_days() {
    let db = create_empty_db().await;
    create_legacy_species_table(&db).await;
    execute(
        &db,
        "INSERT INTO species (id, name, cold_stratified, stratification_days) VALUES (1, 'Baptisia', 1, 10)",
    )
    .await;

    Migrator::up(&db, None).await.unwrap();

    assert_eq!(get_steps(&db, 1).await, vec![(0, "Cold".to_string(), true, 10)]);
}

#[tokio::test]
async fn test_legacy_non_positive_days_use_default() {
    let db = create_empty_db().await;
    create_legacy_species_table(&db).await;
    execute(
        &db,
        "INSERT INTO species (id, name, cold_stratified, stratification_days) VALUES (1, 'Viola', 1, 0)",
    )
    .await;

    Migrator::up(&db, None).await.unwrap();

    assert_eq!(
        get_steps(&db, 1).await,
        vec![(0, "Cold".to_string(), true, DEFAULT_LEGACY_DAYS)]
    );
}

#[tokio::test]
async fn test_unflagged_legacy_species_get_no_steps() {
    let db = create_empty_db().await;
    create_legacy_species_table(&db).await;
    execute(
        &db,
        "INSERT INTO species (id, name, cold_stratified, stratification_days) VALUES (1, 'Zinnia', 0, 45)",
    )
    .await;

    Migrator::up(&db, None).await.unwrap();

    assert!(get_steps(&db, 1).await.is_empty());
}

#[tokio::test]
async fn test_legacy_conversion_runs_once() {
    let db = create_empty_db().await;
    create_legacy_species_table(&db).await;
    execute(
        &db,
        "INSERT INTO species (id, name, cold_stratified, stratification_days) VALUES (1, 'Asclepias', 1, 60)",
    )
    .await;
    Migrator::up(&db, None).await.unwrap();

    let converted = convert_legacy_stratification(&db).await.unwrap();

    assert_eq!(converted, 0);
    assert_eq!(get_steps(&db, 1).await.len(), 1);
}

#[tokio::test]
async fn test_legacy_conversion_skips_species_with_steps() {
    let db = create_empty_db().await;
    Migrator::up(&db, None).await.unwrap();
    execute(
        &db,
        "INSERT INTO species (id, name, cold_stratified, stratification_days) VALUES (1, 'Penstemon', 1, 30)",
    )
    .await;
    execute(
        &db,
        "INSERT INTO species (id, name, cold_stratified, stratification_days) VALUES (2, 'Aquilegia', 1, 21)",
    )
    .await;
    execute(
        &db,
        "INSERT INTO stratification_steps (species_id, step_order, type, moist, days) VALUES (1, 0, 'Warm', 0, 14)",
    )
    .await;

    let converted = convert_legacy_stratification(&db).await.unwrap();

    assert_eq!(converted, 1);
    assert_eq!(get_steps(&db, 1).await, vec![(0, "Warm".to_string(), false, 14)]);
    assert_eq!(get_steps(&db, 2).await, vec![(0, "Cold".to_string(), true, 21)]);
}

#[tokio::test]
async fn test_legacy_batches_table_is_recreated() {
    let db = create_empty_db().await;
    execute(
        &db,
        "CREATE TABLE batches (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            species TEXT NOT NULL,
            num_cells INTEGER NOT NULL
        )",
    )
    .await;
    execute(&db, "INSERT INTO batches (species, num_cells) VALUES ('Asclepias', 12)").await;

    Migrator::up(&db, None).await.unwrap();

    let columns = get_column_names(&db, "batches").await;
    assert!(columns.contains(&"species_id".to_string()));
    assert!(!columns.contains(&"species".to_string()));

    let rows = query(&db, "SELECT id FROM batches").await;
    assert!(rows.is_empty(), "Legacy batches are discarded");
}

#[tokio::test]
async fn test_current_batches_table_is_kept() {
    let db = create_empty_db().await;
    Migrator::up(&db, None).await.unwrap();
    execute(&db, "INSERT INTO species (id, name) VALUES (1, 'Asclepias')").await;
    execute(
        &db,
        "INSERT INTO batches (species_id, num_cells, seeds_per_cell, date_created) VALUES (1, 12, 2, '2024-04-12')",
    )
    .await;

    Migrator::up(&db, None).await.unwrap();

    assert_eq!(query(&db, "SELECT id FROM batches").await.len(), 1);
}
