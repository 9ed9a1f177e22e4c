//! Test helpers shared by the integration tests.
//!
//! Every test gets its own in-memory SQLite database with all migrations
//! applied, plus helpers for seeding records and driving the router.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tower::util::ServiceExt;

use plant_tracker::endpoints::create_router;
use plant_tracker::migrations::Migrator;
use plant_tracker::models::StepType;
use plant_tracker::services::{batches, species, BatchInput, SpeciesInput, StepInput};
use plant_tracker::state::AppState;

/// Open an empty in-memory SQLite database without running migrations
pub async fn create_empty_db() -> DatabaseConnection {
    // A single connection keeps every query on the same in-memory database
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);

    Database::connect(opts)
        .await
        .expect("Failed to create test database")
}

/// Create an in-memory SQLite database with the schema applied
pub async fn create_test_db() -> DatabaseConnection {
    let db = create_empty_db().await;

    Migrator::up(&db, None)
        .await
        .expect("Failed to run test migrations");

    db
}

pub fn build_app_state(db: DatabaseConnection) -> AppState {
    AppState::new(db)
}

pub fn build_app(db: DatabaseConnection) -> Router {
    create_router(build_app_state(db))
}

pub fn step(step_type: StepType, moist: bool, days: i32) -> StepInput {
    StepInput {
        step_type,
        moist,
        days,
    }
}

/// Create a species with the given steps and return its id
pub async fn create_test_species(db: &DatabaseConnection, name: &str, steps: Vec<StepInput>) -> i64 {
    species::create_species(
        db,
        SpeciesInput {
            name: name.to_string(),
            steps,
        },
    )
    .await
    .expect("Failed to create test species")
}

pub fn batch_input(species_id: i64, date: NaiveDate) -> BatchInput {
    BatchInput {
        species_id,
        num_cells: 12,
        seeds_per_cell: 2,
        total_seeds: None,
        date_created: date,
    }
}

/// Create a batch with default counts and return its id
pub async fn create_test_batch(db: &DatabaseConnection, species_id: i64, date: NaiveDate) -> i64 {
    batches::create_batch(db, batch_input(species_id, date))
        .await
        .expect("Failed to create test batch")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Request helpers
// ============================================================================

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap();

    app.oneshot(request).await.unwrap()
}

/// POST an `application/x-www-form-urlencoded` body
pub async fn post_form(app: Router, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();

    app.oneshot(request).await.unwrap()
}

/// POST a body without a `Content-Type` header
pub async fn post_untyped(app: Router, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .method("POST")
        .body(Body::from(body.to_string()))
        .unwrap();

    app.oneshot(request).await.unwrap()
}

pub async fn read_body(response: Response) -> (StatusCode, String) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&bytes).to_string())
}

/// Assert a 303 redirect to `location`
pub fn assert_redirect(response: &Response, location: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        location,
        "Unexpected redirect target"
    );
}
