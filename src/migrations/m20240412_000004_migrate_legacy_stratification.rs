//! Migration: Convert legacy species stratification flags into steps
//!
//! Older releases described stratification with a `cold_stratified` flag and
//! an optional `stratification_days` count on the species row. Each flagged
//! species that has no steps yet receives a single moist cold step.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, Statement};

/// Duration used when a legacy row has no usable day count
pub const DEFAULT_LEGACY_DAYS: i32 = 30;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let converted = convert_legacy_stratification(manager.get_connection()).await?;
        if converted > 0 {
            tracing::info!("Converted {} legacy stratification entries", converted);
        }
        Ok(())
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        // Steps may have been edited since; the legacy columns are left untouched
        Ok(())
    }
}

/// Insert a step `{0, Cold, moist, days}` for every legacy-flagged species
/// without steps. Returns the number of species converted.
///
/// Species that already own a step are skipped, so calling this again is a no-op.
pub async fn convert_legacy_stratification<C>(db: &C) -> Result<u64, DbErr>
where
    C: ConnectionTrait,
{
    let backend = db.get_database_backend();

    let rows = db
        .query_all(Statement::from_string(
            backend,
            r#"SELECT id, stratification_days
               FROM species
               WHERE cold_stratified = 1
                 AND id NOT IN (SELECT DISTINCT species_id FROM stratification_steps)"#,
        ))
        .await?;

    let mut converted = 0;
    for row in rows {
        let species_id: i64 = row.try_get("", "id")?;
        let stored_days: Option<i32> = row.try_get("", "stratification_days")?;
        let days = stored_days
            .filter(|d| *d > 0)
            .unwrap_or(DEFAULT_LEGACY_DAYS);

        db.execute(Statement::from_sql_and_values(
            backend,
            r#"INSERT INTO stratification_steps (species_id, step_order, type, moist, days)
               VALUES (?, 0, 'Cold', 1, ?)"#,
            [species_id.into(), days.into()],
        ))
        .await?;

        tracing::debug!(species_id, days, "Converted legacy stratification");
        converted += 1;
    }

    Ok(converted)
}
