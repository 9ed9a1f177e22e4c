//! Species repository
//!
//! Species own an ordered list of stratification steps. Writes replace the
//! whole step list inside the same transaction as the species row.

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, SqlErr, TransactionTrait,
};
use validator::Validate;

use crate::db::DbConn;
use crate::error::{AppError, Result};
use crate::models::prelude::*;
use crate::models::{species, stratification_step};

// ============================================================================
// Input / Read Models
// ============================================================================

/// One step as submitted, before it is assigned a position
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct StepInput {
    pub step_type: StepType,
    pub moist: bool,
    #[validate(range(min = 1, max = 3650, message = "Step duration must be between 1 and 3650 days"))]
    pub days: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct SpeciesInput {
    #[validate(length(min = 1, max = 200, message = "Species name must be 1-200 characters"))]
    pub name: String,
    #[validate(nested)]
    pub steps: Vec<StepInput>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesWithSteps {
    pub species: species::Model,
    /// Sorted by `step_order`
    pub steps: Vec<stratification_step::Model>,
}

// ============================================================================
// Queries
// ============================================================================

/// All species ordered by name, each with its steps
pub async fn list_species<C: ConnectionTrait>(db: &C) -> Result<Vec<SpeciesWithSteps>> {
    let all_species = Species::find()
        .order_by_asc(species::Column::Name)
        .all(db)
        .await?;

    let mut steps_by_species: HashMap<i64, Vec<stratification_step::Model>> = HashMap::new();
    let all_steps = StratificationStep::find()
        .order_by_asc(stratification_step::Column::SpeciesId)
        .order_by_asc(stratification_step::Column::StepOrder)
        .all(db)
        .await?;
    for step in all_steps {
        steps_by_species.entry(step.species_id).or_default().push(step);
    }

    Ok(all_species
        .into_iter()
        .map(|s| {
            let steps = steps_by_species.remove(&s.id).unwrap_or_default();
            SpeciesWithSteps { species: s, steps }
        })
        .collect())
}

pub async fn get_species<C: ConnectionTrait>(db: &C, id: i64) -> Result<SpeciesWithSteps> {
    let found = Species::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Species not found".to_string()))?;

    let steps = find_steps(db, id).await?;

    Ok(SpeciesWithSteps {
        species: found,
        steps,
    })
}

async fn find_steps<C: ConnectionTrait>(
    db: &C,
    species_id: i64,
) -> Result<Vec<stratification_step::Model>> {
    Ok(StratificationStep::find()
        .filter(stratification_step::Column::SpeciesId.eq(species_id))
        .order_by_asc(stratification_step::Column::StepOrder)
        .all(db)
        .await?)
}

// ============================================================================
// Writes
// ============================================================================

/// Create a species and its steps. Returns the new species id.
pub async fn create_species(db: &DbConn, input: SpeciesInput) -> Result<i64> {
    let txn = db.begin().await?;

    ensure_name_available(&txn, &input.name, None).await?;

    let created = species::ActiveModel {
        name: Set(input.name.clone()),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(|e| name_conflict(e, &input.name))?;

    replace_steps(&txn, created.id, &input.steps).await?;
    txn.commit().await?;

    tracing::info!(
        species_id = created.id,
        steps = input.steps.len(),
        "Created species {}",
        created.name
    );
    Ok(created.id)
}

/// Overwrite a species's name and replace all of its steps
pub async fn update_species(db: &DbConn, id: i64, input: SpeciesInput) -> Result<()> {
    let txn = db.begin().await?;

    let existing = Species::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Species not found".to_string()))?;

    ensure_name_available(&txn, &input.name, Some(id)).await?;

    let mut model: species::ActiveModel = existing.into();
    model.name = Set(input.name.clone());
    model
        .update(&txn)
        .await
        .map_err(|e| name_conflict(e, &input.name))?;

    replace_steps(&txn, id, &input.steps).await?;
    txn.commit().await?;

    tracing::info!(species_id = id, steps = input.steps.len(), "Updated species");
    Ok(())
}

/// Delete a species. Its batches and steps go with it via `ON DELETE CASCADE`.
pub async fn delete_species<C: ConnectionTrait>(db: &C, id: i64) -> Result<()> {
    let result = Species::delete_by_id(id).exec(db).await?;

    if result.rows_affected == 0 {
        tracing::debug!(species_id = id, "Delete requested for missing species");
    } else {
        tracing::info!(species_id = id, "Deleted species");
    }
    Ok(())
}

/// Remove every step of `species_id` and insert `steps` with orders 0..n
pub async fn replace_steps<C: ConnectionTrait>(
    db: &C,
    species_id: i64,
    steps: &[StepInput],
) -> std::result::Result<(), DbErr> {
    StratificationStep::delete_many()
        .filter(stratification_step::Column::SpeciesId.eq(species_id))
        .exec(db)
        .await?;

    if steps.is_empty() {
        return Ok(());
    }

    let rows = steps
        .iter()
        .enumerate()
        .map(|(order, step)| stratification_step::ActiveModel {
            species_id: Set(species_id),
            step_order: Set(order as i32),
            step_type: Set(step.step_type),
            moist: Set(step.moist),
            days: Set(step.days),
            ..Default::default()
        });

    StratificationStep::insert_many(rows).exec(db).await?;
    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

async fn ensure_name_available<C: ConnectionTrait>(
    db: &C,
    name: &str,
    exclude_id: Option<i64>,
) -> Result<()> {
    let mut query = Species::find().filter(species::Column::Name.eq(name));
    if let Some(id) = exclude_id {
        query = query.filter(species::Column::Id.ne(id));
    }

    if query.one(db).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "Species '{}' already exists",
            name
        )));
    }
    Ok(())
}

fn name_conflict(err: DbErr, name: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict(format!("Species '{}' already exists", name))
        }
        _ => AppError::Database(err),
    }
}
