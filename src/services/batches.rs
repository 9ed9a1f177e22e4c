//! Batch repository

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set};
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::prelude::*;
use crate::models::batch;

/// Every field of a batch as submitted. Written verbatim; `total_seeds` is
/// independent of `num_cells * seeds_per_cell`.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct BatchInput {
    pub species_id: i64,
    #[validate(range(min = 1, message = "Number of cells must be at least 1"))]
    pub num_cells: i32,
    #[validate(range(min = 1, message = "Seeds per cell must be at least 1"))]
    pub seeds_per_cell: i32,
    pub total_seeds: Option<i32>,
    pub date_created: chrono::NaiveDate,
}

/// A batch joined with the name of its species
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchWithSpecies {
    pub batch: batch::Model,
    pub species_name: String,
}

/// All batches, newest `date_created` first
pub async fn list_batches<C: ConnectionTrait>(db: &C) -> Result<Vec<BatchWithSpecies>> {
    let rows = Batch::find()
        .find_also_related(Species)
        .order_by_desc(batch::Column::DateCreated)
        .order_by_desc(batch::Column::Id)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(b, s)| {
            s.map(|s| BatchWithSpecies {
                batch: b,
                species_name: s.name,
            })
        })
        .collect())
}

pub async fn get_batch<C: ConnectionTrait>(db: &C, id: i64) -> Result<BatchWithSpecies> {
    match Batch::find_by_id(id).find_also_related(Species).one(db).await? {
        Some((b, Some(s))) => Ok(BatchWithSpecies {
            batch: b,
            species_name: s.name,
        }),
        _ => Err(AppError::NotFound("Batch not found".to_string())),
    }
}

/// Insert a batch. Returns the new batch id.
pub async fn create_batch<C: ConnectionTrait>(db: &C, input: BatchInput) -> Result<i64> {
    ensure_species_exists(db, input.species_id).await?;

    let created = batch::ActiveModel {
        species_id: Set(input.species_id),
        num_cells: Set(input.num_cells),
        seeds_per_cell: Set(input.seeds_per_cell),
        total_seeds: Set(input.total_seeds),
        date_created: Set(input.date_created),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!(
        batch_id = created.id,
        species_id = created.species_id,
        "Created batch"
    );
    Ok(created.id)
}

/// Replace every field of an existing batch
pub async fn update_batch<C: ConnectionTrait>(db: &C, id: i64, input: BatchInput) -> Result<()> {
    let existing = Batch::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Batch not found".to_string()))?;

    ensure_species_exists(db, input.species_id).await?;

    let mut model: batch::ActiveModel = existing.into();
    model.species_id = Set(input.species_id);
    model.num_cells = Set(input.num_cells);
    model.seeds_per_cell = Set(input.seeds_per_cell);
    model.total_seeds = Set(input.total_seeds);
    model.date_created = Set(input.date_created);
    model.update(db).await?;

    tracing::info!(batch_id = id, "Updated batch");
    Ok(())
}

pub async fn delete_batch<C: ConnectionTrait>(db: &C, id: i64) -> Result<()> {
    let result = Batch::delete_by_id(id).exec(db).await?;

    if result.rows_affected == 0 {
        tracing::debug!(batch_id = id, "Delete requested for missing batch");
    } else {
        tracing::info!(batch_id = id, "Deleted batch");
    }
    Ok(())
}

async fn ensure_species_exists<C: ConnectionTrait>(db: &C, species_id: i64) -> Result<()> {
    if Species::find_by_id(species_id).one(db).await?.is_none() {
        return Err(AppError::BadRequest(format!(
            "Species {} does not exist",
            species_id
        )));
    }
    Ok(())
}
