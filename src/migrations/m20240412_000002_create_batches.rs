//! Migration: Create batches table
//!
//! Older releases stored batches without a species reference. Such a table is
//! dropped and recreated; its rows are not carried over.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.has_table("batches").await?
            && !manager.has_column("batches", "species_id").await?
        {
            tracing::warn!("Dropping legacy batches table without species_id; existing batches are discarded");
            manager
                .drop_table(Table::drop().table(Batches::Table).to_owned())
                .await?;
        }

        manager
            .create_table(
                Table::create()
                    .table(Batches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Batches::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Batches::SpeciesId).integer().not_null())
                    .col(ColumnDef::new(Batches::NumCells).integer().not_null())
                    .col(ColumnDef::new(Batches::SeedsPerCell).integer().not_null())
                    .col(ColumnDef::new(Batches::TotalSeeds).integer().null())
                    .col(ColumnDef::new(Batches::DateCreated).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_batches_species")
                            .from(Batches::Table, Batches::SpeciesId)
                            .to(Species::Table, Species::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_batches_date_created")
                    .table(Batches::Table)
                    .col(Batches::DateCreated)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Batches::Table).if_exists().to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Batches {
    Table,
    Id,
    #[iden = "species_id"]
    SpeciesId,
    #[iden = "num_cells"]
    NumCells,
    #[iden = "seeds_per_cell"]
    SeedsPerCell,
    #[iden = "total_seeds"]
    TotalSeeds,
    #[iden = "date_created"]
    DateCreated,
}

#[derive(Iden)]
pub enum Species {
    Table,
    Id,
}
