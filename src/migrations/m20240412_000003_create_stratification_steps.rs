//! Migration: Create stratification_steps table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StratificationSteps::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StratificationSteps::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StratificationSteps::SpeciesId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StratificationSteps::StepOrder)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StratificationSteps::Type).text().not_null())
                    .col(
                        ColumnDef::new(StratificationSteps::Moist)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(StratificationSteps::Days).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stratification_steps_species")
                            .from(StratificationSteps::Table, StratificationSteps::SpeciesId)
                            .to(Species::Table, Species::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stratification_steps_species")
                    .table(StratificationSteps::Table)
                    .col(StratificationSteps::SpeciesId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(StratificationSteps::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
pub enum StratificationSteps {
    Table,
    Id,
    #[iden = "species_id"]
    SpeciesId,
    #[iden = "step_order"]
    StepOrder,
    Type,
    Moist,
    Days,
}

#[derive(Iden)]
pub enum Species {
    Table,
    Id,
}
