//! Migration: Create species table
//!
//! Also adopts a species table written by older releases, which carries the
//! deprecated `cold_stratified` / `stratification_days` columns.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Species::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Species::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Species::Name).string().not_null().unique_key())
                    .col(
                        ColumnDef::new(Species::ColdStratified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Species::StratificationDays).integer().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Species::Table).if_exists().to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Species {
    Table,
    Id,
    Name,
    #[iden = "cold_stratified"]
    ColdStratified,
    #[iden = "stratification_days"]
    StratificationDays,
}
