pub use sea_orm_migration::prelude::*;

mod m20240412_000001_create_species;
mod m20240412_000002_create_batches;
mod m20240412_000003_create_stratification_steps;
mod m20240412_000004_migrate_legacy_stratification;

pub use m20240412_000004_migrate_legacy_stratification::{
    convert_legacy_stratification, DEFAULT_LEGACY_DAYS,
};

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240412_000001_create_species::Migration),
            Box::new(m20240412_000002_create_batches::Migration),
            Box::new(m20240412_000003_create_stratification_steps::Migration),
            Box::new(m20240412_000004_migrate_legacy_stratification::Migration),
        ]
    }
}
