use sea_orm::entity::prelude::*;

/// A plant species. The deprecated `cold_stratified` / `stratification_days`
/// columns still exist in the table but are only read by the legacy
/// stratification migration, so they are not mapped here.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "species")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stratification_step::Entity")]
    StratificationSteps,
    #[sea_orm(has_many = "super::batch::Entity")]
    Batches,
}

impl Related<super::stratification_step::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StratificationSteps.def()
    }
}

impl Related<super::batch::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Batches.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
